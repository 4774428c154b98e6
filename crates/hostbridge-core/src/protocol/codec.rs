//! Percent codec for the wire (component-style, panic-free).
//!
//! Encoding rules:
//! - ASCII alphanumerics and `- _ . ! ~ * ' ( )` pass through.
//! - Every other byte of the UTF-8 input becomes `%XX` (upper-case hex).
//!
//! Decoding rules:
//! - `%XX` sequences are collected as raw bytes; the result must be valid UTF-8.
//! - A truncated or non-hex escape is a decode failure.
//! - `+` is left alone (it is not a space in component encoding).

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::{BridgeError, Result};

/// Everything except ASCII alphanumerics and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a string for use inside a URL query component.
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Decode a percent-encoded string.
pub fn percent_decode(input: &str) -> Result<String> {
    check_escapes(input)?;
    percent_decode_str(input)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| BridgeError::Decode(format!("percent-decoded bytes are not utf-8: {e}")))
}

// `percent_decode_str` passes malformed escapes through verbatim.
fn check_escapes(input: &str) -> Result<()> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !ok {
                return Err(BridgeError::Decode("malformed percent escape".into()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
