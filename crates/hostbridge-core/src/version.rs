//! Host version gating.
//!
//! Versions are compared numerically on their leading decimal prefix, so
//! `"5.4"` reads as 5.4 and `"5.4.1"` also reads as 5.4. An unknown host
//! version is trusted (the host would not have loaded the content otherwise).

use crate::error::{BridgeError, Result};

/// Parse the leading decimal number of a version string.
///
/// Accepts optional leading whitespace, an optional sign, digits and at most
/// one decimal point. Returns `None` when no digit is found.
pub fn parse_version_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse().ok()
}

/// Whether a capability requiring `min_version` may be called.
///
/// - `bypass` (test build) always passes.
/// - An empty `min_version` never passes.
/// - An unknown/unparseable `app_version` always passes.
/// - Otherwise `app_version >= min_version`.
pub fn is_supported(min_version: &str, app_version: &str, bypass: bool) -> bool {
    if bypass {
        return true;
    }
    if min_version.is_empty() {
        return false;
    }
    let Some(current) = parse_version_number(app_version) else {
        return true;
    };
    match parse_version_number(min_version) {
        Some(required) => current >= required,
        None => false,
    }
}

/// `is_supported` as a `Result`, for callers that propagate with `?`.
pub fn check(min_version: &str, app_version: &str, bypass: bool) -> Result<()> {
    if is_supported(min_version, app_version, bypass) {
        Ok(())
    } else {
        Err(BridgeError::VersionUnsupported {
            required: min_version.to_owned(),
            actual: app_version.to_owned(),
        })
    }
}
