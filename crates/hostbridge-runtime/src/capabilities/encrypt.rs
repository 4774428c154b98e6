use hostbridge_core::error::Result;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::{catalog, params};

/// Direction for the host's private cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptMode {
    Encrypt = 1,
    Decrypt = 2,
}

pub struct Encrypt<'a> {
    bridge: &'a Bridge,
}

impl<'a> Encrypt<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn base64_encode(&self, input: &str) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::BASE64_ENCODE,
            Some(params([("toIncodeString", input.into())])),
        )
    }

    pub fn md5_hash(&self, input: &str) -> Result<CallOutcome> {
        self.bridge
            .call(&catalog::MD5_HASH, Some(params([("inString", input.into())])))
    }

    pub fn ctrip_encrypt(&self, input: &str, mode: EncryptMode) -> Result<CallOutcome> {
        self.bridge.call(
            &catalog::CTRIP_ENCRYPT,
            Some(params([
                ("inString", input.into()),
                ("encType", (mode as u8).into()),
            ])),
        )
    }
}
