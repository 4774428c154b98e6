//! Inbound message (host -> content) and the locally synthesized callbacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};
use crate::platform::{Handshake, PlatformKind};
use crate::protocol::codec::{percent_decode, percent_encode};

/// Tag of the synthesized version-failure callback.
pub const TAG_VERSION_TOO_LOW: &str = "app_version_too_low";
/// Tag of the synthesized param-error callback.
pub const TAG_PARAM_ERROR: &str = "app_param_error";

/// Decoded message delivered to the sink.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostMessage {
    /// Operation kind that produced this message. Not unique per invocation.
    #[serde(default)]
    pub tagname: String,
    /// Structured payload, when the host sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Value>,
    /// Any other flat fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostMessage {
    /// Decode the single percent-encoded JSON string the host hands over.
    ///
    /// Anything that does not decode to a JSON object is a decode failure.
    pub fn decode(encoded: &str) -> Result<Self> {
        let text = percent_decode(encoded)?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| BridgeError::Decode(format!("invalid host message json: {e}")))?;
        if !value.is_object() {
            return Err(BridgeError::Decode("host message is not a json object".into()));
        }
        serde_json::from_value(value)
            .map_err(|e| BridgeError::Decode(format!("host message shape: {e}")))
    }

    /// Encode the way a host would before handing the message over.
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(self)
            .map_err(|e| BridgeError::Internal(format!("host message encode failed: {e}")))?;
        Ok(percent_encode(&json))
    }

    /// Synthesized callback for a capability the host is too old for.
    pub fn version_too_low(start_version: &str, app_version: &str) -> Self {
        let mut extra = Map::new();
        extra.insert("start_version".into(), Value::from(start_version));
        extra.insert("app_version".into(), Value::from(app_version));
        Self {
            tagname: TAG_VERSION_TOO_LOW.into(),
            param: None,
            extra,
        }
    }

    /// Synthesized callback for a malformed call.
    pub fn param_error(description: &str) -> Self {
        let mut extra = Map::new();
        extra.insert("description".into(), Value::from(description));
        Self {
            tagname: TAG_PARAM_ERROR.into(),
            param: None,
            extra,
        }
    }

    /// Field inside the `param` object.
    pub fn param_field(&self, key: &str) -> Option<&Value> {
        self.param.as_ref()?.as_object()?.get(key)
    }

    /// String field inside the `param` object.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.param_field(key)?.as_str()
    }

    /// `sequenceId` carried by pipe responses.
    pub fn sequence_id(&self) -> Option<&str> {
        self.param_str("sequenceId")
            .or_else(|| self.extra.get("sequenceId").and_then(Value::as_str))
    }

    /// Whether the message carries a platform discriminator at all.
    pub fn has_platform_field(&self) -> bool {
        self.param_field("platform").is_some()
    }

    /// Handshake data, if the message carries a recognised platform and a
    /// version string.
    ///
    /// An unrecognised or non-numeric discriminator, or a missing or
    /// non-string version, yields `None`. A missing `osVersion` reads as empty.
    pub fn handshake(&self) -> Option<Handshake> {
        let kind = self
            .param_field("platform")?
            .as_f64()
            .and_then(PlatformKind::from_discriminator)?;
        let app_version = self.param_str("version")?.to_owned();
        let os_version = self.param_str("osVersion").unwrap_or_default().to_owned();
        Some(Handshake {
            kind,
            app_version,
            os_version,
        })
    }
}
