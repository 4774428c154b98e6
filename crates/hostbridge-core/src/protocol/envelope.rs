//! Outbound request envelope (content -> host).
//!
//! On the wire the envelope is one flat JSON object: the caller's params plus
//! the three reserved keys `service`, `action` and `callback_tagname`. The
//! reserved keys always win over params of the same name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BridgeError, Result};

/// Reserved envelope keys injected by the builder.
pub const RESERVED_KEYS: [&str; 3] = ["service", "action", "callback_tagname"];

/// Canonical request object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Capability namespace on the host (e.g. "Util").
    pub service: String,
    /// Operation within that service (e.g. "callPhone").
    pub action: String,
    /// Tag the host echoes back as `tagname` on the response.
    #[serde(default)]
    pub callback_tagname: String,
    /// Capability-specific parameters, flattened into the top-level object.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl Envelope {
    /// Build an envelope from a call tuple.
    ///
    /// Returns `None` when `service` or `action` is empty; callers treat that
    /// as a parameter error and must not transmit anything.
    pub fn build(
        service: &str,
        action: &str,
        params: Option<Map<String, Value>>,
        tag: &str,
    ) -> Option<Self> {
        if service.is_empty() || action.is_empty() {
            return None;
        }

        let mut params = params.unwrap_or_default();
        for key in RESERVED_KEYS {
            params.remove(key);
        }

        Some(Self {
            service: service.to_owned(),
            action: action.to_owned(),
            callback_tagname: tag.to_owned(),
            params,
        })
    }

    /// Build an envelope whose params come from a caller-supplied JSON object
    /// document (e.g. a navigation bar configuration).
    pub fn from_config_json(json: &str, service: &str, action: &str, tag: &str) -> Result<Self> {
        if json.is_empty() {
            return Err(BridgeError::Param("config json must not be empty".into()));
        }
        let value: Value = serde_json::from_str(json)
            .map_err(|e| BridgeError::Param(format!("config json invalid: {e}")))?;
        let Value::Object(params) = value else {
            return Err(BridgeError::Param("config json must be an object".into()));
        };
        Self::build(service, action, Some(params), tag)
            .ok_or_else(|| BridgeError::Param("service and action must not be empty".into()))
    }

    /// Serialize to the flat JSON wire form.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| BridgeError::Internal(format!("envelope encode failed: {e}")))
    }

    /// Parse the flat JSON wire form.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| BridgeError::Decode(format!("invalid envelope json: {e}")))
    }
}
