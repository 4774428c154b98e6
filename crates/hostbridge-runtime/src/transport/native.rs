use std::sync::Arc;

use hostbridge_core::error::Result;
use hostbridge_core::protocol::Envelope;

use crate::transport::{Channel, ChannelKind, NativeEntryPoints};

/// Direct-invocation channel: `<service><suffix>.<action>(json)`.
pub struct NativeEntryChannel {
    host: Arc<dyn NativeEntryPoints>,
    suffix: String,
}

impl NativeEntryChannel {
    pub fn new(host: Arc<dyn NativeEntryPoints>, suffix: impl Into<String>) -> Self {
        Self {
            host,
            suffix: suffix.into(),
        }
    }

    pub fn namespace_for(&self, service: &str) -> String {
        format!("{service}{}", self.suffix)
    }
}

impl Channel for NativeEntryChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Native
    }

    fn send(&self, envelope: &Envelope) -> Result<()> {
        let json = envelope.to_json()?;
        self.host
            .invoke(&self.namespace_for(&envelope.service), &envelope.action, &json)
    }
}
