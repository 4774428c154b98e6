use std::sync::Arc;

use hostbridge_core::error::Result;
use hostbridge_core::protocol::Envelope;

use crate::transport::{Channel, ChannelKind, NotifyHost};

/// Synchronous-notify channel: the raw envelope JSON goes to one entry point.
pub struct NotifyChannel {
    host: Arc<dyn NotifyHost>,
}

impl NotifyChannel {
    pub fn new(host: Arc<dyn NotifyHost>) -> Self {
        Self { host }
    }
}

impl Channel for NotifyChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Notify
    }

    fn send(&self, envelope: &Envelope) -> Result<()> {
        self.host.notify(&envelope.to_json()?)
    }
}
