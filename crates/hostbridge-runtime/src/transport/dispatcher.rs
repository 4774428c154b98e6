use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use hostbridge_core::error::Result;
use hostbridge_core::platform::PlatformKind;
use hostbridge_core::protocol::Envelope;

use crate::transport::{Channel, ChannelKind};

/// Result of handing an envelope to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent(ChannelKind),
    /// No channel for the platform; nothing was transmitted.
    NoChannel,
}

/// Registry of one channel per platform.
#[derive(Default)]
pub struct TransportDispatcher {
    channels: DashMap<PlatformKind, Arc<dyn Channel>>,
}

impl TransportDispatcher {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    pub fn register(&self, platform: PlatformKind, channel: Arc<dyn Channel>) {
        self.channels.insert(platform, channel);
    }

    pub fn registered_platforms(&self) -> Vec<PlatformKind> {
        self.channels.iter().map(|e| *e.key()).collect()
    }

    /// Fire-and-forget send over the channel registered for `platform`.
    pub fn send(&self, envelope: &Envelope, platform: PlatformKind) -> Result<Delivery> {
        let Some(channel) = self.channels.get(&platform).map(|c| Arc::clone(c.value())) else {
            debug!(
                platform = platform.as_str(),
                service = %envelope.service,
                action = %envelope.action,
                "no channel for platform; call dropped"
            );
            return Ok(Delivery::NoChannel);
        };

        let kind = channel.kind();
        match channel.send(envelope) {
            Ok(()) => {
                debug!(
                    channel = kind.as_str(),
                    service = %envelope.service,
                    action = %envelope.action,
                    tag = %envelope.callback_tagname,
                    "envelope handed to host"
                );
                Ok(Delivery::Sent(kind))
            }
            Err(e) => {
                warn!(channel = kind.as_str(), error = %e, "host refused envelope");
                Err(e)
            }
        }
    }
}
