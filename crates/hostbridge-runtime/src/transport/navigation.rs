use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{debug, trace};

use hostbridge_core::error::Result;
use hostbridge_core::protocol::codec::percent_encode;
use hostbridge_core::protocol::Envelope;

use crate::config::BridgeSection;
use crate::transport::{Channel, ChannelKind, FrameHost};

/// Navigation-intercept channel.
///
/// The envelope is percent-encoded into `<scheme>?<param>=` and loaded in a
/// detached frame; the host intercepts the load. The frame is removed after
/// `teardown` whether or not the host consumed it.
pub struct NavigationChannel {
    host: Arc<dyn FrameHost>,
    url_prefix: String,
    teardown: Duration,
    rt: Handle,
}

impl NavigationChannel {
    pub fn new(host: Arc<dyn FrameHost>, cfg: &BridgeSection, rt: Handle) -> Self {
        Self {
            host,
            url_prefix: cfg.plugin_url_prefix(),
            teardown: cfg.frame_teardown(),
            rt,
        }
    }

    /// Full plugin URL for `envelope`.
    pub fn url_for(&self, envelope: &Envelope) -> Result<String> {
        let json = envelope.to_json()?;
        Ok(format!("{}{}", self.url_prefix, percent_encode(&json)))
    }
}

impl Channel for NavigationChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Navigation
    }

    fn send(&self, envelope: &Envelope) -> Result<()> {
        let url = self.url_for(envelope)?;
        let frame = self.host.attach_frame(&url)?;
        debug!(frame, service = %envelope.service, action = %envelope.action, "frame attached");

        let host = Arc::clone(&self.host);
        let delay = self.teardown;
        self.rt.spawn(async move {
            tokio::time::sleep(delay).await;
            host.detach_frame(frame);
            trace!(frame, "frame detached");
        });
        Ok(())
    }
}
