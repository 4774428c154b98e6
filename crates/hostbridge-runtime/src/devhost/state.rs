//! Shared state of the dev host.

use std::sync::Arc;

use tracing::info;

use hostbridge_core::error::Result;
use hostbridge_core::platform::Environment;

use crate::bridge::Bridge;
use crate::config::BridgeConfig;
use crate::demux::EventBus;
use crate::devhost::HostLink;

#[derive(Clone)]
pub struct DevhostState {
    inner: Arc<DevhostInner>,
}

struct DevhostInner {
    cfg: BridgeConfig,
    bridge: Bridge,
    link: Arc<HostLink>,
    events: Arc<EventBus>,
}

impl DevhostState {
    /// Build the bridge with every channel wired to one `HostLink`.
    /// Must run inside a tokio runtime (frame teardown).
    pub fn new(cfg: BridgeConfig) -> Result<Self> {
        let link = Arc::new(HostLink::new());
        let events = Arc::new(EventBus::new());
        events.on_any(|ev| info!(tagname = ev.tagname(), "callback delivered"));

        let env = Environment::new(
            cfg.devhost.user_agent.clone(),
            cfg.devhost.page_url.clone(),
        );
        let bridge = Bridge::builder(cfg.clone())
            .environment(env)
            .frame_host(link.clone())
            .native_entry_points(link.clone())
            .notify_host(link.clone())
            .local_store(link.clone())
            .sink(events.clone())
            .build()?;

        Ok(Self {
            inner: Arc::new(DevhostInner {
                cfg,
                bridge,
                link,
                events,
            }),
        })
    }

    pub fn cfg(&self) -> &BridgeConfig {
        &self.inner.cfg
    }

    pub fn bridge(&self) -> &Bridge {
        &self.inner.bridge
    }

    pub fn link(&self) -> &HostLink {
        &self.inner.link
    }

    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }
}
