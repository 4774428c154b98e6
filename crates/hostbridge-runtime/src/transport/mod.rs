//! Outbound transport channels.
//!
//! Each host platform accepts envelopes through exactly one one-way channel:
//! - iOS: a custom-scheme URL loaded in a detached frame (`navigation`),
//! - Android: a per-service native entry point (`native`),
//! - Windows Phone: a single notify entry point (`notify`).
//!
//! Channels are registered once per platform on a `TransportDispatcher`.

pub mod dispatcher;
pub mod host;
pub mod native;
pub mod navigation;
pub mod notify;

use serde::Serialize;

use hostbridge_core::error::Result;
use hostbridge_core::protocol::Envelope;

pub use dispatcher::{Delivery, TransportDispatcher};
pub use host::{FrameHost, FrameId, LocalStore, NativeEntryPoints, NotifyHost};
pub use native::NativeEntryChannel;
pub use navigation::NavigationChannel;
pub use notify::NotifyChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Navigation,
    Native,
    Notify,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Navigation => "navigation",
            ChannelKind::Native => "native",
            ChannelKind::Notify => "notify",
        }
    }
}

/// One outbound strategy. `send` only hands the envelope over; it never
/// waits for the host.
pub trait Channel: Send + Sync {
    fn kind(&self) -> ChannelKind;
    fn send(&self, envelope: &Envelope) -> Result<()>;
}
