//! Host-side collaborators the channels hand envelopes to.
//!
//! These are implemented by whatever embeds the content: the dev host's
//! WebSocket link, or recording fakes in tests.

use hostbridge_core::error::Result;

/// Identifier of an attached detached frame.
pub type FrameId = u64;

/// The embedding document.
pub trait FrameHost: Send + Sync {
    /// Attach an invisible frame loading `url`.
    fn attach_frame(&self, url: &str) -> Result<FrameId>;
    /// Remove a frame created by `attach_frame`.
    fn detach_frame(&self, id: FrameId);
    /// Navigate the page itself to `url`.
    fn navigate(&self, url: &str) -> Result<()>;
}

/// Per-service native objects exposed to content (`<Service>_a.<action>`).
pub trait NativeEntryPoints: Send + Sync {
    fn invoke(&self, namespace: &str, method: &str, payload: &str) -> Result<()>;
}

/// The single synchronous notify entry point.
pub trait NotifyHost: Send + Sync {
    fn notify(&self, payload: &str) -> Result<()>;
}

/// Content-side key/value storage the host writes into.
pub trait LocalStore: Send + Sync {
    fn set_item(&self, key: &str, value: &str);
}
