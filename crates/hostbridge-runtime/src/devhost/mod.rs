//! Dev host: plays the host side of the bridge over a WebSocket.
//!
//! - `GET /v1/host`: every channel hand-off is forwarded as a JSON text frame
//!   (`{"channel": "navigation" | "native" | "notify" | "page", ...}`); every
//!   inbound text frame goes to `on_host_message` and is acked with its code.
//! - `POST /v1/call`: issue a content-side call.
//! - `GET /healthz`, `GET /state`.

pub mod link;
pub mod ops;
pub mod router;
pub mod state;
pub mod ws;

use thiserror::Error;

use hostbridge_core::error::BridgeError;

pub use link::HostLink;
pub use state::DevhostState;

/// Startup failures of the dev host binary.
#[derive(Debug, Error)]
pub enum DevhostError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error("devhost.listen is not a socket address: {0}")]
    Listen(#[from] std::net::AddrParseError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
