//! hostbridge runtime: everything between content code and a host process.
//!
//! - `config`: strict YAML configuration.
//! - `detector`: platform/version state with the one-time handshake.
//! - `transport`: the three outbound channels and their dispatcher.
//! - `demux`: the inbound decode entry point, sinks and the event bus.
//! - `pending`: correlation tables for awaiting helpers and pipe requests.
//! - `capabilities`: the capability catalogue and typed wrappers.
//! - `bridge`: the facade tying these together.
//! - `devhost`: a WebSocket stand-in for a real host (used by the binary).

pub mod bridge;
pub mod capabilities;
pub mod config;
pub mod demux;
pub mod detector;
pub mod devhost;
pub mod pending;
pub mod transport;

pub use bridge::{Bridge, BridgeBuilder, CallOutcome};
