//! Inbound side: host messages back to content.
//!
//! - `Demultiplexer`: the single decode entry point (`on_host_message`).
//! - `MessageSink`: where decoded and synthesized messages end up.
//! - `EventBus`: a sink that turns messages into typed `BridgeEvent`s and
//!   fans them out by tag.

pub mod demultiplexer;
pub mod events;
pub mod sink;

pub use demultiplexer::{Demultiplexer, DECODE_FAILED, DELIVERED};
pub use events::{BridgeEvent, EventBus, HandlerId, PipeResponse};
pub use sink::MessageSink;
