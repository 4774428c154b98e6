//! Protocol modules.
//!
//! The bridge has two asymmetric wire shapes over one codec:
//! - Outbound: a flat JSON `Envelope` (service/action/callback_tagname + params).
//! - Inbound: a percent-encoded JSON `HostMessage` keyed by `tagname`.
//!
//! All parsers are panic-free: malformed host input is reported as
//! `BridgeError::Decode` rather than crashing the content side.

pub mod codec;
pub mod envelope;
pub mod message;

pub use envelope::Envelope;
pub use message::{HostMessage, TAG_PARAM_ERROR, TAG_VERSION_TOO_LOW};
