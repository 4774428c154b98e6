//! hostbridge core: transport-agnostic protocol primitives, platform state,
//! version gating, and the shared error type.
//!
//! This crate defines the wire-level contracts between embedded content and
//! its host process. It carries no transport or runtime dependencies so it
//! can be reused by the runtime crate, the dev host, and test tooling alike.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed host
//! input surfaces as `BridgeError`/`Result` (or the decode sentinel), never
//! as a crash of the content side.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod platform;
pub mod protocol;
pub mod version;

/// Shared result type.
pub use error::{BridgeError, Result};
