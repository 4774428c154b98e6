//! Top-level facade crate for hostbridge.
//!
//! Re-exports the protocol core and the runtime so content code can depend
//! on a single crate.

pub mod core {
    pub use hostbridge_core::*;
}

pub mod runtime {
    pub use hostbridge_runtime::*;
}

pub use hostbridge_runtime::{Bridge, CallOutcome};
