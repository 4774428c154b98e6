//! Shared error type across hostbridge crates.

use thiserror::Error;

/// Stable error codes (used in logs and the dev host's JSON replies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or malformed call arguments.
    ParamError,
    /// Host version older than the capability requires.
    VersionUnsupported,
    /// Inbound host message could not be decoded.
    DecodeFailure,
    /// A host collaborator refused the outbound hand-off.
    Transport,
    /// A response is already pending for this correlation key.
    AlreadyPending,
    /// The pending operation was aborted before it resolved.
    Aborted,
    /// The pending operation did not resolve in time.
    Timeout,
    /// Invalid configuration.
    BadConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ParamError => "PARAM_ERROR",
            ErrorCode::VersionUnsupported => "VERSION_UNSUPPORTED",
            ErrorCode::DecodeFailure => "DECODE_FAILURE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::AlreadyPending => "ALREADY_PENDING",
            ErrorCode::Aborted => "ABORTED",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core and runtime.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("param error: {0}")]
    Param(String),
    #[error("capability requires host version {required}, host is {actual:?}")]
    VersionUnsupported { required: String, actual: String },
    #[error("decode failure: {0}")]
    Decode(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("already pending: {0}")]
    AlreadyPending(String),
    #[error("aborted: {0}")]
    Aborted(String),
    #[error("timed out waiting for {0}")]
    Timeout(String),
    #[error("bad config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Map the error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::Param(_) => ErrorCode::ParamError,
            BridgeError::VersionUnsupported { .. } => ErrorCode::VersionUnsupported,
            BridgeError::Decode(_) => ErrorCode::DecodeFailure,
            BridgeError::Transport(_) => ErrorCode::Transport,
            BridgeError::AlreadyPending(_) => ErrorCode::AlreadyPending,
            BridgeError::Aborted(_) => ErrorCode::Aborted,
            BridgeError::Timeout(_) => ErrorCode::Timeout,
            BridgeError::Config(_) => ErrorCode::BadConfig,
            BridgeError::Internal(_) => ErrorCode::Internal,
        }
    }
}
