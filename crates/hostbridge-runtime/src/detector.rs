//! Platform detector state.
//!
//! One `PlatformCell` is created per bridge and shared by `Arc`. Before the
//! host handshake it answers from user-agent markers; the first recognised
//! handshake is stored once and wins from then on.

use std::sync::OnceLock;

use tracing::{debug, info};

use hostbridge_core::platform::{Environment, Handshake, Markers, PlatformKind, PlatformState};
use hostbridge_core::version;

pub struct PlatformCell {
    env: Environment,
    markers: Markers,
    handshake: OnceLock<PlatformState>,
}

impl PlatformCell {
    pub fn new(env: Environment, markers: Markers) -> Self {
        Self {
            env,
            markers,
            handshake: OnceLock::new(),
        }
    }

    /// Current platform. Idempotent and side-effect free.
    pub fn detect(&self) -> PlatformKind {
        match self.handshake.get() {
            Some(state) => state.platform_kind,
            None => self.markers.classify(&self.env),
        }
    }

    pub fn is_in_host(&self) -> bool {
        match self.handshake.get() {
            Some(state) => state.in_host,
            None => self.detect() != PlatformKind::Unknown,
        }
    }

    /// Snapshot of what is known right now.
    pub fn state(&self) -> PlatformState {
        match self.handshake.get() {
            Some(state) => state.clone(),
            None => PlatformState::heuristic(self.detect()),
        }
    }

    pub fn handshake_done(&self) -> bool {
        self.handshake.get().is_some()
    }

    /// Host version from the handshake, empty when unknown.
    pub fn app_version(&self) -> &str {
        self.handshake
            .get()
            .map(|s| s.app_version.as_str())
            .unwrap_or_default()
    }

    pub fn is_test_build(&self) -> bool {
        self.markers.is_test_build(&self.env)
    }

    pub fn is_supported(&self, min_version: &str) -> bool {
        version::is_supported(min_version, self.app_version(), self.is_test_build())
    }

    /// Apply the one-time handshake transition. Returns `false` when a
    /// handshake was already applied.
    pub fn apply_handshake(&self, handshake: Handshake) -> bool {
        let kind = handshake.kind;
        if self.handshake.set(PlatformState::from(handshake)).is_err() {
            debug!(platform = kind.as_str(), "handshake already applied; ignoring");
            return false;
        }
        info!(
            platform = kind.as_str(),
            app_version = %self.app_version(),
            "host handshake applied"
        );
        true
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }
}
