//! Host platform kinds, handshake data, and environment heuristics.
//!
//! Two sources decide the platform:
//! - the handshake message the host sends once after load (authoritative),
//! - user-agent markers read from the content environment (fallback only).
//!
//! Windows Phone is never inferred from markers; it needs the handshake.

use serde::{Deserialize, Serialize};

/// Host transport family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Ios,
    Android,
    WindowsPhone,
    Unknown,
}

impl PlatformKind {
    /// Map the handshake discriminator (1/2/3) to a platform.
    pub fn from_discriminator(d: f64) -> Option<Self> {
        if d == 1.0 {
            Some(PlatformKind::Ios)
        } else if d == 2.0 {
            Some(PlatformKind::Android)
        } else if d == 3.0 {
            Some(PlatformKind::WindowsPhone)
        } else {
            None
        }
    }

    /// Handshake discriminator for this platform.
    pub fn discriminator(self) -> Option<u8> {
        match self {
            PlatformKind::Ios => Some(1),
            PlatformKind::Android => Some(2),
            PlatformKind::WindowsPhone => Some(3),
            PlatformKind::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKind::Ios => "ios",
            PlatformKind::Android => "android",
            PlatformKind::WindowsPhone => "windows_phone",
            PlatformKind::Unknown => "unknown",
        }
    }
}

/// Data carried by the first recognised handshake message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub kind: PlatformKind,
    pub app_version: String,
    pub os_version: String,
}

/// Snapshot of what the content side knows about its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformState {
    pub platform_kind: PlatformKind,
    pub in_host: bool,
    /// Empty when unknown.
    pub app_version: String,
    /// Empty when unknown.
    pub os_version: String,
}

impl PlatformState {
    /// State derived from environment heuristics alone.
    pub fn heuristic(kind: PlatformKind) -> Self {
        Self {
            platform_kind: kind,
            in_host: kind != PlatformKind::Unknown,
            app_version: String::new(),
            os_version: String::new(),
        }
    }
}

impl From<Handshake> for PlatformState {
    fn from(h: Handshake) -> Self {
        Self {
            platform_kind: h.kind,
            in_host: true,
            app_version: h.app_version,
            os_version: h.os_version,
        }
    }
}

/// Ambient signals readable by content code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    pub user_agent: String,
    /// Location of the current page (some capabilities forward it as `pageUrl`).
    pub page_url: String,
}

impl Environment {
    pub fn new(user_agent: impl Into<String>, page_url: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            page_url: page_url.into(),
        }
    }
}

/// User-agent markers used before the handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Token the host app appends to its embedded user agent.
    pub app_marker: String,
    /// Token of the test build that bypasses version gating.
    pub test_build_marker: String,
    /// Any of these (without the browser marker) means an iOS host.
    pub ios_markers: Vec<String>,
    /// Present in stand-alone mobile browsers, absent in the embedded view.
    pub browser_marker: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            app_marker: "CtripWireless".into(),
            test_build_marker: "Youth_CtripWireless".into(),
            ios_markers: vec!["iPhone".into(), "iPad".into()],
            browser_marker: "Safari".into(),
        }
    }
}

impl Markers {
    /// Classify the environment. `Unknown` means "not inside a host".
    pub fn classify(&self, env: &Environment) -> PlatformKind {
        let ua = env.user_agent.as_str();
        if !self.app_marker.is_empty() && ua.contains(&self.app_marker) {
            return PlatformKind::Android;
        }
        let ios_device = self
            .ios_markers
            .iter()
            .any(|m| !m.is_empty() && ua.contains(m.as_str()));
        let browser = !self.browser_marker.is_empty() && ua.contains(&self.browser_marker);
        if ios_device && !browser {
            return PlatformKind::Ios;
        }
        PlatformKind::Unknown
    }

    /// Whether the environment is the test build (version gate bypass).
    pub fn is_test_build(&self, env: &Environment) -> bool {
        !self.test_build_marker.is_empty() && env.user_agent.contains(&self.test_build_marker)
    }
}
