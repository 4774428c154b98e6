use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use hostbridge_core::error::{BridgeError, Result};
use hostbridge_core::platform::Markers;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    pub version: u32,

    #[serde(default)]
    pub bridge: BridgeSection,

    #[serde(default)]
    pub detect: DetectSection,

    #[serde(default)]
    pub devhost: DevhostSection,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            bridge: BridgeSection::default(),
            detect: DetectSection::default(),
            devhost: DevhostSection::default(),
        }
    }
}

impl BridgeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BridgeError::Config(format!(
                "unsupported config version {} (expected 1)",
                self.version
            )));
        }

        self.bridge.validate()?;
        self.devhost.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeSection {
    /// Custom-scheme URL the navigation channel loads.
    #[serde(default = "default_url_scheme")]
    pub url_scheme: String,

    /// Query key carrying the encoded envelope.
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Delay before the detached frame is removed.
    #[serde(default = "default_frame_teardown_ms")]
    pub frame_teardown_ms: u64,

    /// Appended to a service name to form its native entry-point namespace.
    #[serde(default = "default_native_namespace_suffix")]
    pub native_namespace_suffix: String,

    /// Upper bound for awaiting helpers. 0 waits forever.
    #[serde(default = "default_pending_timeout_ms")]
    pub pending_timeout_ms: u64,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            url_scheme: default_url_scheme(),
            query_param: default_query_param(),
            frame_teardown_ms: default_frame_teardown_ms(),
            native_namespace_suffix: default_native_namespace_suffix(),
            pending_timeout_ms: default_pending_timeout_ms(),
        }
    }
}

impl BridgeSection {
    pub fn validate(&self) -> Result<()> {
        if !self.url_scheme.contains("://") {
            return Err(BridgeError::Config(
                "bridge.url_scheme must look like scheme://host/path".into(),
            ));
        }
        if self.url_scheme.contains('?') {
            return Err(BridgeError::Config(
                "bridge.url_scheme must not carry a query; use bridge.query_param".into(),
            ));
        }
        if self.query_param.is_empty() {
            return Err(BridgeError::Config("bridge.query_param must not be empty".into()));
        }
        if !(1..=10000).contains(&self.frame_teardown_ms) {
            return Err(BridgeError::Config(
                "bridge.frame_teardown_ms must be between 1 and 10000".into(),
            ));
        }
        Ok(())
    }

    /// URL prefix the encoded envelope is appended to.
    pub fn plugin_url_prefix(&self) -> String {
        format!("{}?{}=", self.url_scheme, self.query_param)
    }

    pub fn frame_teardown(&self) -> Duration {
        Duration::from_millis(self.frame_teardown_ms)
    }

    pub fn pending_timeout(&self) -> Option<Duration> {
        (self.pending_timeout_ms > 0).then(|| Duration::from_millis(self.pending_timeout_ms))
    }
}

fn default_url_scheme() -> String {
    "ctrip://h5/plugin".into()
}
fn default_query_param() -> String {
    "jsparam".into()
}
fn default_frame_teardown_ms() -> u64 {
    200
}
fn default_native_namespace_suffix() -> String {
    "_a".into()
}
fn default_pending_timeout_ms() -> u64 {
    30000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectSection {
    #[serde(default = "default_app_marker")]
    pub app_marker: String,

    #[serde(default = "default_test_build_marker")]
    pub test_build_marker: String,

    #[serde(default = "default_ios_markers")]
    pub ios_markers: Vec<String>,

    #[serde(default = "default_browser_marker")]
    pub browser_marker: String,
}

impl Default for DetectSection {
    fn default() -> Self {
        Self {
            app_marker: default_app_marker(),
            test_build_marker: default_test_build_marker(),
            ios_markers: default_ios_markers(),
            browser_marker: default_browser_marker(),
        }
    }
}

impl DetectSection {
    pub fn markers(&self) -> Markers {
        Markers {
            app_marker: self.app_marker.clone(),
            test_build_marker: self.test_build_marker.clone(),
            ios_markers: self.ios_markers.clone(),
            browser_marker: self.browser_marker.clone(),
        }
    }
}

fn default_app_marker() -> String {
    Markers::default().app_marker
}
fn default_test_build_marker() -> String {
    Markers::default().test_build_marker
}
fn default_ios_markers() -> Vec<String> {
    Markers::default().ios_markers
}
fn default_browser_marker() -> String {
    Markers::default().browser_marker
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DevhostSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// User agent the dev host's content side reports.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page URL the dev host's content side reports.
    #[serde(default = "default_page_url")]
    pub page_url: String,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for DevhostSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            user_agent: default_user_agent(),
            page_url: default_page_url(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}

impl DevhostSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<SocketAddr>().is_err() {
            return Err(BridgeError::Config(format!(
                "devhost.listen must be a socket address (got {:?})",
                self.listen
            )));
        }
        if !(1000..=120000).contains(&self.ping_interval_ms) {
            return Err(BridgeError::Config(
                "devhost.ping_interval_ms must be between 1000 and 120000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(BridgeError::Config(
                "devhost.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:9400".into()
}
fn default_user_agent() -> String {
    "hostbridge-devhost".into()
}
fn default_page_url() -> String {
    "file:///webapp/index.html".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}
