//! Recording fakes for the host collaborators and the sink.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use hostbridge_core::error::{BridgeError, Result};
use hostbridge_core::platform::Environment;
use hostbridge_core::protocol::codec::percent_encode;
use hostbridge_core::protocol::HostMessage;
use hostbridge_runtime::config::BridgeConfig;
use hostbridge_runtime::demux::MessageSink;
use hostbridge_runtime::transport::{FrameHost, FrameId, LocalStore, NativeEntryPoints, NotifyHost};
use hostbridge_runtime::Bridge;

pub const UA_ANDROID_APP: &str =
    "Mozilla/5.0 (Linux; U; Android 4.1.2; zh-cn) AppleWebKit/534.30 Mobile CtripWireless_5.4";
pub const UA_IOS_APP: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X) AppleWebKit/537.51.1 Mobile/11A465";
pub const UA_IOS_SAFARI: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X) AppleWebKit/537.51.1 Version/7.0 Mobile/11A465 Safari/9537.53";
pub const UA_DESKTOP: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 Chrome/30.0 Safari/537.36";
pub const UA_TEST_BUILD: &str =
    "Mozilla/5.0 (Linux; Android 4.1.2) Mobile Youth_CtripWireless_5.1";

pub const PAGE_URL: &str = "file:///webapp/hotel/index.html";

#[derive(Default)]
pub struct RecordingHost {
    next_frame: AtomicU64,
    pub attached: Mutex<Vec<(FrameId, String)>>,
    pub detached: Mutex<Vec<FrameId>>,
    pub navigations: Mutex<Vec<String>>,
    pub native_calls: Mutex<Vec<(String, String, String)>>,
    pub notifies: Mutex<Vec<String>>,
    pub storage: Mutex<Vec<(String, String)>>,
    pub refuse_native: AtomicBool,
}

impl RecordingHost {
    pub fn attached(&self) -> Vec<(FrameId, String)> {
        self.attached.lock().unwrap().clone()
    }

    pub fn detached(&self) -> Vec<FrameId> {
        self.detached.lock().unwrap().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn native_calls(&self) -> Vec<(String, String, String)> {
        self.native_calls.lock().unwrap().clone()
    }

    pub fn notifies(&self) -> Vec<String> {
        self.notifies.lock().unwrap().clone()
    }

    /// Total hand-offs over any channel (page navigations excluded).
    pub fn handoffs(&self) -> usize {
        self.attached.lock().unwrap().len()
            + self.native_calls.lock().unwrap().len()
            + self.notifies.lock().unwrap().len()
    }

    /// Envelope JSON of the only native call made so far.
    pub fn single_native_payload(&self) -> Value {
        let calls = self.native_calls();
        assert_eq!(calls.len(), 1, "expected exactly one native call");
        serde_json::from_str(&calls[0].2).unwrap()
    }
}

impl FrameHost for RecordingHost {
    fn attach_frame(&self, url: &str) -> Result<FrameId> {
        let id = self.next_frame.fetch_add(1, Ordering::SeqCst) + 1;
        self.attached.lock().unwrap().push((id, url.to_owned()));
        Ok(id)
    }

    fn detach_frame(&self, id: FrameId) {
        self.detached.lock().unwrap().push(id);
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.navigations.lock().unwrap().push(url.to_owned());
        Ok(())
    }
}

impl NativeEntryPoints for RecordingHost {
    fn invoke(&self, namespace: &str, method: &str, payload: &str) -> Result<()> {
        if self.refuse_native.load(Ordering::SeqCst) {
            return Err(BridgeError::Transport(format!("{namespace} is not defined")));
        }
        self.native_calls
            .lock()
            .unwrap()
            .push((namespace.to_owned(), method.to_owned(), payload.to_owned()));
        Ok(())
    }
}

impl NotifyHost for RecordingHost {
    fn notify(&self, payload: &str) -> Result<()> {
        self.notifies.lock().unwrap().push(payload.to_owned());
        Ok(())
    }
}

impl LocalStore for RecordingHost {
    fn set_item(&self, key: &str, value: &str) {
        self.storage
            .lock()
            .unwrap()
            .push((key.to_owned(), value.to_owned()));
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<HostMessage>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<HostMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn tags(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.tagname).collect()
    }

    pub fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl MessageSink for RecordingSink {
    fn deliver(&self, msg: HostMessage) {
        self.messages.lock().unwrap().push(msg);
    }
}

pub struct Harness {
    pub bridge: Bridge,
    pub host: Arc<RecordingHost>,
    pub sink: Arc<RecordingSink>,
}

/// Bridge with all three channels wired to one recording host.
/// Call from inside a tokio runtime.
pub fn harness(user_agent: &str) -> Harness {
    harness_with(BridgeConfig::default(), user_agent)
}

pub fn harness_with(cfg: BridgeConfig, user_agent: &str) -> Harness {
    let host = Arc::new(RecordingHost::default());
    let sink = Arc::new(RecordingSink::default());
    let bridge = Bridge::builder(cfg)
        .environment(Environment::new(user_agent, PAGE_URL))
        .frame_host(host.clone())
        .native_entry_points(host.clone())
        .notify_host(host.clone())
        .local_store(host.clone())
        .sink(sink.clone())
        .build()
        .unwrap();
    Harness { bridge, host, sink }
}

/// Percent-encode a JSON value the way a host hands messages over.
pub fn encoded(v: Value) -> String {
    percent_encode(&v.to_string())
}

pub fn handshake(platform: u8, version: &str) -> String {
    encoded(json!({
        "tagname": "web_view_finished_load",
        "param": { "platform": platform, "version": version, "osVersion": "4.4" }
    }))
}
