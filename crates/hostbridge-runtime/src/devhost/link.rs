use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::Message;
use dashmap::DashMap;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::trace;

use hostbridge_core::error::{BridgeError, Result};

use crate::transport::{FrameHost, FrameId, LocalStore, NativeEntryPoints, NotifyHost};

/// Host collaborators backed by attached WebSocket sessions.
///
/// Hand-offs are broadcast to every attached session; with none attached
/// they fail as transport errors. Local storage writes stay in memory.
pub struct HostLink {
    sessions: DashMap<u64, mpsc::Sender<Message>>,
    next_session: AtomicU64,
    next_frame: AtomicU64,
    storage: DashMap<String, String>,
}

impl Default for HostLink {
    fn default() -> Self {
        Self::new()
    }
}

impl HostLink {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            next_session: AtomicU64::new(1),
            next_frame: AtomicU64::new(1),
            storage: DashMap::new(),
        }
    }

    pub fn attach(&self, tx: mpsc::Sender<Message>) -> u64 {
        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        self.sessions.insert(id, tx);
        id
    }

    pub fn detach(&self, session: u64) {
        self.sessions.remove(&session);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn storage_snapshot(&self) -> BTreeMap<String, String> {
        self.storage
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    fn forward(&self, frame: Value) -> Result<()> {
        if self.sessions.is_empty() {
            return Err(BridgeError::Transport("no host session attached".into()));
        }
        let text = frame.to_string();
        let delivered = self
            .sessions
            .iter()
            .filter(|s| s.value().try_send(Message::Text(text.clone())).is_ok())
            .count();
        if delivered == 0 {
            return Err(BridgeError::Transport("host session queue full or closed".into()));
        }
        trace!(delivered, "hand-off forwarded");
        Ok(())
    }
}

impl FrameHost for HostLink {
    fn attach_frame(&self, url: &str) -> Result<FrameId> {
        let frame = self.next_frame.fetch_add(1, Ordering::Relaxed);
        self.forward(json!({ "channel": "navigation", "frame": frame, "url": url }))?;
        Ok(frame)
    }

    fn detach_frame(&self, id: FrameId) {
        let _ = self.forward(json!({ "channel": "navigation", "frame": id, "detached": true }));
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.forward(json!({ "channel": "page", "url": url }))
    }
}

impl NativeEntryPoints for HostLink {
    fn invoke(&self, namespace: &str, method: &str, payload: &str) -> Result<()> {
        self.forward(json!({
            "channel": "native",
            "namespace": namespace,
            "method": method,
            "payload": payload,
        }))
    }
}

impl NotifyHost for HostLink {
    fn notify(&self, payload: &str) -> Result<()> {
        self.forward(json!({ "channel": "notify", "payload": payload }))
    }
}

impl LocalStore for HostLink {
    fn set_item(&self, key: &str, value: &str) {
        self.storage.insert(key.to_owned(), value.to_owned());
    }
}
