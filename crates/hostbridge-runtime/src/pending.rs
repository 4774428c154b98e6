//! Pending-operation tables.
//!
//! A `PendingTable` maps a correlation key (a callback tag, or a pipe
//! sequence id) to a one-shot slot that the demultiplexer fills when the
//! matching host message arrives.
//!
//! - `register` fails while the same key is still tracked.
//! - `resolve` completes a `Sent` entry; anything else is ignored.
//! - `abort` settles a `Sent` entry locally; a late host response for it is
//!   logged and dropped.
//! - An entry lives as long as its `PendingHandle`.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use hostbridge_core::error::{BridgeError, Result};
use hostbridge_core::protocol::HostMessage;

/// Lifecycle of one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestState {
    Sent,
    Completed,
    Aborted,
}

struct Slot {
    state: RequestState,
    tx: Option<oneshot::Sender<Result<HostMessage>>>,
}

#[derive(Default)]
pub struct PendingTable {
    slots: DashMap<String, Slot>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    /// Start tracking `key`.
    pub fn register(self: &Arc<Self>, key: &str) -> Result<PendingHandle> {
        let (tx, rx) = oneshot::channel();
        match self.slots.entry(key.to_owned()) {
            MapEntry::Occupied(_) => Err(BridgeError::AlreadyPending(key.to_owned())),
            MapEntry::Vacant(v) => {
                v.insert(Slot {
                    state: RequestState::Sent,
                    tx: Some(tx),
                });
                Ok(PendingHandle {
                    key: key.to_owned(),
                    table: Arc::clone(self),
                    rx,
                })
            }
        }
    }

    /// Complete `key` with `msg`. Returns whether a waiter was resolved.
    pub fn resolve(&self, key: &str, msg: HostMessage) -> bool {
        let Some(mut slot) = self.slots.get_mut(key) else {
            return false;
        };
        match slot.state {
            RequestState::Sent => {
                slot.state = RequestState::Completed;
                if let Some(tx) = slot.tx.take() {
                    let _ = tx.send(Ok(msg));
                }
                true
            }
            RequestState::Aborted => {
                warn!(key, tagname = %msg.tagname, "late response for aborted request ignored");
                false
            }
            RequestState::Completed => {
                debug!(key, tagname = %msg.tagname, "duplicate response ignored");
                false
            }
        }
    }

    /// Settle `key` as aborted. Returns whether it was still outstanding.
    pub fn abort(&self, key: &str) -> bool {
        let Some(mut slot) = self.slots.get_mut(key) else {
            return false;
        };
        if slot.state != RequestState::Sent {
            return false;
        }
        slot.state = RequestState::Aborted;
        if let Some(tx) = slot.tx.take() {
            let _ = tx.send(Err(BridgeError::Aborted(key.to_owned())));
        }
        true
    }

    pub fn state(&self, key: &str) -> Option<RequestState> {
        self.slots.get(key).map(|s| s.state)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn release(&self, key: &str) {
        self.slots.remove(key);
    }
}

/// Waiter side of a registered key. Dropping it stops tracking the key.
pub struct PendingHandle {
    key: String,
    table: Arc<PendingTable>,
    rx: oneshot::Receiver<Result<HostMessage>>,
}

impl PendingHandle {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> Option<RequestState> {
        self.table.state(&self.key)
    }

    /// Wait for the host response (or a local abort).
    pub async fn wait(mut self) -> Result<HostMessage> {
        match (&mut self.rx).await {
            Ok(settled) => settled,
            Err(_) => Err(BridgeError::Aborted(self.key.clone())),
        }
    }

    /// `wait` bounded by `limit`.
    pub async fn wait_timeout(mut self, limit: Duration) -> Result<HostMessage> {
        match tokio::time::timeout(limit, &mut self.rx).await {
            Ok(Ok(settled)) => settled,
            Ok(Err(_)) => Err(BridgeError::Aborted(self.key.clone())),
            Err(_) => Err(BridgeError::Timeout(self.key.clone())),
        }
    }
}

impl Drop for PendingHandle {
    fn drop(&mut self) {
        self.table.release(&self.key);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn msg(tag: &str) -> HostMessage {
        HostMessage {
            tagname: tag.into(),
            ..HostMessage::default()
        }
    }

    #[tokio::test]
    async fn resolve_wakes_waiter() {
        let table = Arc::new(PendingTable::new());
        let handle = table.register("k").unwrap();
        assert!(table.resolve("k", msg("t")));
        assert_eq!(handle.state(), Some(RequestState::Completed));
        assert_eq!(handle.wait().await.unwrap().tagname, "t");
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn duplicate_register_is_rejected() {
        let table = Arc::new(PendingTable::new());
        let _first = table.register("k").unwrap();
        let err = table.register("k").err().unwrap();
        assert_eq!(err.code().as_str(), "ALREADY_PENDING");
    }

    #[tokio::test]
    async fn abort_then_late_response() {
        let table = Arc::new(PendingTable::new());
        let handle = table.register("k").unwrap();
        assert!(table.abort("k"));
        assert!(!table.resolve("k", msg("late")));
        assert_eq!(handle.state(), Some(RequestState::Aborted));
        let err = handle.wait().await.unwrap_err();
        assert_eq!(err.code().as_str(), "ABORTED");
    }

    #[tokio::test(start_paused = true)]
    async fn wait_timeout_expires() {
        let table = Arc::new(PendingTable::new());
        let handle = table.register("k").unwrap();
        let err = handle
            .wait_timeout(Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err.code().as_str(), "TIMEOUT");
        assert!(table.is_empty());
    }
}
