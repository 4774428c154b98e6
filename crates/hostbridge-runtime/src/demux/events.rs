use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use hostbridge_core::protocol::{HostMessage, TAG_PARAM_ERROR, TAG_VERSION_TOO_LOW};

use crate::capabilities::catalog;
use crate::demux::MessageSink;

/// Pipe response correlated by sequence id.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeResponse {
    pub sequence_id: String,
    pub message: HostMessage,
}

/// Typed view of a host message.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    VersionTooLow {
        start_version: String,
        app_version: String,
    },
    ParamError {
        description: String,
    },
    Pipe(PipeResponse),
    Message(HostMessage),
}

fn extra_str(msg: &HostMessage, key: &str) -> String {
    msg.extra
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

impl BridgeEvent {
    pub fn classify(msg: HostMessage) -> Self {
        match msg.tagname.as_str() {
            TAG_VERSION_TOO_LOW => BridgeEvent::VersionTooLow {
                start_version: extra_str(&msg, "start_version"),
                app_version: extra_str(&msg, "app_version"),
            },
            TAG_PARAM_ERROR => BridgeEvent::ParamError {
                description: extra_str(&msg, "description"),
            },
            tag if catalog::is_pipe_response_tag(tag) => match msg.sequence_id() {
                Some(seq) => BridgeEvent::Pipe(PipeResponse {
                    sequence_id: seq.to_owned(),
                    message: msg,
                }),
                None => BridgeEvent::Message(msg),
            },
            _ => BridgeEvent::Message(msg),
        }
    }

    pub fn tagname(&self) -> &str {
        match self {
            BridgeEvent::VersionTooLow { .. } => TAG_VERSION_TOO_LOW,
            BridgeEvent::ParamError { .. } => TAG_PARAM_ERROR,
            BridgeEvent::Pipe(p) => &p.message.tagname,
            BridgeEvent::Message(m) => &m.tagname,
        }
    }
}

pub type HandlerId = u64;

type Handler = Arc<dyn Fn(&BridgeEvent) + Send + Sync>;

struct Registration {
    /// `None` matches every tag.
    tag: Option<String>,
    handler: Handler,
}

/// Tag-keyed event fan-out. Handlers run in registration order.
#[derive(Default)]
pub struct EventBus {
    handlers: DashMap<HandlerId, Registration>,
    next_id: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Handle events whose tag is `tag`.
    pub fn on<F>(&self, tag: &str, f: F) -> HandlerId
    where
        F: Fn(&BridgeEvent) + Send + Sync + 'static,
    {
        self.add(Some(tag.to_owned()), Arc::new(f))
    }

    /// Handle every event.
    pub fn on_any<F>(&self, f: F) -> HandlerId
    where
        F: Fn(&BridgeEvent) + Send + Sync + 'static,
    {
        self.add(None, Arc::new(f))
    }

    pub fn off(&self, id: HandlerId) -> bool {
        self.handlers.remove(&id).is_some()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn add(&self, tag: Option<String>, handler: Handler) -> HandlerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.insert(id, Registration { tag, handler });
        id
    }

    /// Run matching handlers. Handlers are collected first so they may
    /// register or remove handlers themselves.
    pub fn emit(&self, event: &BridgeEvent) {
        let tag = event.tagname();
        let mut matched: Vec<(HandlerId, Handler)> = self
            .handlers
            .iter()
            .filter(|r| r.tag.as_deref().map_or(true, |t| t == tag))
            .map(|r| (*r.key(), Arc::clone(&r.handler)))
            .collect();
        matched.sort_by_key(|(id, _)| *id);

        for (_, handler) in matched {
            handler(event);
        }
    }
}

impl MessageSink for EventBus {
    fn deliver(&self, msg: HostMessage) {
        self.emit(&BridgeEvent::classify(msg));
    }
}
