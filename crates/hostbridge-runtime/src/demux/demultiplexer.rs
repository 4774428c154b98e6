use std::sync::Arc;

use tracing::{debug, warn};

use hostbridge_core::protocol::HostMessage;

use crate::capabilities::catalog;
use crate::demux::MessageSink;
use crate::detector::PlatformCell;
use crate::pending::PendingTable;

/// Returned when the message reached the sink.
pub const DELIVERED: i32 = 0;
/// Returned when the input did not decode to a JSON object.
pub const DECODE_FAILED: i32 = -1;

/// Decode entry point for host -> content messages.
///
/// Order per message: decode, apply the handshake (once), settle any
/// pending waiter, then forward to the sink. Waiters never swallow a
/// message; the sink sees everything that decoded.
pub struct Demultiplexer {
    platform: Arc<PlatformCell>,
    sink: Arc<dyn MessageSink>,
    by_tag: Arc<PendingTable>,
    by_sequence: Arc<PendingTable>,
}

impl Demultiplexer {
    pub fn new(
        platform: Arc<PlatformCell>,
        sink: Arc<dyn MessageSink>,
        by_tag: Arc<PendingTable>,
        by_sequence: Arc<PendingTable>,
    ) -> Self {
        Self {
            platform,
            sink,
            by_tag,
            by_sequence,
        }
    }

    pub fn on_host_message(&self, encoded: &str) -> i32 {
        let msg = match HostMessage::decode(encoded) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, len = encoded.len(), "host message dropped");
                return DECODE_FAILED;
            }
        };

        if msg.has_platform_field() {
            match msg.handshake() {
                Some(h) => {
                    self.platform.apply_handshake(h);
                }
                None => debug!("incomplete handshake (platform or version); state unchanged"),
            }
        }

        self.correlate(&msg);
        self.sink.deliver(msg);
        DELIVERED
    }

    /// Deliver a locally synthesized message (no decode, no handshake).
    pub fn deliver_local(&self, msg: HostMessage) {
        self.correlate(&msg);
        self.sink.deliver(msg);
    }

    // Pipe responses carrying a sequence id settle only sequence waiters,
    // even when the id is untracked or already aborted.
    fn correlate(&self, msg: &HostMessage) {
        if let Some(seq) = msg.sequence_id() {
            if self.by_sequence.resolve(seq, msg.clone())
                || catalog::is_pipe_response_tag(&msg.tagname)
            {
                return;
            }
        }
        if !msg.tagname.is_empty() {
            self.by_tag.resolve(&msg.tagname, msg.clone());
        }
    }
}
