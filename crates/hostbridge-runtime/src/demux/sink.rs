use hostbridge_core::protocol::HostMessage;

/// Process-wide receiver of host messages (decoded or synthesized).
pub trait MessageSink: Send + Sync {
    fn deliver(&self, msg: HostMessage);
}

impl<F> MessageSink for F
where
    F: Fn(HostMessage) + Send + Sync,
{
    fn deliver(&self, msg: HostMessage) {
        self(msg)
    }
}
