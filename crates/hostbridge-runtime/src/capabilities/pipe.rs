//! Sequence-correlated pipe requests.
//!
//! Send and abort share the `Pipe` service. Both outcomes of a send (body or
//! error) arrive under the send's tag carrying `param.sequenceId`. The bridge
//! neither allocates nor validates sequence ids; callers pick them.
//!
//! `*_tracked` variants register the sequence id first and return a
//! `PendingHandle` that resolves with the matching response. Abort is fire
//! and forget: once sent it also settles a tracked request locally, so a
//! late host response is ignored.

use serde_json::{Map, Value};

use hostbridge_core::error::{BridgeError, Result};
use hostbridge_core::protocol::HostMessage;

use crate::bridge::{Bridge, CallOutcome};
use crate::capabilities::catalog::{self, Capability};
use crate::capabilities::params;
use crate::pending::{PendingHandle, RequestState};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpPipeRequest {
    pub base_url: String,
    pub path: String,
    pub method: String,
    pub header: String,
    pub parameters: String,
    pub ignore_https_certification: bool,
    pub sequence_id: String,
}

impl HttpPipeRequest {
    fn params(&self) -> Map<String, Value> {
        params([
            ("baseURL", self.base_url.as_str().into()),
            ("path", self.path.as_str().into()),
            ("method", self.method.as_str().into()),
            ("header", self.header.as_str().into()),
            ("parameters", self.parameters.as_str().into()),
            ("sequenceId", self.sequence_id.as_str().into()),
            ("isIgnoreHTTPSCertification", self.ignore_https_certification.into()),
        ])
    }
}

/// Request to a named back-end service through the host's H5 agent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct H5PipeRequest {
    pub service_code: String,
    pub header: String,
    pub data: String,
    pub sequence_id: String,
}

impl H5PipeRequest {
    fn params(&self) -> Map<String, Value> {
        params([
            ("serviceCode", self.service_code.as_str().into()),
            ("header", self.header.as_str().into()),
            ("data", self.data.as_str().into()),
            ("sequenceId", self.sequence_id.as_str().into()),
        ])
    }
}

pub struct Pipe<'a> {
    bridge: &'a Bridge,
}

impl<'a> Pipe<'a> {
    pub(crate) fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn send_http(&self, req: &HttpPipeRequest) -> Result<CallOutcome> {
        self.bridge
            .call(&catalog::SEND_HTTP_PIPE_REQUEST, Some(req.params()))
    }

    pub fn send_h5(&self, req: &H5PipeRequest) -> Result<CallOutcome> {
        self.bridge
            .call(&catalog::SEND_H5_PIPE_REQUEST, Some(req.params()))
    }

    pub fn send_http_tracked(&self, req: &HttpPipeRequest) -> Result<PendingHandle> {
        self.tracked(&catalog::SEND_HTTP_PIPE_REQUEST, &req.sequence_id, req.params())
    }

    pub fn send_h5_tracked(&self, req: &H5PipeRequest) -> Result<PendingHandle> {
        self.tracked(&catalog::SEND_H5_PIPE_REQUEST, &req.sequence_id, req.params())
    }

    /// Ask the host to abort `sequence_id`. A tracked request is settled as
    /// aborted only once the abort was handed to the host; otherwise it stays
    /// `Sent` and the caller sees why from the outcome.
    pub fn abort(&self, sequence_id: &str) -> Result<CallOutcome> {
        let outcome = self.bridge.call(
            &catalog::ABORT_HTTP_PIPE_REQUEST,
            Some(params([("sequenceId", sequence_id.into())])),
        )?;
        if let CallOutcome::Sent(_) = outcome {
            self.bridge.sequence_table().abort(sequence_id);
        }
        Ok(outcome)
    }

    /// State of a tracked request, while its handle is alive.
    pub fn state(&self, sequence_id: &str) -> Option<RequestState> {
        self.bridge.sequence_table().state(sequence_id)
    }

    /// Await a tracked request under the configured pending timeout.
    pub async fn wait(&self, handle: PendingHandle) -> Result<HostMessage> {
        self.bridge.settle(handle).await
    }

    fn tracked(
        &self,
        cap: &Capability,
        sequence_id: &str,
        p: Map<String, Value>,
    ) -> Result<PendingHandle> {
        if sequence_id.is_empty() {
            return Err(BridgeError::Param(
                "tracked pipe requests need a sequence id".into(),
            ));
        }
        let handle = self.bridge.sequence_table().register(sequence_id)?;
        match self.bridge.call(cap, Some(p))? {
            CallOutcome::Sent(_) => Ok(handle),
            CallOutcome::VersionTooLow => Err(BridgeError::VersionUnsupported {
                required: cap.min_version.unwrap_or_default().to_owned(),
                actual: self.bridge.platform().app_version().to_owned(),
            }),
            other => Err(BridgeError::Transport(format!(
                "pipe request {sequence_id} not sent ({other:?})"
            ))),
        }
    }
}
