//! Sequence-correlated pipe requests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use serde_json::json;

use hostbridge_core::platform::{Environment, Markers};
use hostbridge_core::protocol::HostMessage;
use hostbridge_runtime::capabilities::catalog;
use hostbridge_runtime::capabilities::{H5PipeRequest, HttpPipeRequest};
use hostbridge_runtime::demux::{Demultiplexer, DELIVERED};
use hostbridge_runtime::detector::PlatformCell;
use hostbridge_runtime::pending::{PendingTable, RequestState};
use hostbridge_runtime::transport::ChannelKind;
use hostbridge_runtime::CallOutcome;

use common::*;

fn http(seq: &str) -> HttpPipeRequest {
    HttpPipeRequest {
        base_url: "https://m.example.com".into(),
        path: "/restapi/soa2/10098".into(),
        method: "POST".into(),
        header: "{}".into(),
        parameters: "{\"id\":1}".into(),
        ignore_https_certification: false,
        sequence_id: seq.into(),
    }
}

fn h5(seq: &str) -> H5PipeRequest {
    H5PipeRequest {
        service_code: "9500001".into(),
        header: "H5Agent".into(),
        data: "{}".into(),
        sequence_id: seq.into(),
    }
}

fn response(tag: &str, seq: &str, body: &str) -> String {
    encoded(json!({
        "tagname": tag,
        "param": { "sequenceId": seq, "resultBody": body, "result": 1 }
    }))
}

fn android_54() -> Harness {
    let h = harness(UA_ANDROID_APP);
    h.bridge.on_host_message(&handshake(2, "5.4"));
    h
}

#[tokio::test]
async fn wire_params_carry_sequence_id() {
    let h = android_54();
    let outcome = h.bridge.pipe().send_http(&http("1001")).unwrap();
    assert_eq!(outcome, CallOutcome::Sent(ChannelKind::Native));

    let payload = h.host.single_native_payload();
    assert_eq!(payload["service"], "Pipe");
    assert_eq!(payload["action"], "sendHTTPPipeRequest");
    assert_eq!(payload["callback_tagname"], "send_http_pipe_request");
    assert_eq!(payload["sequenceId"], "1001");
    assert_eq!(payload["baseURL"], "https://m.example.com");
    assert_eq!(payload["isIgnoreHTTPSCertification"], false);
}

#[tokio::test]
async fn concurrent_requests_resolve_independently() {
    let h = android_54();
    let pipe = h.bridge.pipe();

    let a = pipe.send_http_tracked(&http("A")).unwrap();
    let b = pipe.send_h5_tracked(&h5("B")).unwrap();
    assert_eq!(pipe.state("A"), Some(RequestState::Sent));
    assert_eq!(pipe.state("B"), Some(RequestState::Sent));

    // Out of order on purpose.
    let rb = h.bridge.on_host_message(&response("send_h5_pipe_request", "B", "body-b"));
    let ra = h.bridge.on_host_message(&response("send_http_pipe_request", "A", "body-a"));
    assert_eq!((ra, rb), (DELIVERED, DELIVERED));
    assert_eq!(pipe.state("A"), Some(RequestState::Completed));

    let got_a = a.wait().await.unwrap();
    let got_b = b.wait().await.unwrap();
    assert_eq!(got_a.sequence_id(), Some("A"));
    assert_eq!(got_a.param_str("resultBody"), Some("body-a"));
    assert_eq!(got_b.sequence_id(), Some("B"));
    assert_eq!(got_b.param_str("resultBody"), Some("body-b"));

    // Handles consumed: nothing tracked any more.
    assert_eq!(pipe.state("A"), None);
    assert_eq!(pipe.state("B"), None);
}

#[tokio::test]
async fn error_response_arrives_under_same_tag() {
    let h = android_54();
    let a = h.bridge.pipe().send_http_tracked(&http("E1")).unwrap();

    let failure = encoded(json!({
        "tagname": "send_http_pipe_request",
        "param": { "sequenceId": "E1", "errorInformation": "timeout", "serverErrorCode": "500" }
    }));
    h.bridge.on_host_message(&failure);

    let msg = a.wait().await.unwrap();
    assert_eq!(msg.param_str("serverErrorCode"), Some("500"));
}

#[tokio::test]
async fn late_response_after_abort_is_ignored() {
    let h = android_54();
    let pipe = h.bridge.pipe();
    let a = pipe.send_http_tracked(&http("A")).unwrap();

    let outcome = pipe.abort("A").unwrap();
    assert_eq!(outcome, CallOutcome::Sent(ChannelKind::Native));
    assert_eq!(pipe.state("A"), Some(RequestState::Aborted));

    let calls = h.host.native_calls();
    assert_eq!(calls[1].1, "abortHTTPRequest");

    // The bridge still forwards the late message; only the waiter ignores it.
    let before = h.sink.count();
    assert_eq!(
        h.bridge.on_host_message(&response("send_http_pipe_request", "A", "late")),
        DELIVERED
    );
    assert_eq!(h.sink.count(), before + 1);
    assert_eq!(pipe.state("A"), Some(RequestState::Aborted));

    let err = a.wait().await.unwrap_err();
    assert_eq!(err.code().as_str(), "ABORTED");
}

#[tokio::test]
async fn refused_abort_leaves_request_open() {
    let h = android_54();
    let pipe = h.bridge.pipe();
    let a = pipe.send_http_tracked(&http("A")).unwrap();

    h.host.refuse_native.store(true, Ordering::SeqCst);
    let err = pipe.abort("A").unwrap_err();
    assert_eq!(err.code().as_str(), "TRANSPORT");
    assert_eq!(pipe.state("A"), Some(RequestState::Sent));

    h.host.refuse_native.store(false, Ordering::SeqCst);
    h.bridge.on_host_message(&response("send_http_pipe_request", "A", "body-a"));
    let got = a.wait().await.unwrap();
    assert_eq!(got.param_str("resultBody"), Some("body-a"));
}

#[tokio::test]
async fn aborted_pipe_response_never_settles_tag_waiter() {
    let platform = Arc::new(PlatformCell::new(Environment::default(), Markers::default()));
    let by_tag = Arc::new(PendingTable::new());
    let by_sequence = Arc::new(PendingTable::new());
    let demux = Demultiplexer::new(
        platform,
        Arc::new(|_: HostMessage| {}),
        Arc::clone(&by_tag),
        Arc::clone(&by_sequence),
    );

    let tag_waiter = by_tag.register("send_http_pipe_request").unwrap();
    let seq_waiter = by_sequence.register("A").unwrap();
    assert!(by_sequence.abort("A"));

    let late = response("send_http_pipe_request", "A", "late");
    assert_eq!(demux.on_host_message(&late), DELIVERED);
    let untracked = response("send_http_pipe_request", "Z", "other");
    assert_eq!(demux.on_host_message(&untracked), DELIVERED);

    assert_eq!(tag_waiter.state(), Some(RequestState::Sent));
    assert_eq!(seq_waiter.state(), Some(RequestState::Aborted));
}

#[tokio::test]
async fn pipe_sends_are_not_awaited_by_tag() {
    let h = android_54();
    let err = h
        .bridge
        .call_and_wait(&catalog::SEND_HTTP_PIPE_REQUEST, None)
        .await
        .unwrap_err();
    assert_eq!(err.code().as_str(), "PARAM_ERROR");
    assert_eq!(h.host.handoffs(), 0);
}

#[tokio::test]
async fn untracked_sequence_is_just_forwarded() {
    let h = android_54();
    let code = h
        .bridge
        .on_host_message(&response("send_http_pipe_request", "nobody", "x"));
    assert_eq!(code, DELIVERED);
    assert_eq!(h.sink.tags().last().unwrap(), "send_http_pipe_request");
}

#[tokio::test]
async fn tracked_requests_need_unique_non_empty_ids() {
    let h = android_54();
    let pipe = h.bridge.pipe();

    let err = pipe.send_http_tracked(&http("")).err().unwrap();
    assert_eq!(err.code().as_str(), "PARAM_ERROR");

    let _first = pipe.send_http_tracked(&http("dup")).unwrap();
    let err = pipe.send_h5_tracked(&h5("dup")).err().unwrap();
    assert_eq!(err.code().as_str(), "ALREADY_PENDING");
    // Rejected before anything was sent.
    assert_eq!(h.host.native_calls().len(), 1);
}

#[tokio::test]
async fn pipe_is_gated_at_5_4() {
    let h = harness(UA_ANDROID_APP);
    h.bridge.on_host_message(&handshake(2, "5.3"));
    let pipe = h.bridge.pipe();

    assert_eq!(pipe.send_h5(&h5("1")).unwrap(), CallOutcome::VersionTooLow);
    let err = pipe.send_http_tracked(&http("2")).err().unwrap();
    assert_eq!(err.code().as_str(), "VERSION_UNSUPPORTED");
    assert_eq!(pipe.state("2"), None);
    assert_eq!(h.host.handoffs(), 0);
}

#[tokio::test(start_paused = true)]
async fn wait_honours_pending_timeout() {
    let cfg = hostbridge_runtime::config::load_from_str(
        "version: 1\nbridge:\n  pending_timeout_ms: 1000\n",
    )
    .unwrap();
    let h = harness_with(cfg, UA_ANDROID_APP);
    let pipe = h.bridge.pipe();

    let handle = pipe.send_h5_tracked(&h5("slow")).unwrap();
    let err = pipe.wait(handle).await.unwrap_err();
    assert_eq!(err.code().as_str(), "TIMEOUT");
    assert_eq!(pipe.state("slow"), None);
}
