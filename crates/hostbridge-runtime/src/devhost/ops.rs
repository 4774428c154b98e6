//! HTTP endpoints of the dev host.
//!
//! - `/healthz`  : liveness
//! - `/state`    : platform snapshot, attached sessions, local storage
//! - `/v1/call`  : issue a content-side call

use std::collections::BTreeMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use hostbridge_core::platform::PlatformState;

use crate::capabilities::catalog;
use crate::devhost::DevhostState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[derive(Debug, Serialize)]
pub struct StateView {
    pub platform: PlatformState,
    pub handshake_done: bool,
    pub test_build: bool,
    pub host_sessions: usize,
    pub local_storage: BTreeMap<String, String>,
}

pub async fn state(State(app): State<DevhostState>) -> Json<StateView> {
    let platform = app.bridge().platform();
    Json(StateView {
        platform: platform.state(),
        handshake_done: platform.handshake_done(),
        test_build: platform.is_test_build(),
        host_sessions: app.link().session_count(),
        local_storage: app.link().storage_snapshot(),
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallRequest {
    pub service: String,
    pub action: String,
    #[serde(default)]
    pub params: Option<Map<String, Value>>,
    /// Defaults to the catalogued tag, or empty for unknown operations.
    #[serde(default)]
    pub tag: Option<String>,
}

/// Catalogued operations go through their version gate; anything else is
/// sent raw.
pub async fn call(State(app): State<DevhostState>, Json(req): Json<CallRequest>) -> Response {
    let bridge = app.bridge();
    let catalogued = catalog::lookup(&req.service, &req.action)
        .filter(|cap| req.tag.as_deref().map_or(true, |t| t == cap.tag));

    let result = match catalogued {
        Some(cap) => bridge.call(cap, req.params),
        None => bridge.call_parts(
            &req.service,
            &req.action,
            req.params,
            req.tag.as_deref().unwrap_or_default(),
        ),
    };

    match result {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "code": e.code().as_str(), "msg": e.to_string() })),
        )
            .into_response(),
    }
}
