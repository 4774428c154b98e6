use axum::{
    routing::{get, post},
    Router,
};

use crate::devhost::{ops, ws, DevhostState};

pub fn build_router(state: DevhostState) -> Router {
    Router::new()
        .route("/v1/host", get(ws::host_upgrade))
        .route("/v1/call", post(ops::call))
        .route("/healthz", get(ops::healthz))
        .route("/state", get(ops::state))
        .with_state(state)
}
