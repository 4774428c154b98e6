//! hostbridge dev host
//!
//! Plays the host side of the bridge for local development:
//! - WebSocket endpoint: /v1/host (channel hand-offs out, host messages in)
//! - POST /v1/call to issue content-side calls
//! - Heartbeat ping + idle timeout
//!
//! Usage: `hostbridge-devhost [config.yaml]` (default `hostbridge.yaml`).

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use hostbridge_runtime::config;
use hostbridge_runtime::devhost::{router, DevhostError, DevhostState};

#[tokio::main]
async fn main() -> Result<(), DevhostError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hostbridge.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg.devhost.listen.parse()?;

    let state = DevhostState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "hostbridge-devhost starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
