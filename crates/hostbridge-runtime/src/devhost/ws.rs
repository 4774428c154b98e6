//! Host-side WebSocket session.
//!
//! Lifecycle:
//! - attach an outbound queue to the `HostLink`,
//! - pass inbound text frames to the bridge and ack with the return code,
//! - heartbeat ping + idle timeout,
//! - detach on close.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::{debug, info_span, warn, Instrument};

use hostbridge_core::error::Result;

use crate::devhost::DevhostState;

/// Inbound frame writing into content-side local storage.
#[derive(Debug, Deserialize)]
struct StorageWrite {
    channel: String,
    key: String,
    #[serde(default)]
    value: String,
}

fn ack_json(code: i32) -> String {
    json!({ "channel": "ack", "code": code }).to_string()
}

fn stored_json(stored: bool) -> String {
    json!({ "channel": "ack", "stored": stored }).to_string()
}

fn timeout_json() -> String {
    json!({ "channel": "error", "code": "TIMEOUT", "msg": "idle timeout" }).to_string()
}

pub async fn host_upgrade(State(app): State<DevhostState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = run_session(app, socket).await {
            warn!(error = %e, "host session ended with error");
        }
    })
}

/// Reply for one inbound text frame.
fn handle_text(app: &DevhostState, text: &str) -> String {
    if let Ok(write) = serde_json::from_str::<StorageWrite>(text) {
        if write.channel == "storage" {
            return stored_json(app.bridge().write_local_storage(&write.key, &write.value));
        }
    }
    ack_json(app.bridge().on_host_message(text))
}

async fn run_session(app: DevhostState, socket: WebSocket) -> Result<()> {
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(1024);
    let session = app.link().attach(out_tx);

    let (ws_tx, ws_rx) = socket.split();
    let span = info_span!("host_session", session);
    let result = session_loop(&app, ws_tx, ws_rx, &mut out_rx)
        .instrument(span)
        .await;

    app.link().detach(session);
    result
}

async fn session_loop<S, R, E>(
    app: &DevhostState,
    mut ws_tx: S,
    mut ws_rx: R,
    out_rx: &mut mpsc::Receiver<Message>,
) -> Result<()>
where
    S: Sink<Message> + Unpin,
    R: Stream<Item = std::result::Result<Message, E>> + Unpin,
{
    let dh = &app.cfg().devhost;
    let ping_every = Duration::from_millis(dh.ping_interval_ms);
    let idle_timeout = Duration::from_millis(dh.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();
    debug!("host attached");

    loop {
        tokio::select! {
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break; };
                if ws_tx.send(m).await.is_err() {
                    break;
                }
            }

            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };
                last_activity = Instant::now();

                match msg {
                    // Replies go straight to the socket: `out_rx` is only
                    // drained by this loop.
                    Message::Text(text) => {
                        let reply = handle_text(app, &text);
                        if ws_tx.send(Message::Text(reply)).await.is_err() {
                            break;
                        }
                    }
                    Message::Binary(_) => {
                        debug!("binary frame ignored");
                    }
                    Message::Ping(payload) => {
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Message::Pong(_) => {}
                    Message::Close(_) => break,
                }
            }

            _ = ping_tick.tick() => {
                if ws_tx.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }

            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    let _ = ws_tx.send(Message::Text(timeout_json())).await;
                    break;
                }
            }
        }
    }

    debug!("host detached");
    Ok(())
}
