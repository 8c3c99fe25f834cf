//! Live projection stream
//!
//! One `LiveView` per connected client. The loop pushes a fresh
//! projection on every store change and honours `set_view_date`
//! messages by reprojecting immediately.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use engine::{LiveView, Projection, VoterId};
use tracing::{debug, warn};

use crate::state::AppState;
use crate::types::{ClientMessage, ServerMessage, ViewerQuery};

pub async fn live_view(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<ViewerQuery>,
) -> Response {
    ws.on_upgrade(move |socket| client_loop(socket, state, query))
}

async fn client_loop(mut socket: WebSocket, state: AppState, query: ViewerQuery) {
    let viewer = VoterId::new(query.user.trim());
    let view_date = query
        .date
        .unwrap_or_else(|| state.clock.now().date_naive());
    let mut live = LiveView::new(
        viewer.clone(),
        view_date,
        state.voting.watch_items(),
        state.clock.clone(),
    );
    debug!(viewer = %viewer, %view_date, "live view client connected");

    if send_projection(&mut socket, live.snapshot()).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            projection = live.changed() => match projection {
                Some(projection) => {
                    if send_projection(&mut socket, projection).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            message = socket.recv() => match message {
                Some(Ok(Message::Text(text))) => match serde_json::from_str(&text) {
                    Ok(ClientMessage::SetViewDate { date }) => {
                        live.set_view_date(date);
                        if send_projection(&mut socket, live.snapshot()).await.is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(viewer = %viewer, error = %err, "ignoring malformed client message");
                    }
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!(viewer = %viewer, error = %err, "socket read failed");
                    break;
                }
            },
        }
    }

    debug!(viewer = %viewer, "live view client disconnected");
}

async fn send_projection(socket: &mut WebSocket, projection: Projection) -> Result<(), axum::Error> {
    let payload = match serde_json::to_string(&ServerMessage::Projection { projection }) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, "projection failed to serialize");
            return Ok(());
        }
    };
    socket.send(Message::Text(payload)).await
}
