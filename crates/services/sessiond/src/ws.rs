//! WebSocket entry point.
//!
//! The handshake is an ordinary HTTP request, so the session resolver has
//! already run by the time [`ws_handler`] sees it. The socket greets the
//! client with the identity it was opened under and then echoes text frames.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use session_web::ctx::Ctx;
use tracing::{debug, warn};

/// First frame sent on every socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WsHello {
    /// `None` for anonymous sockets.
    pub user_id: Option<String>,
}

/// The handler for the HTTP request starting the websocket negotiation.
pub async fn ws_handler(ws: WebSocketUpgrade, ctx: Option<Ctx>) -> impl IntoResponse {
    let hello = WsHello {
        user_id: ctx.map(|ctx| ctx.identity.user_id),
    };
    ws.on_upgrade(move |socket| handle_socket(socket, hello))
}

async fn handle_socket(mut socket: WebSocket, hello: WsHello) {
    let payload = match serde_json::to_string(&hello) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("Failed to serialize websocket greeting: {err}");
            return;
        }
    };
    if let Err(err) = socket.send(Message::Text(payload.into())).await {
        warn!("Failed to greet websocket client: {err}");
        return;
    }

    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Text(text)) => {
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Binary(_) | Message::Ping(_) | Message::Pong(_)) => {}
            Err(err) => {
                debug!("Websocket receive failed: {err}");
                break;
            }
        }
    }
    debug!(user_id = ?hello.user_id, "Websocket context destroyed");
}
