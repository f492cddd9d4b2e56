use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::auth::jwt;
use crate::auth::middleware::JwtSecret;
use crate::notifications::hub::NotificationHub;
use crate::notifications::protocol::Notification;

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    pub token: String,
}

/// GET /api/notifications/ws?token=<jwt>
///
/// Upgrades the HTTP connection to a WebSocket subscribed to the caller's
/// notification channel. Authenticates via query param token (browsers can't
/// send Authorization headers during the WebSocket handshake).
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
    secret: web::Data<JwtSecret>,
    hub: web::Data<Arc<NotificationHub>>,
) -> Result<HttpResponse, actix_web::Error> {
    // 1. Validate the JWT.
    let claims = jwt::validate_token(&query.token, &secret.0)
        .map_err(|e| actix_web::error::ErrorUnauthorized(format!("Invalid token: {e}")))?;

    let user_id = claims
        .user_id()
        .map_err(actix_web::error::ErrorUnauthorized)?;

    // 2. Upgrade to WebSocket.
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    // 3. Subscribe to the caller's channel and drive the session.
    let rx = hub.subscribe(user_id).await;
    let hub = hub.get_ref().clone();

    actix_web::rt::spawn(handle_ws_session(session, msg_stream, rx, user_id, hub));

    Ok(response)
}

/// Drives the notification socket: forwards hub events to the client,
/// answers pings, and cleans up on disconnect. The socket is push-only;
/// client text frames are ignored.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<Notification>,
    user_id: Uuid,
    hub: Arc<NotificationHub>,
) {
    loop {
        tokio::select! {
            // Control frames from the client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Event from the hub to this client.
            Some(event) = rx.recv() => {
                let json = match serde_json::to_string(&event) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    // Release our receiver first so unsubscribe sees this connection as
    // closed and leaves the user's other tabs alone.
    drop(rx);
    hub.unsubscribe(user_id).await;
    let _ = session.close(None).await;
}
