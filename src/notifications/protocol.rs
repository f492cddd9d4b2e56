use serde::Serialize;
use uuid::Uuid;

/// Events pushed to a user's notification socket.
///
/// Serialized with an upper-case `type` tag, e.g.
/// `{"type":"HIRED","message":"...","gig_id":"..."}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    /// The recipient's bid was hired.
    Hired { message: String, gig_id: Uuid },
}
