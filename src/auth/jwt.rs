use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the HS256 JWTs the auth collaborator issues.
///
/// The `sub` field is the user's UUID. Everything this service knows about
/// the caller comes from here; it never resolves credentials itself.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    /// User's email.
    pub email: Option<String>,
    /// User's public handle, if one was chosen.
    pub username: Option<String>,
}

impl Claims {
    /// Parse the `sub` claim as a UUID.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid user id in token: {e}"))
    }

    pub fn user_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

/// Decode and validate a token against the shared HS256 secret.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{:?}", e.kind()))
}
