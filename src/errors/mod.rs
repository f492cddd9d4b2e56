use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use sea_orm::{DbErr, TransactionError};
use thiserror::Error;

/// Error taxonomy for the API.
///
/// Every error renders as `{"success": false, "status": <code>, "message": <text>}`.
/// Database errors never leak their cause to the client; it is logged instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    /// The operation is not permitted in the entity's current lifecycle state.
    #[error("{0}")]
    InvalidState(String),
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unwrap a transaction error back into the domain error that aborted it.
impl From<TransactionError<ApiError>> for ApiError {
    fn from(e: TransactionError<ApiError>) -> Self {
        match e {
            TransactionError::Connection(db) => ApiError::Database(db),
            TransactionError::Transaction(api) => api,
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let message = match self {
            ApiError::Database(e) => {
                tracing::error!("database error: {e}");
                "Something went wrong!".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "status": status.as_u16(),
            "message": message,
        }))
    }
}
