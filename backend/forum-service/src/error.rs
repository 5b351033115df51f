/// Error types for Forum Service
///
/// Client-facing failures (400/403/404/429) carry their own message. Server-side
/// failures are logged and replaced with the public message of the operation
/// that failed, so database details never reach API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use chrono::Utc;
use thiserror::Error;

/// Result type for forum-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Message used when a server-side failure must not be exposed
pub const GENERIC_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned to rate-limited callers
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input detected before any data access
    #[error("{0}")]
    BadRequest(String),

    /// Ownership check failed
    #[error("{0}")]
    Forbidden(String),

    /// Post or comment lookup miss
    #[error("{0}")]
    NotFound(String),

    /// Caller exceeded the request window
    #[error("{}", RATE_LIMIT_MESSAGE)]
    TooManyRequests { retry_after_secs: u64 },

    /// Schema validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Server-side failure already reduced to its public message
    #[error("{0}")]
    Failed(&'static str),

    /// Failure raised outside the handlers (body parsing, payload limits)
    #[error("{message}")]
    Fallback { status: StatusCode, message: String },
}

impl AppError {
    /// Build a top-level failure. The underlying detail is only exposed when
    /// `expose_details` is set (development environment).
    pub fn fallback(status: StatusCode, detail: impl Into<String>, expose_details: bool) -> Self {
        let message = if expose_details {
            detail.into()
        } else {
            GENERIC_ERROR_MESSAGE.to_string()
        };
        AppError::Fallback { status, message }
    }

    /// True when the message is meant for the caller as-is
    pub fn is_client_facing(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_)
                | AppError::Forbidden(_)
                | AppError::NotFound(_)
                | AppError::TooManyRequests { .. }
                | AppError::Failed(_)
                | AppError::Fallback { .. }
        )
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Validation(_)
            | AppError::Database(_)
            | AppError::Internal(_)
            | AppError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Fallback { status, .. } => *status,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        match self {
            AppError::TooManyRequests { retry_after_secs } => {
                builder.insert_header(("Retry-After", retry_after_secs.to_string()));
                builder.json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::Fallback { message, .. } => builder.json(serde_json::json!({
                "error": message,
                "timestamp": Utc::now().to_rfc3339(),
            })),
            _ if self.is_client_facing() => {
                builder.json(serde_json::json!({ "error": self.to_string() }))
            }
            _ => builder.json(serde_json::json!({
                "error": GENERIC_ERROR_MESSAGE,
                "timestamp": Utc::now().to_rfc3339(),
            })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Attach an operation's public failure message to a result
pub trait FailureContext<T> {
    /// Server-side errors are logged and replaced with `message`; client-facing
    /// errors pass through unchanged.
    fn failure_context(self, message: &'static str) -> Result<T>;
}

impl<T> FailureContext<T> for Result<T> {
    fn failure_context(self, message: &'static str) -> Result<T> {
        self.map_err(|err| {
            if err.is_client_facing() {
                err
            } else {
                tracing::error!(error = %err, "{}", message);
                AppError::Failed(message)
            }
        })
    }
}
