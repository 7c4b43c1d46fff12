use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde::Serialize;
use thiserror::Error;

use tidings_core::error::CoreError;
use tidings_db::error::DbError;
use tidings_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        Self::ServiceError(err.into())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self::ServiceError(err.into())
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable kind.
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    /// Status code and payload sent for this error.
    #[must_use]
    pub fn response_parts(&self) -> (StatusCode, ErrorResponse) {
        let (status, error, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message.clone()),
            Self::ServiceError(err) => match err {
                ServiceError::ValidationError(message) => {
                    (StatusCode::BAD_REQUEST, "validation_error", message.clone())
                }
                ServiceError::NotAuthenticated => (
                    StatusCode::UNAUTHORIZED,
                    "not_authenticated",
                    "Authentication required".to_string(),
                ),
                ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", err.to_string()),
                ServiceError::DuplicateRegistration { .. } => (
                    StatusCode::CONFLICT,
                    "duplicate_registration",
                    "You have already registered for this event".to_string(),
                ),
                ServiceError::Conflict(_) => (StatusCode::CONFLICT, "conflict", err.to_string()),
                ServiceError::InvalidBookingTarget { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_booking_target",
                    "This event is not open for registration".to_string(),
                ),
                ServiceError::TransientFetch(_) | ServiceError::FeedClosed => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "unavailable",
                    "Service temporarily unavailable".to_string(),
                ),
                ServiceError::DatabaseError(_)
                | ServiceError::CoreError(_)
                | ServiceError::InvalidConfiguration(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                ),
            },
        };
        (status, ErrorResponse { error, message })
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        let (status, body) = self.response_parts();
        if status.is_server_error() {
            tracing::error!(error = %self, path = %req.uri().path(), "Request failed");
        } else {
            tracing::debug!(error = %self, path = %req.uri().path(), "Request rejected");
        }
        res.status_code(status);
        res.render(Json(body));
    }
}
