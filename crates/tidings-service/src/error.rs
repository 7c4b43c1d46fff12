use thiserror::Error;

use tidings_core::error::CoreError;
use tidings_db::error::DbError;

/// Service layer errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(DbError),

    #[error(transparent)]
    CoreError(CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Already registered for event {event_id}")]
    DuplicateRegistration { event_id: uuid::Uuid },

    #[error("Event {event_id} is not open for registration")]
    InvalidBookingTarget { event_id: uuid::Uuid },

    #[error("Transient fetch failure: {0}")]
    TransientFetch(String),

    #[error("Feed session is closed")]
    FeedClosed,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { kind, id } => Self::NotFound(format!("{kind} {id}")),
            DbError::Conflict(message) => Self::Conflict(message),
            DbError::CoreError(core) => core.into(),
            other if other.is_transient() => Self::TransientFetch(other.to_string()),
            other => Self::DatabaseError(other),
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(message) | CoreError::InvalidInput(message) => {
                Self::ValidationError(message)
            }
            CoreError::ConfigError(message) => Self::InvalidConfiguration(message),
            other @ CoreError::InvariantViolation(_) => Self::CoreError(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
