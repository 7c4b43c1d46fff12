use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Database layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: uuid::Uuid },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error(transparent)]
    CoreError(#[from] tidings_core::error::CoreError),
}

impl From<diesel::result::Error> for DbError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            other => Self::DatabaseError(other),
        }
    }
}

impl DbError {
    /// ## Summary
    /// Converts the error of a write whose row references the `kind` row `id`.
    /// A foreign key violation means that row no longer exists.
    #[must_use]
    pub fn referencing(err: diesel::result::Error, kind: &'static str, id: uuid::Uuid) -> Self {
        match err {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Self::NotFound { kind, id }
            }
            other => other.into(),
        }
    }

    /// Whether retrying later may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::PoolError(_)
                | Self::DatabaseError(
                    diesel::result::Error::BrokenTransactionManager
                        | diesel::result::Error::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
                )
        )
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn database_error(kind: DatabaseErrorKind) -> diesel::result::Error {
        diesel::result::Error::DatabaseError(kind, Box::new("constraint failed".to_string()))
    }

    #[test]
    fn test_missing_reference_is_not_found() {
        let event_id = uuid::Uuid::now_v7();
        let err = DbError::referencing(
            database_error(DatabaseErrorKind::ForeignKeyViolation),
            "event",
            event_id,
        );
        assert!(matches!(err, DbError::NotFound { kind: "event", id } if id == event_id));
    }

    #[test]
    fn test_referencing_keeps_other_mappings() {
        let event_id = uuid::Uuid::now_v7();
        assert!(matches!(
            DbError::referencing(database_error(DatabaseErrorKind::UniqueViolation), "event", event_id),
            DbError::Conflict(_)
        ));
        assert!(matches!(
            DbError::referencing(diesel::result::Error::NotFound, "event", event_id),
            DbError::DatabaseError(diesel::result::Error::NotFound)
        ));
    }
}
