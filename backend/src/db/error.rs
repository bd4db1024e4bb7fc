//! Store-level error taxonomy

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors returned by the repositories
#[derive(Debug, Error)]
pub enum DbError {
    /// An update or delete referenced an id that does not exist
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A referential, uniqueness or check constraint refused the write
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Short machine-readable code surfaced to API clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let kind = db_err.kind();
            if matches!(
                kind,
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return Self::ConstraintViolation(db_err.message().to_string());
            }
        }
        Self::Database(err)
    }
}

pub type DbResult<T> = Result<T, DbError>;
