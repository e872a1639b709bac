use lesson_algo::{EvaluationError, OptionsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("malformed data: {0}")]
    MalformedData(String),
    #[error("concurrent update conflict: {0}")]
    ConcurrencyConflict(String),
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MalformedData(_) => "MALFORMED_DATA",
            Self::ConcurrencyConflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Safe to retry from the caller's side
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict(_) | Self::Store(_))
    }
}

impl From<EvaluationError> for EngineError {
    fn from(err: EvaluationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<OptionsError> for EngineError {
    fn from(err: OptionsError) -> Self {
        Self::MalformedData(err.to_string())
    }
}

/// Serialization failures, deadlocks and busy/locked databases
pub fn is_write_conflict(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_err) = err else {
        return false;
    };

    match db_err.code().as_deref() {
        // PostgreSQL: serialization_failure, deadlock_detected
        Some("40001") | Some("40P01") => true,
        // SQLite: SQLITE_BUSY, SQLITE_LOCKED and their extended codes
        Some("5") | Some("6") | Some("261") | Some("262") | Some("517") => true,
        _ => db_err.message().contains("database is locked"),
    }
}

/// Progress row pointing at a lesson or exercise that does not exist
pub fn is_missing_reference(err: &sqlx::Error) -> bool {
    let sqlx::Error::Database(db_err) = err else {
        return false;
    };

    db_err.is_foreign_key_violation()
}
