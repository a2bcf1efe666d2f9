use thiserror::Error;

/// Errors returned by the registry, the ledger and the date utilities.
#[derive(Error, Debug)]
pub enum DutyError {
    /// Malformed or impossible date (or month key)
    #[error("invalid date format: {0:?}")]
    InvalidDateFormat(String),

    /// Reference to a staff member or duty that does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Input rejected before reaching the store
    #[error("validation error: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DutyError {
    pub fn staff_not_found(id: i64) -> Self {
        DutyError::NotFound { entity: "staff", id }
    }

    pub fn duty_not_found(id: i64) -> Self {
        DutyError::NotFound { entity: "duty", id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DutyError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DutyError>;
