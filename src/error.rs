use thiserror::Error;

/// Result type alias for builder and executor operations.
pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),
}

impl DbError {
    /// True when the failure was raised before any SQL reached the driver.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::ConfigError(_) | Self::ParameterError(_))
    }
}
