use thiserror::Error;

/// Core error types for record and identifier handling
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid record ID: {0}")]
    InvalidId(String),

    #[error("Invalid record: {message}")]
    InvalidRecord { message: String },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Time formatting error: {0}")]
    TimeFormat(#[from] time::error::Format),
}

impl CoreError {
    /// Create a new InvalidId error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId(id.into())
    }

    /// Create a new InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a new InvalidTimestamp error
    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp(message.into())
    }

    /// Check if this error was caused by caller-supplied data
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidId(_) | Self::InvalidRecord { .. } | Self::InvalidTimestamp(_)
        )
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
