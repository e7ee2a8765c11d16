//! Error kinds crossing the datasource boundary.

use std::fmt;

use datasource_core::CoreError;

/// Errors that can occur during datasource operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasourceError {
    /// The operation has no concrete implementation bound.
    #[error("Not implemented: {operation}")]
    Unimplemented {
        /// The operation or backend that is missing.
        operation: String,
    },

    /// No live record matches the identifier.
    #[error("Record not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The supplied record data is malformed.
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of why the record is invalid.
        message: String,
    },

    /// The datasource could not be built from its configuration.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// An internal backend error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl DatasourceError {
    /// Creates a new `Unimplemented` error.
    #[must_use]
    pub fn unimplemented(operation: impl Into<String>) -> Self {
        Self::Unimplemented {
            operation: operation.into(),
        }
    }

    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a new `InvalidRecord` error.
    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is an unimplemented error.
    #[must_use]
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }

    /// Returns `true` if this is an invalid record error.
    #[must_use]
    pub fn is_invalid_record(&self) -> bool {
        matches!(self, Self::InvalidRecord { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Unimplemented { .. } => ErrorCategory::Binding,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::InvalidRecord { .. } => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Binding,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

impl From<CoreError> for DatasourceError {
    fn from(err: CoreError) -> Self {
        if err.is_validation_error() {
            Self::invalid_record(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

/// Categories of datasource errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Record not found.
    NotFound,
    /// Validation error.
    Validation,
    /// Missing or misconfigured backend.
    Binding,
    /// Internal error.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation"),
            Self::Binding => write!(f, "binding"),
            Self::Internal => write!(f, "internal"),
        }
    }
}
