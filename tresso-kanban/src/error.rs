//! Error types for the board engine

use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, TressoError>;

/// The three user-facing error families.
///
/// Absent and not-owned records deliberately collapse into one kind so a
/// caller cannot discover other users' ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFoundOrForbidden,
    Unexpected,
}

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum TressoError {
    /// Missing required field
    #[error("missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Record does not exist or belongs to another user
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// SQLite error
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else that should never happen
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl TressoError {
    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error for any resource
    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingField { .. } | Self::InvalidValue { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFoundOrForbidden,
            Self::Storage(_) | Self::Json(_) | Self::Io(_) | Self::Unexpected { .. } => {
                ErrorKind::Unexpected
            }
        }
    }

    /// Text that is safe to show to the user.
    ///
    /// Validation errors keep their detail since they only echo the caller's
    /// own input. Everything else is generic; the detail goes to the logs.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Validation => self.to_string(),
            ErrorKind::NotFoundOrForbidden => {
                "The requested item was not found or you do not have access to it".to_string()
            }
            ErrorKind::Unexpected => "An unexpected error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TressoError::not_found("card", 12);
        assert_eq!(err.to_string(), "card not found: 12");
        assert_eq!(err.kind(), ErrorKind::NotFoundOrForbidden);
    }

    #[test]
    fn test_validation_kind() {
        assert_eq!(
            TressoError::missing_field("title").kind(),
            ErrorKind::Validation
        );
        let err = TressoError::invalid_value("order", "must be finite");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.user_message(),
            "invalid value for order: must be finite"
        );
    }

    #[test]
    fn test_user_message_hides_internals() {
        let err = TressoError::unexpected("connection pool poisoned");
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert!(!err.user_message().contains("poisoned"));

        let err = TressoError::not_found("board", 99);
        assert!(!err.user_message().contains("99"));
    }
}
