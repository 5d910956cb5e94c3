use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskstreak_domain::shared::{DomainError, ErrorCode, ErrorSeverity};

/// Structured error response for API calls
///
/// This provides rich error information to the dashboard, including:
/// - Error code for programmatic handling
/// - Human-readable message
/// - Severity level for UI presentation
/// - Recoverability flag for retry logic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (2xxx-6xxx range)
    pub code: u16,

    /// Human-readable error message
    pub message: String,

    /// Error severity level
    pub severity: ErrorSeverity,

    /// Whether the operation can be retried
    pub recoverable: bool,
}

impl CommandError {
    fn from_code(error_code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: error_code.code(),
            message: message.into(),
            severity: error_code.severity(),
            recoverable: error_code.is_recoverable(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_code(ErrorCode::ValidationError, message)
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            c if c == ErrorCode::ValidationError.code() => StatusCode::BAD_REQUEST,
            c if c == ErrorCode::TaskNotFound.code() => StatusCode::NOT_FOUND,
            c if c == ErrorCode::StoreUnavailable.code() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self {
            code: err.code().code(),
            message: err.to_string(),
            severity: err.severity(),
            recoverable: err.is_recoverable(),
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(code = self.code, "Request failed: {}", self.message);
        }
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_from_domain_error() {
        let domain_err = DomainError::NotFound("abc".to_string());
        let cmd_err: CommandError = domain_err.into();

        assert_eq!(cmd_err.code, 2001);
        assert_eq!(cmd_err.message, "Task not found: abc");
        assert_eq!(cmd_err.severity, ErrorSeverity::Info);
        assert!(!cmd_err.recoverable);
        assert_eq!(cmd_err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_unavailable_is_retryable_503() {
        let cmd_err: CommandError = DomainError::StoreUnavailable("timeout".to_string()).into();

        assert_eq!(cmd_err.code, 4001);
        assert!(cmd_err.recoverable);
        assert_eq!(cmd_err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_error_is_400() {
        let validation_err = CommandError::validation("Invalid input");
        assert_eq!(validation_err.code, 6001);
        assert!(!validation_err.recoverable);
        assert_eq!(validation_err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_infrastructure_error_is_500() {
        let cmd_err: CommandError = DomainError::Infrastructure("pool closed".to_string()).into();
        assert_eq!(cmd_err.code, 5001);
        assert_eq!(cmd_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_data_integrity_is_internal_error() {
        let cmd_err: CommandError = DomainError::DataIntegrity("bad doc".to_string()).into();
        assert_eq!(cmd_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(cmd_err.severity, ErrorSeverity::Error);
    }
}
