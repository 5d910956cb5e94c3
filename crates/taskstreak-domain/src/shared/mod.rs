use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod clock;
pub use clock::{Clock, FixedClock, SystemClock};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn from_string(s: &str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

define_id!(TaskId);

/// Error codes for structured error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Resource Not Found (2xxx)
    TaskNotFound = 2001,

    // Data & Persistence (4xxx)
    StoreUnavailable = 4001,
    DataIntegrityError = 4003,
    SerializationError = 4004,

    // Infrastructure (5xxx)
    InfrastructureError = 5001,

    // Validation (6xxx)
    ValidationError = 6001,
}

impl ErrorCode {
    /// Get error code as integer
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::TaskNotFound | ErrorCode::ValidationError => ErrorSeverity::Info,

            ErrorCode::StoreUnavailable => ErrorSeverity::Warning,

            ErrorCode::DataIntegrityError
            | ErrorCode::SerializationError
            | ErrorCode::InfrastructureError => ErrorSeverity::Error,
        }
    }

    /// Check if error is recoverable by retrying the same action
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorCode::StoreUnavailable)
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl DomainError {
    /// Get error code
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation(_) => ErrorCode::ValidationError,
            DomainError::NotFound(_) => ErrorCode::TaskNotFound,
            DomainError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            DomainError::DataIntegrity(_) => ErrorCode::DataIntegrityError,
            DomainError::Infrastructure(_) => ErrorCode::InfrastructureError,
            DomainError::Deserialization(_) => ErrorCode::SerializationError,
        }
    }

    /// Get error severity
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        self.code().is_recoverable()
    }
}
