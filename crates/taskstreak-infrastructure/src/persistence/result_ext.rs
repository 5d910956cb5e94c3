use taskstreak_domain::shared::DomainError;

/// Extension trait for Result types to simplify error handling
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::StoreUnavailable, prefixed with the operation
    /// Usage: `result.to_store_err("Insert task")?`
    fn to_store_err(self, operation: &str) -> Result<T, DomainError>;

    /// Convert error to DomainError::Infrastructure
    fn to_infra_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_store_err(self, operation: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::StoreUnavailable(format!("{} failed: {}", operation, e)))
    }

    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_store_err() {
        let result: Result<i32, &str> = Err("connection reset");
        match result.to_store_err("List tasks") {
            Err(DomainError::StoreUnavailable(msg)) => {
                assert_eq!(msg, "List tasks failed: connection reset")
            }
            _ => panic!("Expected StoreUnavailable error"),
        }
    }

    #[test]
    fn test_to_infra_err() {
        let result: Result<i32, &str> = Err("infra error");
        match result.to_infra_err() {
            Err(DomainError::Infrastructure(msg)) => assert_eq!(msg, "infra error"),
            _ => panic!("Expected Infrastructure error"),
        }
    }
}
