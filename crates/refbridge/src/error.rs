//! Bridge error types
//!
//! The primary bridge API reports type mismatches and failed foreign
//! factories as `None`. These errors back the operations that need to say
//! why: explicit `require` casts, index-based mutation and configuration.

use refbridge_config::ConfigError;
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("Foreign operation '{operation}' failed")]
    ForeignOperationFailure { operation: &'static str },

    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl BridgeError {
    /// Create a type mismatch error
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create a foreign operation failure
    pub fn foreign(operation: &'static str) -> Self {
        Self::ForeignOperationFailure { operation }
    }
}

/// Turn a foreign status flag into a result.
pub(crate) fn check(succeeded: bool, operation: &'static str) -> BridgeResult<()> {
    if succeeded {
        Ok(())
    } else {
        Err(BridgeError::foreign(operation))
    }
}

/// Fail with `IndexOutOfBounds` unless `index < len`.
pub(crate) fn check_index(index: usize, len: usize) -> BridgeResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(BridgeError::IndexOutOfBounds { index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            BridgeError::type_mismatch("Array", "Number").to_string(),
            "Type mismatch: expected Array, found Number"
        );
        assert_eq!(
            BridgeError::foreign("fo_array_append_value").to_string(),
            "Foreign operation 'fo_array_append_value' failed"
        );
        assert_eq!(
            BridgeError::IndexOutOfBounds { index: 3, len: 2 }.to_string(),
            "Index 3 out of bounds for length 2"
        );
    }

    #[test]
    fn test_check_helpers() {
        assert!(check(true, "op").is_ok());
        assert!(matches!(
            check(false, "op"),
            Err(BridgeError::ForeignOperationFailure { operation: "op" })
        ));
        assert!(check_index(0, 1).is_ok());
        assert!(check_index(1, 1).is_err());
    }
}
