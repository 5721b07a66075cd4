use thiserror::Error;

/// Umbrella error for anything that crosses a cell boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Process exit code used by the command line driver.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::ValidationError(_) => 2,
            AppError::Conflict(_) => 3,
            AppError::NotFound(_) => 4,
            AppError::Auth(_) => 5,
            AppError::Storage(_) => 10,
            AppError::Internal(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_for_user_errors() {
        let codes = [
            AppError::ValidationError("x".into()).exit_code(),
            AppError::Conflict("x".into()).exit_code(),
            AppError::NotFound("x".into()).exit_code(),
            AppError::Auth("x".into()).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
