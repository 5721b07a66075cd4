use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::AppError;

/// Credential length accepted for patient usernames and passwords.
pub const CREDENTIAL_LENGTH: usize = 2;

/// A self-registered or staff-registered patient.
///
/// Only the argon2 hash of the password is ever stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub full_name: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    pub full_name: String,
    pub username: String,
    pub password: String,
}

impl CreatePatientRequest {
    pub fn new(full_name: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Full name is required")]
    MissingFullName,

    #[error("Username must be exactly {} characters", CREDENTIAL_LENGTH)]
    InvalidUsernameLength,

    #[error("Password must be exactly {} characters", CREDENTIAL_LENGTH)]
    InvalidPasswordLength,

    #[error("Username {0} is already taken")]
    UsernameTaken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<shared_database::StoreError> for PatientError {
    fn from(e: shared_database::StoreError) -> Self {
        PatientError::DatabaseError(e.to_string())
    }
}

impl From<PatientError> for AppError {
    fn from(e: PatientError) -> Self {
        match e {
            PatientError::NotFound => AppError::NotFound(e.to_string()),
            PatientError::UsernameTaken(_) => AppError::Conflict(e.to_string()),
            PatientError::MissingFullName
            | PatientError::InvalidUsernameLength
            | PatientError::InvalidPasswordLength => AppError::ValidationError(e.to_string()),
            PatientError::PasswordHash(_) => AppError::Internal(e.to_string()),
            PatientError::DatabaseError(_) => AppError::Storage(e.to_string()),
        }
    }
}
