use patient_cell::PatientError;
use shared_models::AppError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter username and password")]
    MissingCredentials,

    #[error("Invalid dentist credentials")]
    InvalidDentistCredentials,

    #[error("Invalid staff credentials")]
    InvalidStaffCredentials,

    #[error("Username and password must be exactly 2 characters")]
    InvalidCredentialFormat,

    #[error("Invalid username or password")]
    InvalidPatientCredentials,

    #[error("Patient lookup failed: {0}")]
    Registry(#[from] PatientError),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Registry(inner) => inner.into(),
            other => AppError::Auth(other.to_string()),
        }
    }
}
