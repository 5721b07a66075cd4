use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use patient_cell::{PatientRegistry, CREDENTIAL_LENGTH};
use shared_config::AppConfig;
use shared_models::{Role, Session};

use crate::models::AuthError;

pub const DENTIST_USER_ID: &str = "dentist-01";
pub const STAFF_USER_ID: &str = "employee-01";

/// Maps a login attempt to a typed [`Session`].
///
/// Dentist and staff accounts are single configured credential pairs;
/// patients are looked up in the registry.
pub struct Authenticator {
    dentist: (String, String),
    staff: (String, String),
    patients: Arc<PatientRegistry>,
}

impl Authenticator {
    pub fn new(config: &AppConfig, patients: Arc<PatientRegistry>) -> Self {
        Self {
            dentist: (config.dentist_login.clone(), config.dentist_password.clone()),
            staff: (config.staff_login.clone(), config.staff_password.clone()),
            patients,
        }
    }

    #[instrument(skip(self, password))]
    pub fn authenticate(&self, role: Role, username: &str, password: &str) -> Result<Session, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let session = match role {
            Role::Dentist => {
                if !matches_pair(&self.dentist, username, password) {
                    warn!("Rejected dentist login for {}", username);
                    return Err(AuthError::InvalidDentistCredentials);
                }
                Session::new(Role::Dentist, DENTIST_USER_ID)
            }
            Role::Staff => {
                if !matches_pair(&self.staff, username, password) {
                    warn!("Rejected staff login for {}", username);
                    return Err(AuthError::InvalidStaffCredentials);
                }
                Session::new(Role::Staff, STAFF_USER_ID)
            }
            Role::Patient => {
                if username.chars().count() != CREDENTIAL_LENGTH || password.chars().count() != CREDENTIAL_LENGTH {
                    return Err(AuthError::InvalidCredentialFormat);
                }
                let patient = self
                    .patients
                    .verify_credentials(username, password)?
                    .ok_or_else(|| {
                        debug!("Patient credentials did not match for {}", username);
                        AuthError::InvalidPatientCredentials
                    })?;
                Session::new(Role::Patient, patient.id)
            }
        };

        info!("Signed in {} as {}", session.user_id, session.role);
        Ok(session)
    }
}

fn matches_pair(expected: &(String, String), username: &str, password: &str) -> bool {
    expected.0 == username && expected.1 == password
}
