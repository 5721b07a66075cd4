use std::sync::Arc;

use assert_matches::assert_matches;

use auth_cell::{AuthError, Authenticator, DENTIST_USER_ID, STAFF_USER_ID};
use patient_cell::{CreatePatientRequest, PatientRegistry};
use shared_config::AppConfig;
use shared_database::MemoryStore;
use shared_models::{AppError, Role, Session};
use shared_utils::test_utils::{TestConfig, TestPatient};

fn authenticator_with(config: &AppConfig) -> (Authenticator, String) {
    let registry = Arc::new(PatientRegistry::new(Arc::new(MemoryStore::new())));
    let patient = TestPatient::default();
    let registered = registry
        .register(CreatePatientRequest::new(&patient.full_name, &patient.username, &patient.password))
        .unwrap();
    (Authenticator::new(config, registry), registered.id)
}

fn authenticator() -> (Authenticator, String) {
    authenticator_with(&TestConfig::default().to_app_config())
}

#[test]
fn test_dentist_and_staff_sessions() {
    let (auth, _) = authenticator();

    assert_eq!(
        auth.authenticate(Role::Dentist, "01", "01"),
        Ok(Session::new(Role::Dentist, DENTIST_USER_ID))
    );
    assert_eq!(
        auth.authenticate(Role::Staff, "02", "02"),
        Ok(Session::new(Role::Staff, STAFF_USER_ID))
    );
}

#[test]
fn test_role_credentials_are_not_interchangeable() {
    let (auth, _) = authenticator();

    assert_eq!(
        auth.authenticate(Role::Dentist, "02", "02"),
        Err(AuthError::InvalidDentistCredentials)
    );
    assert_eq!(
        auth.authenticate(Role::Staff, "01", "01"),
        Err(AuthError::InvalidStaffCredentials)
    );
    // Fixed accounts are not patients
    assert_eq!(
        auth.authenticate(Role::Patient, "01", "01"),
        Err(AuthError::InvalidPatientCredentials)
    );
}

#[test]
fn test_patient_login_uses_registry() {
    let (auth, patient_id) = authenticator();

    let session = auth.authenticate(Role::Patient, "MO", "12").unwrap();
    assert_eq!(session.patient_id(), Some(patient_id.as_str()));

    assert_eq!(
        auth.authenticate(Role::Patient, "MO", "21"),
        Err(AuthError::InvalidPatientCredentials)
    );
    assert_eq!(
        auth.authenticate(Role::Patient, "MOO", "12"),
        Err(AuthError::InvalidCredentialFormat)
    );
}

#[test]
fn test_empty_credentials() {
    let (auth, _) = authenticator();
    for role in [Role::Patient, Role::Dentist, Role::Staff] {
        assert_eq!(auth.authenticate(role, "", "01"), Err(AuthError::MissingCredentials));
        assert_eq!(auth.authenticate(role, "01", ""), Err(AuthError::MissingCredentials));
    }
}

#[test]
fn test_configured_credentials_override_defaults() {
    let config = AppConfig {
        dentist_login: "dr".to_string(),
        dentist_password: "s3cret".to_string(),
        ..TestConfig::default().to_app_config()
    };
    let (auth, _) = authenticator_with(&config);

    assert!(auth.authenticate(Role::Dentist, "dr", "s3cret").is_ok());
    assert_matches!(
        auth.authenticate(Role::Dentist, "01", "01"),
        Err(AuthError::InvalidDentistCredentials)
    );
}

#[test]
fn test_auth_errors_map_to_app_auth_error() {
    let err: AppError = AuthError::InvalidStaffCredentials.into();
    assert_matches!(err, AppError::Auth(_));
    assert_eq!(err.exit_code(), 5);
}
