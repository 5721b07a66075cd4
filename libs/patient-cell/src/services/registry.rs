use std::sync::{Arc, Mutex};

use tracing::{debug, info, instrument, warn};

use shared_database::{CollectionStore, CollectionStoreExt};
use shared_utils::{Clock, IdGenerator, SystemClock, TimestampIdGenerator};

use crate::models::{CreatePatientRequest, Patient, PatientError, CREDENTIAL_LENGTH};
use crate::services::password::PasswordService;

pub const PATIENTS_COLLECTION: &str = "patients";

pub struct PatientRegistry {
    store: Arc<dyn CollectionStore>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    // Serializes the uniqueness check with the append
    register_lock: Mutex<()>,
}

impl PatientRegistry {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self {
            store,
            ids: Arc::new(TimestampIdGenerator::patients()),
            clock: Arc::new(SystemClock),
            register_lock: Mutex::new(()),
        }
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub fn register(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let full_name = request.full_name.trim();
        if full_name.is_empty() {
            return Err(PatientError::MissingFullName);
        }
        if request.username.chars().count() != CREDENTIAL_LENGTH {
            return Err(PatientError::InvalidUsernameLength);
        }
        if request.password.chars().count() != CREDENTIAL_LENGTH {
            return Err(PatientError::InvalidPasswordLength);
        }

        let _guard = self
            .register_lock
            .lock()
            .map_err(|_| PatientError::DatabaseError("patient registry lock poisoned".to_string()))?;

        if self.find_by_username(&request.username)?.is_some() {
            warn!("Registration rejected, username {} already exists", request.username);
            return Err(PatientError::UsernameTaken(request.username));
        }

        let password_hash = PasswordService::hash_password(&request.password)
            .map_err(|e| PatientError::PasswordHash(e.to_string()))?;

        let patient = Patient {
            id: self.ids.next_id(),
            full_name: full_name.to_string(),
            username: request.username,
            password_hash,
            created_at: self.clock.now(),
        };

        self.store.append_typed(PATIENTS_COLLECTION, &patient)?;
        info!("Registered patient {} ({})", patient.id, patient.full_name);
        Ok(patient)
    }

    /// The patient owning these credentials, or `None` on any mismatch.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<Patient>, PatientError> {
        let Some(patient) = self.find_by_username(username)? else {
            debug!("No patient with username {}", username);
            return Ok(None);
        };

        match PasswordService::verify_password(password, &patient.password_hash) {
            Ok(true) => Ok(Some(patient)),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!("Stored password hash for {} is unreadable: {}", patient.id, e);
                Ok(None)
            }
        }
    }

    pub fn get(&self, patient_id: &str) -> Result<Patient, PatientError> {
        self.list()?
            .into_iter()
            .find(|p| p.id == patient_id)
            .ok_or(PatientError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<Patient>, PatientError> {
        Ok(self.store.load_all(PATIENTS_COLLECTION)?)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Patient>, PatientError> {
        Ok(self.list()?.into_iter().find(|p| p.username == username))
    }
}
