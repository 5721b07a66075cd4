// libs/appointment-cell/src/services/store.rs
use std::sync::{Arc, RwLock};

use tracing::{debug, info, instrument};

use shared_database::{CollectionStore, CollectionStoreExt};

use crate::models::{Appointment, AppointmentError};

pub const APPOINTMENTS_COLLECTION: &str = "appointments";

/// The shared list of committed appointments every dashboard reads from.
///
/// Appends are never re-validated here: id uniqueness is the id generator's job.
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentStore: Send + Sync {
    fn append(&self, appointment: Appointment) -> Result<(), AppointmentError>;

    /// Every appointment in insertion order.
    fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError>;

    /// Order-preserving subsequence of [`list_all`](Self::list_all) for one patient.
    fn list_by_patient(&self, patient_id: &str) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|apt| apt.patient_id == patient_id)
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAppointmentStore {
    appointments: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.appointments.read().map(|a| a.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn append(&self, appointment: Appointment) -> Result<(), AppointmentError> {
        let mut appointments = self
            .appointments
            .write()
            .map_err(|_| AppointmentError::Storage("appointment list lock poisoned".to_string()))?;
        debug!("Appending appointment {} in memory", appointment.id);
        appointments.push(appointment);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        self.appointments
            .read()
            .map(|a| a.clone())
            .map_err(|_| AppointmentError::Storage("appointment list lock poisoned".to_string()))
    }
}

/// Appointments kept in the `appointments` collection of a [`CollectionStore`].
pub struct CollectionAppointmentStore {
    store: Arc<dyn CollectionStore>,
}

impl CollectionAppointmentStore {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }
}

impl AppointmentStore for CollectionAppointmentStore {
    #[instrument(skip(self, appointment), fields(appointment_id = %appointment.id))]
    fn append(&self, appointment: Appointment) -> Result<(), AppointmentError> {
        self.store.append_typed(APPOINTMENTS_COLLECTION, &appointment)?;
        info!("Stored appointment {} for patient {}", appointment.id, appointment.patient_id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Appointment>, AppointmentError> {
        Ok(self.store.load_all(APPOINTMENTS_COLLECTION)?)
    }
}
