use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use appointment_cell::{AppointmentStore, CollectionAppointmentStore};
use auth_cell::Authenticator;
use catalog_cell::{CatalogProvider, StaticCatalog};
use patient_cell::PatientRegistry;
use shared_config::AppConfig;
use shared_database::{CollectionStore, JsonFileStore, MemoryStore};

/// Everything a command needs, wired once from configuration.
pub struct ClinicContext {
    pub config: AppConfig,
    pub catalog: Arc<dyn CatalogProvider>,
    pub appointments: Arc<dyn AppointmentStore>,
    pub patients: Arc<PatientRegistry>,
    pub authenticator: Authenticator,
}

impl ClinicContext {
    pub fn open(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn CollectionStore> = match &config.data_dir {
            Some(dir) => {
                info!("Using data directory {}", dir.display());
                let store = JsonFileStore::open(dir)
                    .with_context(|| format!("failed to open data directory {}", dir.display()))?;
                Arc::new(store)
            }
            None => Arc::new(MemoryStore::new()),
        };

        let patients = Arc::new(PatientRegistry::new(store.clone()));
        let authenticator = Authenticator::new(&config, patients.clone());

        Ok(Self {
            catalog: Arc::new(StaticCatalog::clinic_default()),
            appointments: Arc::new(CollectionAppointmentStore::new(store)),
            patients,
            authenticator,
            config,
        })
    }
}
