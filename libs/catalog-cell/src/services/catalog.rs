// libs/catalog-cell/src/services/catalog.rs
use tracing::debug;

use crate::models::{Practitioner, Procedure};

/// Practitioners and procedures offered for booking.
///
/// Implementations are read-only; list order is only meaningful for display.
pub trait CatalogProvider: Send + Sync {
    fn list_procedures(&self) -> Vec<Procedure>;

    fn list_practitioners(&self) -> Vec<Practitioner>;

    fn find_procedure(&self, id: &str) -> Option<Procedure> {
        debug!("Looking up procedure {}", id);
        self.list_procedures().into_iter().find(|p| p.id == id)
    }

    fn find_practitioner(&self, id: &str) -> Option<Practitioner> {
        debug!("Looking up practitioner {}", id);
        self.list_practitioners().into_iter().find(|p| p.id == id)
    }
}

/// Catalog fixed at construction time.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    practitioners: Vec<Practitioner>,
    procedures: Vec<Procedure>,
}

impl StaticCatalog {
    pub fn new(practitioners: Vec<Practitioner>, procedures: Vec<Procedure>) -> Self {
        Self {
            practitioners,
            procedures,
        }
    }

    /// The clinic's own dentists and treatments.
    pub fn clinic_default() -> Self {
        Self::new(
            vec![
                Practitioner::new("1", "Dr. Carlos Silva", "Clínico Geral"),
                Practitioner::new("2", "Dra. Ana Santos", "Ortodontia"),
                Practitioner::new("3", "Dr. Paulo Mendes", "Implantodontia"),
            ],
            vec![
                Procedure::new("1", "Consulta de Avaliação"),
                Procedure::new("2", "Limpeza Dental"),
                Procedure::new("3", "Tratamento de Canal"),
                Procedure::new("4", "Clareamento Dental"),
                Procedure::new("5", "Implante Dentário"),
            ],
        )
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::clinic_default()
    }
}

impl CatalogProvider for StaticCatalog {
    fn list_procedures(&self) -> Vec<Procedure> {
        self.procedures.clone()
    }

    fn list_practitioners(&self) -> Vec<Practitioner> {
        self.practitioners.clone()
    }
}
