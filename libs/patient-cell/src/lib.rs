pub mod models;
pub mod services;

pub use models::*;
pub use services::password::PasswordService;
pub use services::registry::{PatientRegistry, PATIENTS_COLLECTION};
