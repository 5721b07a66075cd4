pub mod models;
pub mod services;

pub use models::*;
pub use services::availability::{
    is_available, normalize_time, parse_booking_date, OccupancyPolicy, OccupiedSlots,
};
pub use services::dashboard::{DashboardService, ScheduleOverview};
pub use services::lifecycle::WizardLifecycleService;
pub use services::store::{
    AppointmentStore, CollectionAppointmentStore, InMemoryAppointmentStore, APPOINTMENTS_COLLECTION,
};
pub use services::wizard::BookingWizard;
