// libs/appointment-cell/src/services/dashboard.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::debug;

use catalog_cell::DISPLAY_SEPARATOR;
use shared_models::{Role, Session};
use shared_utils::Clock;

use crate::models::{Appointment, AppointmentError};
use crate::services::availability::{DATE_FORMAT, TIME_FORMAT};
use crate::services::store::AppointmentStore;

/// `YYYY-MM-DD` as `DD/MM/YYYY`; anything unparsable comes back unchanged.
pub fn format_display_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Practitioner name without the specialty suffix.
pub fn practitioner_short_name(practitioner_name: &str) -> &str {
    practitioner_name
        .split(DISPLAY_SEPARATOR)
        .next()
        .unwrap_or(practitioner_name)
}

/// Strictly after `now`. Appointments with unreadable date or time never count.
pub fn is_upcoming(appointment: &Appointment, now: NaiveDateTime) -> bool {
    let date = NaiveDate::parse_from_str(&appointment.date, DATE_FORMAT);
    let time = NaiveTime::parse_from_str(&appointment.time, TIME_FORMAT);
    match (date, time) {
        (Ok(date), Ok(time)) => NaiveDateTime::new(date, time) > now,
        _ => false,
    }
}

pub fn upcoming(appointments: &[Appointment], now: NaiveDateTime) -> Vec<&Appointment> {
    appointments.iter().filter(|apt| is_upcoming(apt, now)).collect()
}

pub fn count_upcoming(appointments: &[Appointment], now: NaiveDateTime) -> usize {
    upcoming(appointments, now).len()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOverview {
    pub total: usize,
    pub upcoming: usize,
    pub appointments: Vec<Appointment>,
}

impl ScheduleOverview {
    fn build(appointments: Vec<Appointment>, now: NaiveDateTime) -> Self {
        Self {
            total: appointments.len(),
            upcoming: count_upcoming(&appointments, now),
            appointments,
        }
    }
}

/// Read-side projections for the patient, dentist and staff views.
pub struct DashboardService {
    store: Arc<dyn AppointmentStore>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn AppointmentStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn patient_overview(&self, patient_id: &str) -> Result<ScheduleOverview, AppointmentError> {
        debug!("Building overview for patient {}", patient_id);
        let appointments = self.store.list_by_patient(patient_id)?;
        Ok(ScheduleOverview::build(appointments, self.clock.now().naive_utc()))
    }

    pub fn full_schedule(&self) -> Result<ScheduleOverview, AppointmentError> {
        let appointments = self.store.list_all()?;
        Ok(ScheduleOverview::build(appointments, self.clock.now().naive_utc()))
    }

    /// Patients get their own list, dentists and staff the whole schedule.
    pub fn overview_for(&self, session: &Session) -> Result<ScheduleOverview, AppointmentError> {
        match session.role {
            Role::Patient => self.patient_overview(&session.user_id),
            Role::Dentist | Role::Staff => self.full_schedule(),
        }
    }
}
