use std::sync::Arc;

use chrono::NaiveDate;

use shared_config::{AppConfig, AvailabilityMode};

use crate::clock::FixedClock;
use crate::ids::SequentialIdGenerator;

pub struct TestConfig {
    pub guest_patient_id: String,
    pub occupied_slots: Vec<String>,
    pub availability_mode: AvailabilityMode,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            guest_patient_id: "guest".to_string(),
            occupied_slots: vec!["10:00".to_string(), "14:30".to_string(), "16:00".to_string()],
            availability_mode: AvailabilityMode::Fixed,
        }
    }
}

impl TestConfig {
    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            guest_patient_id: self.guest_patient_id.clone(),
            occupied_slots: self.occupied_slots.clone(),
            availability_mode: self.availability_mode,
            ..AppConfig::default()
        }
    }
}

/// Day the fixtures pretend it is; every booking fixture lies after it.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid fixture date")
}

pub fn test_clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::on_date(test_today()))
}

pub fn test_appointment_ids() -> Arc<SequentialIdGenerator> {
    Arc::new(SequentialIdGenerator::new("apt"))
}

pub struct TestPatient {
    pub full_name: String,
    pub username: String,
    pub password: String,
}

impl Default for TestPatient {
    fn default() -> Self {
        Self::new("Maria Oliveira", "MO", "12")
    }
}

impl TestPatient {
    pub fn new(full_name: &str, username: &str, password: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
