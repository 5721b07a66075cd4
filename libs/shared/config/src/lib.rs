use std::env;
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_GUEST_PATIENT_ID: &str = "guest";
pub const DEFAULT_OCCUPIED_SLOTS: [&str; 3] = ["10:00", "14:30", "16:00"];

/// Where the occupied-slot set for a booking comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityMode {
    /// Only the configured blocklist.
    Fixed,
    /// Only times already booked in the appointment store.
    Store,
    /// Blocklist plus booked times.
    Combined,
}

impl AvailabilityMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fixed" => Some(AvailabilityMode::Fixed),
            "store" => Some(AvailabilityMode::Store),
            "combined" => Some(AvailabilityMode::Combined),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: Option<PathBuf>,
    pub guest_patient_id: String,
    pub occupied_slots: Vec<String>,
    pub availability_mode: AvailabilityMode,
    pub dentist_login: String,
    pub dentist_password: String,
    pub staff_login: String,
    pub staff_password: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            guest_patient_id: DEFAULT_GUEST_PATIENT_ID.to_string(),
            occupied_slots: DEFAULT_OCCUPIED_SLOTS.iter().map(|s| s.to_string()).collect(),
            availability_mode: AvailabilityMode::Combined,
            dentist_login: "01".to_string(),
            dentist_password: "01".to_string(),
            staff_login: "02".to_string(),
            staff_password: "02".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            data_dir: parse_data_dir(env::var("CLINIC_DATA_DIR").ok()),
            guest_patient_id: env::var("CLINIC_GUEST_PATIENT_ID")
                .unwrap_or_else(|_| defaults.guest_patient_id.clone()),
            occupied_slots: env::var("CLINIC_OCCUPIED_SLOTS")
                .map(|raw| parse_slot_list(&raw))
                .unwrap_or_else(|_| defaults.occupied_slots.clone()),
            availability_mode: match env::var("CLINIC_AVAILABILITY_MODE") {
                Ok(raw) => AvailabilityMode::parse(&raw).unwrap_or_else(|| {
                    warn!("Unknown CLINIC_AVAILABILITY_MODE '{}', using combined", raw);
                    AvailabilityMode::Combined
                }),
                Err(_) => defaults.availability_mode,
            },
            dentist_login: env::var("CLINIC_DENTIST_LOGIN")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DENTIST_LOGIN not set, using demo credentials");
                    defaults.dentist_login.clone()
                }),
            dentist_password: env::var("CLINIC_DENTIST_PASSWORD")
                .unwrap_or_else(|_| defaults.dentist_password.clone()),
            staff_login: env::var("CLINIC_STAFF_LOGIN")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_STAFF_LOGIN not set, using demo credentials");
                    defaults.staff_login.clone()
                }),
            staff_password: env::var("CLINIC_STAFF_PASSWORD")
                .unwrap_or_else(|_| defaults.staff_password.clone()),
        };

        if !config.is_persistent() {
            warn!("CLINIC_DATA_DIR not set, appointments will only be kept in memory");
        }

        config
    }

    pub fn is_persistent(&self) -> bool {
        self.data_dir.is_some()
    }
}

/// Blank values count as unset.
pub fn parse_data_dir(raw: Option<String>) -> Option<PathBuf> {
    raw.filter(|dir| !dir.trim().is_empty()).map(PathBuf::from)
}

/// Splits a comma separated list of times, dropping blanks.
pub fn parse_slot_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|slot| !slot.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_demo_clinic() {
        let config = AppConfig::default();
        assert_eq!(config.guest_patient_id, "guest");
        assert_eq!(config.occupied_slots, vec!["10:00", "14:30", "16:00"]);
        assert_eq!(config.availability_mode, AvailabilityMode::Combined);
        assert!(!config.is_persistent());
    }

    #[test]
    fn test_blank_data_dir_is_in_memory() {
        assert_eq!(parse_data_dir(None), None);
        assert_eq!(parse_data_dir(Some("  ".to_string())), None);
        assert_eq!(parse_data_dir(Some("/var/clinic".to_string())), Some(PathBuf::from("/var/clinic")));
    }

    #[test]
    fn test_parse_slot_list_skips_blanks() {
        assert_eq!(parse_slot_list(" 08:00, ,09:30,"), vec!["08:00", "09:30"]);
        assert!(parse_slot_list("").is_empty());
    }

    #[test]
    fn test_availability_mode_parse() {
        assert_eq!(AvailabilityMode::parse("FIXED"), Some(AvailabilityMode::Fixed));
        assert_eq!(AvailabilityMode::parse(" store "), Some(AvailabilityMode::Store));
        assert_eq!(AvailabilityMode::parse("combined"), Some(AvailabilityMode::Combined));
        assert_eq!(AvailabilityMode::parse("random"), None);
    }
}
