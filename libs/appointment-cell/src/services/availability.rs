// libs/appointment-cell/src/services/availability.rs
use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use shared_config::{AppConfig, AvailabilityMode, DEFAULT_OCCUPIED_SLOTS};

use crate::models::{AppointmentError, BookingValidationError};
use crate::services::store::AppointmentStore;

/// Canonical `HH:MM` strings that cannot be booked.
pub type OccupiedSlots = BTreeSet<String>;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// Whether `time` is free given the occupied set for `date`.
///
/// Pure exact-string membership; callers normalize with [`normalize_time`]
/// first. The date is part of the contract because `occupied` is always
/// computed for one day.
pub fn is_available(_date: NaiveDate, time: &str, occupied: &OccupiedSlots) -> bool {
    !occupied.contains(time)
}

/// Accepts `H:MM`, `HH:MM` or `HH:MM:SS` (24-hour) and returns zero-padded `HH:MM`.
pub fn normalize_time(raw: &str) -> Result<String, BookingValidationError> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, TIME_FORMAT))
        .map(|t| t.format(TIME_FORMAT).to_string())
        .map_err(|_| BookingValidationError::MalformedTime(raw.to_string()))
}

pub fn parse_booking_date(raw: &str) -> Result<NaiveDate, BookingValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| BookingValidationError::MalformedDate(raw.to_string()))
}

/// How the occupied set for a date is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccupancyPolicy {
    /// A static blocklist, identical for every date and practitioner.
    Fixed(OccupiedSlots),
    /// Times already booked with the same practitioner on the same date.
    FromStore,
    /// Blocklist plus booked times.
    Combined(OccupiedSlots),
}

impl Default for OccupancyPolicy {
    fn default() -> Self {
        OccupancyPolicy::Combined(demo_blocklist())
    }
}

pub fn demo_blocklist() -> OccupiedSlots {
    DEFAULT_OCCUPIED_SLOTS.iter().map(|s| s.to_string()).collect()
}

impl OccupancyPolicy {
    pub fn fixed<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        OccupancyPolicy::Fixed(normalize_slots(slots))
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let blocklist = normalize_slots(&config.occupied_slots);
        match config.availability_mode {
            AvailabilityMode::Fixed => OccupancyPolicy::Fixed(blocklist),
            AvailabilityMode::Store => OccupancyPolicy::FromStore,
            AvailabilityMode::Combined => OccupancyPolicy::Combined(blocklist),
        }
    }

    /// Occupied set for one practitioner on one date, recomputed on every call.
    pub fn occupied_slots(
        &self,
        store: &dyn AppointmentStore,
        date: &str,
        practitioner_name: &str,
    ) -> Result<OccupiedSlots, AppointmentError> {
        let mut occupied = match self {
            OccupancyPolicy::Fixed(slots) | OccupancyPolicy::Combined(slots) => slots.clone(),
            OccupancyPolicy::FromStore => OccupiedSlots::new(),
        };

        if matches!(self, OccupancyPolicy::FromStore | OccupancyPolicy::Combined(_)) {
            let booked = store
                .list_all()?
                .into_iter()
                .filter(|apt| apt.date == date && apt.practitioner_name == practitioner_name)
                .map(|apt| normalize_time(&apt.time).unwrap_or(apt.time));
            occupied.extend(booked);
        }

        debug!(
            "Occupied slots for {} on {}: {:?}",
            practitioner_name, date, occupied
        );
        Ok(occupied)
    }
}

fn normalize_slots<I, S>(slots: I) -> OccupiedSlots
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    slots
        .into_iter()
        .filter_map(|slot| match normalize_time(slot.as_ref()) {
            Ok(time) => Some(time),
            Err(_) => {
                warn!("Ignoring malformed occupied slot '{}'", slot.as_ref());
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    #[test]
    fn test_is_available_fails_closed_on_member() {
        let occupied = demo_blocklist();
        assert!(!is_available(date(), "10:00", &occupied));
        assert!(!is_available(date(), "14:30", &occupied));
        assert!(is_available(date(), "09:00", &occupied));
    }

    #[test]
    fn test_is_available_is_exact_match() {
        let occupied = demo_blocklist();
        assert!(is_available(date(), "10:00:00", &occupied));
        assert!(is_available(date(), "10:00 ", &occupied));
    }

    #[test]
    fn test_normalize_time_variants() {
        assert_eq!(normalize_time("9:05").unwrap(), "09:05");
        assert_eq!(normalize_time("10:00:00").unwrap(), "10:00");
        assert_eq!(normalize_time(" 16:00 ").unwrap(), "16:00");
        assert_eq!(normalize_time("10:00:30").unwrap(), "10:00");
        assert!(normalize_time("25:00").is_err());
        assert!(normalize_time("noon").is_err());
        assert!(normalize_time("").is_err());
    }

    #[test]
    fn test_parse_booking_date() {
        assert_eq!(parse_booking_date("2025-06-10").unwrap(), date());
        assert_eq!(
            parse_booking_date("10/06/2025"),
            Err(BookingValidationError::MalformedDate("10/06/2025".into()))
        );
    }

    #[test]
    fn test_fixed_policy_normalizes_and_skips_malformed() {
        let policy = OccupancyPolicy::fixed(["8:00", "bogus", "12:15:00"]);
        let expected: OccupiedSlots = ["08:00", "12:15"].iter().map(|s| s.to_string()).collect();
        assert_eq!(policy, OccupancyPolicy::Fixed(expected));
    }
}
