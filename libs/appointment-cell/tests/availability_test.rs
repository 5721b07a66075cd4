// libs/appointment-cell/tests/availability_test.rs
use chrono::{NaiveDate, Utc};

use appointment_cell::services::availability::demo_blocklist;
use appointment_cell::{is_available, Appointment, AppointmentStore, InMemoryAppointmentStore, OccupancyPolicy};
use shared_config::AvailabilityMode;
use shared_utils::test_utils::TestConfig;

const CARLOS: &str = "Dr. Carlos Silva - Clínico Geral";
const ANA: &str = "Dra. Ana Santos - Ortodontia";

fn booked(practitioner: &str, date: &str, time: &str) -> Appointment {
    Appointment {
        id: format!("apt-{}-{}", date, time),
        patient_id: "p1".to_string(),
        practitioner_name: practitioner.to_string(),
        procedure_name: "Limpeza Dental".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        created_at: Utc::now(),
    }
}

fn populated_store() -> InMemoryAppointmentStore {
    let store = InMemoryAppointmentStore::new();
    store.append(booked(CARLOS, "2025-06-10", "09:00")).unwrap();
    store.append(booked(CARLOS, "2025-06-11", "11:00")).unwrap();
    store.append(booked(ANA, "2025-06-10", "15:00")).unwrap();
    store
}

#[test]
fn test_demo_blocklist_applies_to_every_date() {
    let occupied = demo_blocklist();
    for day in 1..=30 {
        let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        assert!(!is_available(date, "16:00", &occupied));
        assert!(is_available(date, "16:30", &occupied));
    }
}

#[test]
fn test_fixed_policy_ignores_store() {
    let store = populated_store();
    let occupied = OccupancyPolicy::fixed(["10:00"])
        .occupied_slots(&store, "2025-06-10", CARLOS)
        .unwrap();
    assert_eq!(occupied.into_iter().collect::<Vec<_>>(), vec!["10:00"]);
}

#[test]
fn test_store_policy_scopes_by_practitioner_and_date() {
    let store = populated_store();
    let policy = OccupancyPolicy::FromStore;

    let carlos_10 = policy.occupied_slots(&store, "2025-06-10", CARLOS).unwrap();
    assert_eq!(carlos_10.into_iter().collect::<Vec<_>>(), vec!["09:00"]);

    let ana_10 = policy.occupied_slots(&store, "2025-06-10", ANA).unwrap();
    assert_eq!(ana_10.into_iter().collect::<Vec<_>>(), vec!["15:00"]);

    assert!(policy.occupied_slots(&store, "2025-06-12", CARLOS).unwrap().is_empty());
}

#[test]
fn test_combined_policy_merges_sources() {
    let store = populated_store();
    let occupied = OccupancyPolicy::default()
        .occupied_slots(&store, "2025-06-10", CARLOS)
        .unwrap();
    assert_eq!(
        occupied.into_iter().collect::<Vec<_>>(),
        vec!["09:00", "10:00", "14:30", "16:00"]
    );
}

#[test]
fn test_policy_from_config() {
    let mut config = TestConfig::default();
    assert_eq!(
        OccupancyPolicy::from_config(&config.to_app_config()),
        OccupancyPolicy::Fixed(demo_blocklist())
    );

    config.availability_mode = AvailabilityMode::Store;
    assert_eq!(OccupancyPolicy::from_config(&config.to_app_config()), OccupancyPolicy::FromStore);

    config.availability_mode = AvailabilityMode::Combined;
    config.occupied_slots = vec!["7:45".to_string()];
    let expected = ["07:45"].iter().map(|s| s.to_string()).collect();
    assert_eq!(
        OccupancyPolicy::from_config(&config.to_app_config()),
        OccupancyPolicy::Combined(expected)
    );
}
