// libs/appointment-cell/tests/store_test.rs
use std::fs;
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use appointment_cell::{
    Appointment, AppointmentError, AppointmentStore, CollectionAppointmentStore, InMemoryAppointmentStore,
};
use shared_database::{CollectionStore, JsonFileStore, MemoryStore};

fn appointment(id: &str, patient_id: &str, time: &str) -> Appointment {
    Appointment {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        practitioner_name: "Dra. Ana Santos - Ortodontia".to_string(),
        procedure_name: "Consulta de Avaliação".to_string(),
        date: "2025-06-10".to_string(),
        time: time.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    }
}

fn seed(store: &dyn AppointmentStore) {
    store.append(appointment("apt-1", "p1", "09:00")).unwrap();
    store.append(appointment("apt-2", "p2", "09:30")).unwrap();
    store.append(appointment("apt-3", "p1", "11:00")).unwrap();
    store.append(appointment("apt-4", "guest", "12:00")).unwrap();
    store.append(appointment("apt-5", "p1", "08:00")).unwrap();
}

fn assert_patient_filtering(store: &dyn AppointmentStore) {
    let all = store.list_all().unwrap();
    for patient in ["p1", "p2", "guest", "nobody"] {
        let expected: Vec<Appointment> = all.iter().filter(|a| a.patient_id == patient).cloned().collect();
        assert_eq!(store.list_by_patient(patient).unwrap(), expected);
    }

    let ids: Vec<String> = store.list_by_patient("p1").unwrap().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["apt-1", "apt-3", "apt-5"]);
}

#[test]
fn test_in_memory_store_filters_by_patient_in_order() {
    let store = InMemoryAppointmentStore::new();
    seed(&store);
    assert_eq!(store.len(), 5);
    assert_patient_filtering(&store);
}

#[test]
fn test_collection_store_filters_by_patient_in_order() {
    let store = CollectionAppointmentStore::new(Arc::new(MemoryStore::new()));
    seed(&store);
    assert_patient_filtering(&store);
}

#[test]
fn test_appointments_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let backend = JsonFileStore::open(dir.path()).unwrap();
        let store = CollectionAppointmentStore::new(Arc::new(backend));
        seed(&store);
    }

    let backend = JsonFileStore::open(dir.path()).unwrap();
    let store = CollectionAppointmentStore::new(Arc::new(backend));
    let all = store.list_all().unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all[4], appointment("apt-5", "p1", "08:00"));
}

#[test]
fn test_reads_records_written_with_dentist_name_key() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("appointments.json"),
        r#"[{
            "id": "apt-1718000000000",
            "patientId": "guest",
            "dentistName": "Dr. Paulo Mendes - Implantodontia",
            "procedureName": "Implante Dentário",
            "date": "2025-06-10",
            "time": "14:00",
            "createdAt": "2025-06-01T09:15:00.000Z"
        }]"#,
    )
    .unwrap();

    let store = CollectionAppointmentStore::new(Arc::new(JsonFileStore::open(dir.path()).unwrap()));
    let guest = store.list_by_patient("guest").unwrap();
    assert_eq!(guest.len(), 1);
    assert_eq!(guest[0].practitioner_name, "Dr. Paulo Mendes - Implantodontia");
}

#[test]
fn test_corrupted_record_is_reported() {
    let backend: Arc<dyn CollectionStore> = Arc::new(MemoryStore::new());
    backend
        .append("appointments", serde_json::json!({ "id": "apt-1", "patientId": 7 }))
        .unwrap();

    let store = CollectionAppointmentStore::new(backend);
    assert_matches!(store.list_all(), Err(AppointmentError::CorruptedRecord(_)));
}
