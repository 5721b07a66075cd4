// libs/catalog-cell/tests/catalog_test.rs
use catalog_cell::{CatalogProvider, Practitioner, Procedure, StaticCatalog};

#[test]
fn test_default_catalog_contents() {
    let catalog = StaticCatalog::clinic_default();

    let practitioners = catalog.list_practitioners();
    assert_eq!(practitioners.len(), 3);
    assert_eq!(practitioners[0].name, "Dr. Carlos Silva");
    assert_eq!(practitioners[0].specialty, "Clínico Geral");

    let procedures: Vec<String> = catalog.list_procedures().into_iter().map(|p| p.name).collect();
    assert_eq!(
        procedures,
        vec![
            "Consulta de Avaliação",
            "Limpeza Dental",
            "Tratamento de Canal",
            "Clareamento Dental",
            "Implante Dentário",
        ]
    );
}

#[test]
fn test_listing_order_is_stable() {
    let catalog = StaticCatalog::default();
    assert_eq!(catalog.list_procedures(), catalog.list_procedures());
    assert_eq!(catalog.list_practitioners(), catalog.list_practitioners());
}

#[test]
fn test_lookup_by_id_ignores_order() {
    let catalog = StaticCatalog::new(
        vec![
            Practitioner::new("9", "Dr. Last", "Endodontia"),
            Practitioner::new("1", "Dr. First", "Clínico Geral"),
        ],
        vec![Procedure::new("7", "Raio-X"), Procedure::new("2", "Limpeza Dental")],
    );

    assert_eq!(catalog.find_practitioner("1").unwrap().name, "Dr. First");
    assert_eq!(catalog.find_procedure("2").unwrap().name, "Limpeza Dental");
    assert!(catalog.find_practitioner("2").is_none());
    assert!(catalog.find_procedure("").is_none());
}

#[test]
fn test_catalog_entries_serialize_with_plain_keys() {
    let json = serde_json::to_value(Practitioner::new("1", "Dr. Carlos Silva", "Clínico Geral")).unwrap();
    assert_eq!(json["id"], "1");
    assert_eq!(json["specialty"], "Clínico Geral");
}
