use serde_json::json;
use wiremock::matchers::{method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patient_cell::models::{CreatePatientRequest, Patient, UpdatePatientRequest};
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_database::store::SheetRecord;
use shared_database::StoreError;

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        sheets_api_base_url: base_url.to_string(),
        spreadsheet_id: "sheet-1".to_string(),
        sheets_api_key: "test-key".to_string(),
        appointments_tab: "Appointments".to_string(),
        patients_tab: "Patients".to_string(),
        jwt_secret: "test-secret".to_string(),
    }
}

fn header_row() -> Vec<String> {
    Patient::HEADER.iter().map(|h| h.to_string()).collect()
}

fn stored_row(id: &str, name: &str, owner: &str) -> Vec<String> {
    vec![
        id.to_string(),
        name.to_string(),
        "+233209876543".to_string(),
        "".to_string(),
        "1988-02-14".to_string(),
        "".to_string(),
        "".to_string(),
        "".to_string(),
        "2026-08-20T09:00:00+00:00".to_string(),
        "2026-08-20T09:00:00+00:00".to_string(),
        owner.to_string(),
    ]
}

async fn mock_table(server: &MockServer, rows: Vec<Vec<String>>) {
    Mock::given(method("GET"))
        .and(path_regex(r"/values/Patients%21A%3AK$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Patients!A:K",
            "majorDimension": "ROWS",
            "values": rows
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_appends_a_row_with_generated_id_and_timestamps() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/values/Patients%21A%3AK:append$"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": { "updatedRows": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = PatientService::new(&test_config(&server.uri()));
    let request = CreatePatientRequest {
        name: "Kofi Mensah".to_string(),
        phone: "+233209876543".to_string(),
        email: None,
        date_of_birth: Some("1988-02-14".to_string()),
        address: None,
        emergency_contact: None,
        medical_notes: None,
    };

    let patient = service.create_patient(request, "user-a").await.unwrap();

    assert!(patient.id.starts_with("pat_"));
    assert_eq!(patient.owner_id, "user-a");
    assert_eq!(patient.created_at, patient.updated_at);
}

#[tokio::test]
async fn list_partitions_records_by_owner() {
    let server = MockServer::start().await;
    mock_table(
        &server,
        vec![
            header_row(),
            stored_row("pat_1", "Kofi Mensah", "user-a"),
            stored_row("pat_2", "Ama Serwaa", "user-b"),
        ],
    )
    .await;

    let service = PatientService::new(&test_config(&server.uri()));

    let for_a = service.list_patients("user-a").await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, "pat_1");

    let for_b = service.list_patients("user-b").await.unwrap();
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].id, "pat_2");
}

#[tokio::test]
async fn update_preserves_unset_fields_and_created_at() {
    let server = MockServer::start().await;
    mock_table(
        &server,
        vec![header_row(), stored_row("pat_1", "Kofi Mensah", "user-a")],
    )
    .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"/values/Patients%21A2%3AK2$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedCells": 11
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = PatientService::new(&test_config(&server.uri()));
    let request = UpdatePatientRequest {
        address: Some("12 Ridge Road, Accra".to_string()),
        ..Default::default()
    };

    let patient = service.update_patient("pat_1", request, "user-a").await.unwrap();

    assert_eq!(patient.address.as_deref(), Some("12 Ridge Road, Accra"));
    assert_eq!(patient.name, "Kofi Mensah");
    assert_eq!(patient.date_of_birth.as_deref(), Some("1988-02-14"));
    assert_eq!(patient.created_at, "2026-08-20T09:00:00+00:00");
    assert_ne!(patient.updated_at, "2026-08-20T09:00:00+00:00");
}

#[tokio::test]
async fn delete_of_an_unknown_id_is_not_found() {
    let server = MockServer::start().await;
    mock_table(&server, vec![header_row()]).await;

    let service = PatientService::new(&test_config(&server.uri()));
    let err = service.delete_patient("pat_missing", "user-a").await.unwrap_err();

    assert!(matches!(err, StoreError::NotFound(_)));
    assert!(err.to_string().contains("patient pat_missing"));
}
