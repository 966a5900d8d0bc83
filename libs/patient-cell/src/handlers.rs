use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::error;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{CreatePatientRequest, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    let patients = match service.list_patients(&user.id).await {
        Ok(patients) => patients,
        Err(err) => {
            error!("Failed to list patients: {}", err);
            Vec::new()
        }
    };

    let total = patients.len();
    Ok(Json(json!({
        "patients": patients,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.create_patient(request, &user.id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.update_patient(&id, request, &user.id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&config);

    service.delete_patient(&id, &user.id).await?;

    Ok(Json(json!({ "deleted": id })))
}
