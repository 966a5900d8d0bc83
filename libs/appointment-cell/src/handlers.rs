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

use crate::models::{CreateAppointmentRequest, UpdateAppointmentRequest};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    // Reads degrade to an empty list so the front desk keeps rendering when
    // the sheet is unreachable.
    let appointments = match service.list_appointments(&user.id).await {
        Ok(appointments) => appointments,
        Err(err) => {
            error!("Failed to list appointments: {}", err);
            Vec::new()
        }
    };

    let total = appointments.len();
    Ok(Json(json!({
        "appointments": appointments,
        "total": total
    })))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointment = service.create_appointment(request, &user.id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointment = service.update_appointment(&id, request, &user.id).await?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    service.delete_appointment(&id, &user.id).await?;

    Ok(Json(json!({ "deleted": id })))
}
