use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use appointment_cell::router::appointment_routes;
use patient_cell::router::patient_routes;
use appointment_cell::services::AppointmentService;
use patient_cell::services::PatientService;
use shared_config::AppConfig;
use shared_database::sheets::{ConfigKey, ConnectionStatus, SheetsClient};
use shared_models::error::AppError;
use shared_utils::extractor::auth_middleware;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let settings = Router::new()
        .route("/connection", get(test_connection))
        .route("/initialize", post(initialize_sheets))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state.clone());

    Router::new()
        .route("/", get(|| async { "Front Desk API is running!" }))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/settings", settings)
}

async fn test_connection(State(config): State<Arc<AppConfig>>) -> Json<ConnectionStatus> {
    let client = SheetsClient::new(&config, Arc::new(ConfigKey::new(&config)));
    Json(client.test_connection().await)
}

async fn initialize_sheets(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    AppointmentService::new(&config).ensure_sheet().await?;
    PatientService::new(&config).ensure_sheet().await?;

    Ok(Json(json!({ "initialized": true })))
}
