use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn patient_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(list_patients).post(create_patient))
        .route("/{id}", put(update_patient))
        .route("/{id}", delete(delete_patient))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
