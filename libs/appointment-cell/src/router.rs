use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn appointment_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route("/{id}", put(update_appointment))
        .route("/{id}", delete(delete_appointment))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
