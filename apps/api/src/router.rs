use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;
use symptom_checker_cell::router::symptom_checker_routes;
use vitals_cell::router::create_vitals_router;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Telehealth Triage API is running!" }))
        .nest("/symptoms", symptom_checker_routes(state.clone()))
        .nest("/vitals", create_vitals_router(state))
}
