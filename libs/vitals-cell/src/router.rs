// =====================================================================================
// VITALS CELL ROUTER
// =====================================================================================

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{
    acknowledge_alert, assess_reading, clear_patient_alerts, get_reading_history, get_vitals_status,
    list_alerts, record_reading, VitalsHandlers,
};

pub fn create_vitals_router(config: Arc<AppConfig>) -> Router {
    vitals_routes(Arc::new(VitalsHandlers::new(config)))
}

/// Routes over an existing handler set, so callers can inject their own repository.
pub fn vitals_routes(handlers: Arc<VitalsHandlers>) -> Router {
    let config = handlers.config();

    Router::new()
        .route("/assess", post(assess_reading))
        .route(
            "/patients/{patient_id}/readings",
            post(record_reading).get(get_reading_history),
        )
        .route("/patients/{patient_id}/status", get(get_vitals_status))
        .route("/patients/{patient_id}/alerts", delete(clear_patient_alerts))
        .route("/alerts", get(list_alerts))
        .route("/alerts/{alert_id}/acknowledge", post(acknowledge_alert))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(handlers)
}
