// =====================================================================================
// VITALS CELL HANDLERS
// =====================================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Value};
use tracing::{info, instrument};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;
use shared_utils::extractor::{ensure_clinical_staff, ensure_patient_access};

use crate::models::{
    AlertListResponse, AlertsQuery, HistoryQuery, ReadingHistoryResponse, RecordReadingResponse,
    VitalsAlert, VitalsAssessment, VitalsError, VitalsReading,
};
use crate::services::{assess_vitals, InMemoryVitalsRepository, VitalsAlertService, VitalsRepository};

const DEFAULT_HISTORY_LIMIT: usize = 20;

pub struct VitalsHandlers {
    repository: Arc<dyn VitalsRepository>,
    alert_service: Arc<VitalsAlertService>,
    config: Arc<AppConfig>,
}

impl VitalsHandlers {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let repository = Arc::new(InMemoryVitalsRepository::new(config.vitals_history_limit));
        Self::with_repository(config, repository)
    }

    pub fn with_repository(config: Arc<AppConfig>, repository: Arc<dyn VitalsRepository>) -> Self {
        Self {
            repository,
            alert_service: Arc::new(VitalsAlertService::new()),
            config,
        }
    }

    pub fn config(&self) -> Arc<AppConfig> {
        self.config.clone()
    }
}

// =====================================================================================
// STATELESS ASSESSMENT
// =====================================================================================

/// Classifies a reading without storing it. A `null` body yields `unknown`.
pub async fn assess_reading(Json(reading): Json<Option<VitalsReading>>) -> Json<VitalsAssessment> {
    Json(assess_vitals(reading.as_ref()))
}

// =====================================================================================
// PATIENT READINGS
// =====================================================================================

#[instrument(skip(handlers, user, reading))]
pub async fn record_reading(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
    Json(reading): Json<VitalsReading>,
) -> Result<Json<RecordReadingResponse>, AppError> {
    ensure_patient_access(&user, &patient_id)?;

    let stored = handlers.repository.record(&patient_id, reading).await;
    let assessment = assess_vitals(Some(&stored.reading));
    let alert = handlers.alert_service.raise_if_needed(&stored, &assessment).await;

    info!(
        reading_id = %stored.id,
        status = ?assessment.status,
        alert_raised = alert.is_some(),
        "Vitals reading processed"
    );

    Ok(Json(RecordReadingResponse {
        reading: stored,
        assessment,
        alert,
    }))
}

#[instrument(skip(handlers, user))]
pub async fn get_reading_history(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ReadingHistoryResponse>, AppError> {
    ensure_patient_access(&user, &patient_id)?;

    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    if limit == 0 {
        return Err(VitalsError::InvalidLimit.into());
    }

    let readings = handlers.repository.history(&patient_id, limit).await;
    let total = readings.len();

    Ok(Json(ReadingHistoryResponse {
        patient_id,
        readings,
        total,
    }))
}

#[instrument(skip(handlers, user))]
pub async fn get_vitals_status(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
) -> Result<Json<VitalsAssessment>, AppError> {
    ensure_patient_access(&user, &patient_id)?;

    let latest = handlers.repository.latest(&patient_id).await;
    Ok(Json(assess_vitals(latest.as_ref().map(|stored| &stored.reading))))
}

// =====================================================================================
// ALERTS
// =====================================================================================

#[instrument(skip(handlers, user))]
pub async fn list_alerts(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Query(query): Query<AlertsQuery>,
) -> Result<Json<AlertListResponse>, AppError> {
    let patient_filter = if user.is_clinical_staff() {
        query.patient_id
    } else {
        let patient_id = query.patient_id.unwrap_or_else(|| user.id.clone());
        ensure_patient_access(&user, &patient_id)?;
        Some(patient_id)
    };

    let alerts = handlers.alert_service.active_alerts(patient_filter.as_deref()).await;
    let total = alerts.len();

    Ok(Json(AlertListResponse { alerts, total }))
}

#[instrument(skip(handlers, user))]
pub async fn acknowledge_alert(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Path(alert_id): Path<Uuid>,
) -> Result<Json<VitalsAlert>, AppError> {
    ensure_clinical_staff(&user)?;

    let alert = handlers.alert_service.acknowledge(alert_id, &user.id).await?;
    Ok(Json(alert))
}

#[instrument(skip(handlers, user))]
pub async fn clear_patient_alerts(
    State(handlers): State<Arc<VitalsHandlers>>,
    Extension(user): Extension<User>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    ensure_clinical_staff(&user)?;

    let cleared = handlers.alert_service.clear_patient(&patient_id).await;
    Ok(Json(json!({
        "patient_id": patient_id,
        "cleared": cleared
    })))
}
