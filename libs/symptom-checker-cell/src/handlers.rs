use axum::{Extension, Json};
use tracing::info;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{BodyPart, BodyPartsResponse, SymptomCheckRequest, SymptomVerdict};
use crate::services::triage;

pub async fn list_body_parts() -> Json<BodyPartsResponse> {
    Json(BodyPartsResponse {
        body_parts: BodyPart::VOCABULARY.to_vec(),
    })
}

#[axum::debug_handler]
pub async fn check_symptoms(
    Extension(user): Extension<User>,
    Json(request): Json<SymptomCheckRequest>,
) -> Result<Json<SymptomVerdict>, AppError> {
    let query = request.into_query()?;
    let verdict = triage::check_symptoms(&query);

    info!(
        user_id = %user.id,
        severity = ?verdict.severity,
        seek_medical_attention = verdict.seek_medical_attention,
        "Symptom check completed"
    );

    Ok(Json(verdict))
}
