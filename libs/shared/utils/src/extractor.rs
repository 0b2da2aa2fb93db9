use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Validates the bearer token and stores the resolved `User` in request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_value = request
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    let user = validate_token(token, &config.supabase_jwt_secret)
        .map_err(|e| AppError::Auth(e.to_string()))?;

    debug!("Authenticated request from user {}", user.id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Rejects callers that may not act on `patient_id`.
pub fn ensure_patient_access(user: &User, patient_id: &str) -> Result<(), AppError> {
    if user.can_access_patient(patient_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "User {} may not access records of patient {}",
            user.id, patient_id
        )))
    }
}

/// Rejects callers that are not doctors or admins.
pub fn ensure_clinical_staff(user: &User) -> Result<(), AppError> {
    if user.is_clinical_staff() {
        Ok(())
    } else {
        Err(AppError::Forbidden("Clinical staff role required".to_string()))
    }
}
