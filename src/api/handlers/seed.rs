use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::SeedAdminRequest;
use crate::domain::models::admin::Admin;
use crate::domain::models::auth::AdminProfile;
use crate::domain::services::auth_service::AuthService;
use std::sync::Arc;
use serde_json::json;
use tracing::{info, warn};

/// Bootstraps an admin account. Disabled when running in production.
pub async fn seed_admin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SeedAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    if state.config.is_production() {
        warn!("Seed endpoint called in production");
        return Err(AppError::Forbidden("This endpoint is disabled in production.".into()));
    }

    let email = payload.email.as_deref().map(str::trim).filter(|v| !v.is_empty());
    let password = payload.password.as_deref().filter(|v| !v.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::Validation("Email ve şifre zorunludur.".into()));
    };

    if state.admin_repo.find_by_email(email).await?.is_some() {
        return Err(AppError::Validation("Bu email ile admin zaten mevcut.".into()));
    }

    let password_hash = AuthService::hash_password(password)?;
    let admin = state.admin_repo.create(&Admin::new(email.to_string(), password_hash, payload.name)).await?;

    info!("Admin created via seed endpoint: {}", admin.id);

    Ok(Json(json!({
        "success": true,
        "admin": AdminProfile {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    })))
}
