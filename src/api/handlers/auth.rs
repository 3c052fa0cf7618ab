use axum::{extract::State, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::auth::{AuthAdmin, SESSION_COOKIE};
use crate::domain::models::auth::{AuthResponse, AdminProfile};
use crate::domain::services::auth_service::{AuthService, SESSION_TTL_HOURS};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::{info, warn};

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_repo.find_by_email(payload.email.trim()).await?
        .ok_or_else(|| {
            warn!("Login attempt for unknown admin");
            AppError::Unauthorized
        })?;

    AuthService::verify_password(&payload.password, &admin.password_hash)?;

    let (session_jwt, csrf_token) = state.auth_service.issue_session(&admin)?;

    set_session_cookie(&cookies, &session_jwt);

    info!("Admin logged in: {}", admin.id);

    Ok(Json(AuthResponse {
        csrf_token,
        admin: AdminProfile {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }))
}

pub async fn logout(cookies: Cookies) -> Result<impl IntoResponse, AppError> {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());

    info!("Admin logged out");

    Ok(StatusCode::OK)
}

pub async fn me(
    State(state): State<Arc<AppState>>,
    AuthAdmin(principal): AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let admin = state.admin_repo.find_by_id(&principal.id).await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(AdminProfile {
        id: admin.id,
        email: admin.email,
        name: admin.name,
    }))
}

fn set_session_cookie(cookies: &Cookies, token: &str) {
    let mut session = Cookie::new(SESSION_COOKIE, token.to_string());
    session.set_http_only(true);
    session.set_secure(true);
    session.set_same_site(SameSite::Strict);
    session.set_path("/");
    session.set_max_age(Duration::hours(SESSION_TTL_HOURS));
    cookies.add(session);
}
