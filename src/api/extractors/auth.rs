use axum::{
    extract::{FromRequestParts, FromRef},
    http::{request::Parts, Method},
};
use crate::state::AppState;
use crate::domain::models::auth::AdminPrincipal;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{warn, Span};

pub const SESSION_COOKIE: &str = "access_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Requires a signed-in admin. State-changing methods must also echo the
/// session's CSRF token in the `X-CSRF-Token` header.
pub struct AuthAdmin(pub AdminPrincipal);

impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(AppError::InternalWithMsg("CookieManagerLayer missing".into()))?;

        let access_token = cookies.get(SESSION_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);
        let claims = app_state.auth_service.verify_session(&access_token)?;

        let method = &parts.method;
        if *method != Method::GET && *method != Method::HEAD && *method != Method::OPTIONS {
            let csrf_header_val = parts.headers.get(CSRF_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or(AppError::Forbidden("CSRF token missing".into()))?;

            if csrf_header_val != claims.csrf_token {
                warn!("CSRF token mismatch for admin {}", claims.sub);
                return Err(AppError::Forbidden("CSRF token mismatch".into()));
            }
        }

        let principal = AuthService::principal(&claims);
        Span::current().record("admin_id", principal.id.as_str());

        Ok(AuthAdmin(principal))
    }
}
