use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::config::StorageBackend;
use crate::api::handlers::{health, auth, seed, seminar, registration, export, upload};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
    services::ServeDir,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

/// Room for multipart framing on top of the storage backend's file limit.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.storage.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    let mut router = Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/me", get(auth::me))
        .route("/api/v1/admin/seed", post(seed::seed_admin))

        // Public
        .route("/api/v1/public/seminars/{slug}", get(seminar::get_public_seminar_by_slug))
        .route("/api/v1/registrations", post(registration::create_registration))

        // Admin
        .route("/api/v1/seminars", get(seminar::list_seminars).post(seminar::create_seminar))
        .route("/api/v1/seminars/{id}", get(seminar::get_seminar).put(seminar::update_seminar).delete(seminar::delete_seminar))
        .route("/api/v1/export", get(export::export_registrations))
        .route(
            "/api/v1/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(upload_limit)),
        );

    if state.config.storage_backend == StorageBackend::Local {
        router = router.nest_service("/uploads", ServeDir::new(&state.config.upload_dir));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        admin_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
