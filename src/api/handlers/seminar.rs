use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthAdmin;
use crate::api::dtos::{
    requests::{CreateSeminarRequest, UpdateSeminarRequest, parse_seminar_date},
    responses::{
        DashboardStats, PublicSeminar, PublicSeminarResponse, SeminarDetail, SeminarDetailResponse,
        SeminarListResponse, SeminarMutationResponse, SeminarOverview,
    },
};
use crate::domain::models::seminar::{NewSeminarParams, Seminar, MAX_ACTIVE_SEMINARS};
use crate::domain::services::{capacity::parse_capacity, slug::generate_unique_slug};
use crate::error::AppError;
use std::sync::Arc;
use serde_json::json;
use tracing::{info, warn};

const RECENT_REGISTRATIONS: i64 = 5;
const SLUG_ATTEMPTS: usize = 5;

fn seminar_not_found() -> AppError {
    AppError::NotFound("Seminer bulunamadı.".into())
}

/// Draws random-suffixed slugs until one is free in the store.
async fn allocate_slug(state: &AppState, title: &str) -> Result<String, AppError> {
    for _ in 0..SLUG_ATTEMPTS {
        let candidate = generate_unique_slug(title);
        if state.seminar_repo.find_by_slug(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        warn!("Slug collision on {}, retrying", candidate);
    }
    Err(AppError::Conflict("Benzersiz bir adres oluşturulamadı, tekrar deneyiniz.".into()))
}

pub async fn create_seminar(
    State(state): State<Arc<AppState>>,
    AuthAdmin(admin): AuthAdmin,
    Json(mut payload): Json<CreateSeminarRequest>,
) -> Result<impl IntoResponse, AppError> {
    let active = state.seminar_repo.count_active().await?;
    if active >= MAX_ACTIVE_SEMINARS {
        warn!("Active seminar limit reached ({}), rejecting create by {}", active, admin.id);
        return Err(AppError::Validation(format!(
            "Maksimum {} aktif seminer oluşturabilirsiniz.", MAX_ACTIVE_SEMINARS
        )));
    }

    payload.normalize_optionals();

    let title = payload.title.as_deref().map(str::trim).filter(|t| !t.is_empty());
    let raw_date = payload.date.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let (Some(title), Some(raw_date)) = (title, raw_date) else {
        return Err(AppError::Validation("Başlık ve tarih zorunludur.".into()));
    };

    let date = parse_seminar_date(raw_date)?;
    let max_capacity = parse_capacity(payload.max_capacity.as_ref())?;
    let slug = allocate_slug(&state, title).await?;

    let seminar = Seminar::new(NewSeminarParams {
        slug,
        title: title.to_string(),
        description: payload.description,
        date,
        time: payload.time,
        location: payload.location,
        background_image: payload.background_image,
        contact_phone: payload.contact_phone,
        contact_email: payload.contact_email,
        contact_whatsapp: payload.contact_whatsapp,
        max_capacity,
    });

    let created = state.seminar_repo.create(&seminar).await?;

    info!("Seminar created: {} ({}) by admin {}", created.id, created.slug, admin.id);

    Ok(Json(SeminarMutationResponse { success: true, seminar: created }))
}

pub async fn list_seminars(
    State(state): State<Arc<AppState>>,
    AuthAdmin(_admin): AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let seminars = state.seminar_repo.list().await?;
    let counts = state.registration_repo.counts_by_seminar().await?;

    let mut overviews = Vec::with_capacity(seminars.len());
    for seminar in seminars {
        let recent_registrations = state.registration_repo
            .list_by_seminar(&seminar.id, Some(RECENT_REGISTRATIONS))
            .await?;
        let registration_count = counts.get(&seminar.id).copied().unwrap_or(0);
        overviews.push(SeminarOverview { seminar, registration_count, recent_registrations });
    }

    let stats = DashboardStats {
        total_seminars: overviews.len(),
        active_seminars: overviews.iter().filter(|o| o.seminar.is_active).count(),
        total_registrations: state.registration_repo.count_all().await?,
    };

    Ok(Json(SeminarListResponse { seminars: overviews, stats }))
}

pub async fn get_seminar(
    State(state): State<Arc<AppState>>,
    AuthAdmin(_admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let seminar = state.seminar_repo.find_by_id(&id).await?
        .ok_or_else(seminar_not_found)?;

    let registrations = state.registration_repo.list_by_seminar(&seminar.id, None).await?;
    let registration_count = registrations.len() as i64;

    Ok(Json(SeminarDetailResponse {
        seminar: SeminarDetail { seminar, registration_count, registrations }
    }))
}

pub async fn update_seminar(
    State(state): State<Arc<AppState>>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSeminarRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut seminar = state.seminar_repo.find_by_id(&id).await?
        .ok_or_else(seminar_not_found)?;

    let patch = payload.into_patch()?;
    patch.apply(&mut seminar);

    let updated = state.seminar_repo.update(&seminar).await?;

    info!("Seminar updated: {} by admin {}", updated.id, admin.id);

    Ok(Json(SeminarMutationResponse { success: true, seminar: updated }))
}

pub async fn delete_seminar(
    State(state): State<Arc<AppState>>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.seminar_repo.delete(&id).await?;

    info!("Seminar deleted: {} by admin {}", id, admin.id);

    Ok(Json(json!({ "success": true })))
}

/// Landing page lookup. Inactive seminars are hidden like missing ones.
pub async fn get_public_seminar_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let seminar = state.seminar_repo.find_by_slug(&slug).await?
        .filter(|s| s.is_active)
        .ok_or_else(seminar_not_found)?;

    let registration_count = state.registration_repo.count_by_seminar(&seminar.id).await?;

    Ok(Json(PublicSeminarResponse {
        seminar: PublicSeminar { seminar, registration_count }
    }))
}
