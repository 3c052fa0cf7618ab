use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use crate::state::AppState;
use crate::api::extractors::auth::AuthAdmin;
use crate::api::dtos::responses::UploadResponse;
use crate::domain::services::image::validate_image;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Dosya boyutu çok büyük.".into())
    } else {
        warn!("Malformed multipart body: {}", err.body_text());
        AppError::Validation("Geçersiz dosya yüklemesi.".into())
    }
}

pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    AuthAdmin(admin): AuthAdmin,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let image = validate_image(content_type.as_deref(), bytes.to_vec(), state.storage.max_upload_bytes())?;
        let stored = state.storage.store_image(image).await?;

        info!("Image uploaded by admin {}: {}", admin.id, stored.public_id);

        return Ok(Json(UploadResponse {
            success: true,
            url: stored.url,
            public_id: stored.public_id,
        }));
    }

    Err(AppError::Validation("Dosya bulunamadı.".into()))
}
