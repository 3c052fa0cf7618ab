use axum::{
    extract::{State, Query},
    http::header,
    response::IntoResponse,
};
use crate::state::AppState;
use crate::api::extractors::auth::AuthAdmin;
use crate::api::dtos::requests::ExportQuery;
use crate::domain::models::{export::ExportFilter, spreadsheet::XLSX_CONTENT_TYPE};
use crate::domain::services::export::{build_rows, build_sheet, day_bounds, export_filename};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn export_registrations(
    State(state): State<Arc<AppState>>,
    AuthAdmin(admin): AuthAdmin,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tz = state.config.timezone();
    let (from, to) = query.parsed_range()?;
    let (created_from, created_to) = day_bounds(from, to, tz);

    let filter = ExportFilter {
        seminar_id: query.seminar_id().map(str::to_string),
        created_from,
        created_to,
    };

    let records = state.registration_repo.list_for_export(&filter).await?;
    let rows = build_rows(&records, query.censored, tz);
    let bytes = state.spreadsheet.render(&build_sheet(&rows))?;

    let today = Utc::now().with_timezone(&tz).date_naive();
    let filename = export_filename(filter.seminar_id.is_some(), query.censored, today);

    info!(
        rows = rows.len(),
        censored = query.censored,
        "Export generated by admin {}: {}", admin.id, filename
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        bytes,
    ))
}
