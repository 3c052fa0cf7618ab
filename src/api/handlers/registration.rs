use axum::{extract::{State, rejection::JsonRejection}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::CreateRegistrationRequest,
    responses::{RegistrationCreatedResponse, RegistrationSummary},
};
use crate::domain::models::registration::{InsertOutcome, Registration};
use crate::domain::services::registration_guard::{
    evaluate_registration, validate_submission, Decision, RegistrationRejection, RegistrationRequest,
};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{info, warn};

pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateRegistrationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    let request: RegistrationRequest = payload.into();

    let submission = validate_submission(&request).map_err(|rejection| {
        warn!("Registration rejected: {}", rejection.code());
        rejection
    })?;

    let seminar = state.seminar_repo.find_by_id(&submission.seminar_id).await?;
    let (current, already_registered) = match &seminar {
        Some(s) => (
            state.registration_repo.count_by_seminar(&s.id).await?,
            state.registration_repo.exists(&s.id, &submission.email).await?,
        ),
        None => (0, false),
    };

    let submission = match evaluate_registration(&request, seminar.as_ref(), current, already_registered) {
        Decision::Accepted(submission) => submission,
        Decision::Rejected(rejection) => {
            warn!("Registration rejected for seminar {}: {}", submission.seminar_id, rejection.code());
            return Err(rejection.into());
        }
    };

    let capacity = seminar.as_ref().and_then(|s| s.max_capacity);
    let registration = Registration::new(
        submission.seminar_id,
        submission.full_name,
        submission.phone,
        submission.email,
    );

    // The guard above read the count outside a transaction; the store
    // re-checks capacity and uniqueness atomically.
    let saved = match state.registration_repo.create_if_room(&registration, capacity).await? {
        InsertOutcome::Inserted(saved) => saved,
        InsertOutcome::CapacityFull => return Err(RegistrationRejection::CapacityFull.into()),
        InsertOutcome::Duplicate => return Err(RegistrationRejection::DuplicateEmail.into()),
        InsertOutcome::SeminarMissing => return Err(RegistrationRejection::EventNotFound.into()),
    };

    info!("Registration created: {} for seminar {}", saved.id, saved.seminar_id);

    Ok(Json(RegistrationCreatedResponse {
        success: true,
        message: "Kayıt başarıyla tamamlandı!".to_string(),
        registration: RegistrationSummary { id: saved.id, full_name: saved.full_name },
    }))
}
