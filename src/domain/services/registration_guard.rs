//! Acceptance rule for public seminar sign-ups.
//!
//! Checks run in a fixed order and the first failure wins, so the attendee
//! always sees the most specific reason: field presence, field length, email
//! format, phone format, seminar existence, active flag, capacity, duplicate
//! email.

use crate::domain::models::seminar::Seminar;
use crate::domain::services::validation::{is_valid_email, is_valid_phone};

/// Longest accepted name, email or phone, in characters.
pub const MAX_FIELD_CHARS: usize = 255;

/// Raw form input; every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct RegistrationRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub seminar_id: Option<String>,
}

/// Form input with all fields present and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub seminar_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationRejection {
    MissingFields,
    FieldTooLong,
    InvalidEmail,
    InvalidPhone,
    EventNotFound,
    EventInactive,
    CapacityFull,
    DuplicateEmail,
}

impl RegistrationRejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::FieldTooLong => "FIELD_TOO_LONG",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPhone => "INVALID_PHONE",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::EventInactive => "EVENT_INACTIVE",
            Self::CapacityFull => "CAPACITY_FULL",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
        }
    }

    /// Message shown to the attendee on the landing page.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Tüm alanları doldurunuz.",
            Self::FieldTooLong => "Ad, email ve telefon en fazla 255 karakter olabilir.",
            Self::InvalidEmail => "Geçerli bir email adresi giriniz.",
            Self::InvalidPhone => "Geçerli bir telefon numarası giriniz.",
            Self::EventNotFound => "Seminer bulunamadı.",
            Self::EventInactive => "Bu seminer artık aktif değil.",
            Self::CapacityFull => "Seminer kapasitesi dolmuştur.",
            Self::DuplicateEmail => "Bu email adresi ile zaten kayıt yapılmış.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted(ValidSubmission),
    Rejected(RegistrationRejection),
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Field-level checks only. Lets the caller reject malformed input before
/// any store lookup.
pub fn validate_submission(request: &RegistrationRequest) -> Result<ValidSubmission, RegistrationRejection> {
    let (Some(full_name), Some(phone), Some(email), Some(seminar_id)) = (
        present(&request.full_name),
        present(&request.phone),
        present(&request.email),
        present(&request.seminar_id),
    ) else {
        return Err(RegistrationRejection::MissingFields);
    };

    if [full_name, phone, email].iter().any(|v| v.chars().count() > MAX_FIELD_CHARS) {
        return Err(RegistrationRejection::FieldTooLong);
    }

    if !is_valid_email(email) {
        return Err(RegistrationRejection::InvalidEmail);
    }
    if !is_valid_phone(phone) {
        return Err(RegistrationRejection::InvalidPhone);
    }

    Ok(ValidSubmission {
        full_name: full_name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        seminar_id: seminar_id.to_string(),
    })
}

/// Full decision. `seminar` is the record loaded for the requested id,
/// `current_registrations` its registration count and `email_registered`
/// whether the email already holds a registration for it. Pure: the caller
/// persists on `Accepted`.
pub fn evaluate_registration(
    request: &RegistrationRequest,
    seminar: Option<&Seminar>,
    current_registrations: i64,
    email_registered: bool,
) -> Decision {
    let submission = match validate_submission(request) {
        Ok(submission) => submission,
        Err(rejection) => return Decision::Rejected(rejection),
    };

    let Some(seminar) = seminar.filter(|s| s.id == submission.seminar_id) else {
        return Decision::Rejected(RegistrationRejection::EventNotFound);
    };
    if !seminar.is_active {
        return Decision::Rejected(RegistrationRejection::EventInactive);
    }
    if !seminar.has_room_for(current_registrations) {
        return Decision::Rejected(RegistrationRejection::CapacityFull);
    }
    if email_registered {
        return Decision::Rejected(RegistrationRejection::DuplicateEmail);
    }

    Decision::Accepted(submission)
}
