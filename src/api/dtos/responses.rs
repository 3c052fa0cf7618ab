use crate::domain::models::{registration::Registration, seminar::Seminar};
use serde::Serialize;

#[derive(Serialize)]
pub struct RegistrationSummary {
    pub id: String,
    pub full_name: String,
}

#[derive(Serialize)]
pub struct RegistrationCreatedResponse {
    pub success: bool,
    pub message: String,
    pub registration: RegistrationSummary,
}

#[derive(Serialize)]
pub struct PublicSeminar {
    #[serde(flatten)]
    pub seminar: Seminar,
    pub registration_count: i64,
}

#[derive(Serialize)]
pub struct PublicSeminarResponse {
    pub seminar: PublicSeminar,
}

#[derive(Serialize)]
pub struct SeminarOverview {
    #[serde(flatten)]
    pub seminar: Seminar,
    pub registration_count: i64,
    pub recent_registrations: Vec<Registration>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_seminars: usize,
    pub active_seminars: usize,
    pub total_registrations: i64,
}

#[derive(Serialize)]
pub struct SeminarListResponse {
    pub seminars: Vec<SeminarOverview>,
    pub stats: DashboardStats,
}

#[derive(Serialize)]
pub struct SeminarDetail {
    #[serde(flatten)]
    pub seminar: Seminar,
    pub registration_count: i64,
    pub registrations: Vec<Registration>,
}

#[derive(Serialize)]
pub struct SeminarDetailResponse {
    pub seminar: SeminarDetail,
}

#[derive(Serialize)]
pub struct SeminarMutationResponse {
    pub success: bool,
    pub seminar: Seminar,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub public_id: String,
}
