use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Which registrations an export covers. Bounds are inclusive.
#[derive(Debug, Default, Clone)]
pub struct ExportFilter {
    pub seminar_id: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

/// A registration joined with the seminar columns the export needs.
#[derive(Debug, FromRow, Clone)]
pub struct ExportRecord {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
    pub seminar_title: String,
    pub seminar_date: DateTime<Utc>,
    pub seminar_time: Option<String>,
    pub seminar_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub sequence: usize,
    pub seminar_title: String,
    pub seminar_date: String,
    pub seminar_time: String,
    pub seminar_location: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub registration_date: String,
    pub registration_time: String,
    pub consent: String,
}
