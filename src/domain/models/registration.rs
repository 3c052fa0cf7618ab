use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const STATUS_CONFIRMED: &str = "confirmed";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub seminar_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(seminar_id: String, full_name: String, phone: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name,
            phone,
            email,
            seminar_id,
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Result of the store's atomic "insert if there is still room" operation.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Inserted(Registration),
    CapacityFull,
    Duplicate,
    SeminarMissing,
}
