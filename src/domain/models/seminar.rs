use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Upper bound on seminars that may be active at the same time.
/// Checked when a seminar is created; toggling `is_active` later is not limited.
pub const MAX_ACTIVE_SEMINARS: i64 = 10;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Seminar {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub background_image: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub is_active: bool,
    pub max_capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewSeminarParams {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub background_image: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub contact_whatsapp: Option<String>,
    pub max_capacity: Option<i32>,
}

impl Seminar {
    pub fn new(params: NewSeminarParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            slug: params.slug,
            title: params.title,
            description: params.description,
            date: params.date,
            time: params.time,
            location: params.location,
            background_image: params.background_image,
            contact_phone: params.contact_phone,
            contact_email: params.contact_email,
            contact_whatsapp: params.contact_whatsapp,
            is_active: true,
            max_capacity: params.max_capacity,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_room_for(&self, current_registrations: i64) -> bool {
        match self.max_capacity {
            Some(capacity) => current_registrations < i64::from(capacity),
            None => true,
        }
    }
}

/// Partial update of a seminar. `None` leaves the attribute alone; for the
/// nullable attributes `Some(None)` clears the stored value.
#[derive(Debug, Default, Clone)]
pub struct SeminarPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub background_image: Option<Option<String>>,
    pub contact_phone: Option<Option<String>>,
    pub contact_email: Option<Option<String>>,
    pub contact_whatsapp: Option<Option<String>>,
    pub max_capacity: Option<Option<i32>>,
    pub is_active: Option<bool>,
}

impl SeminarPatch {
    pub fn apply(self, seminar: &mut Seminar) {
        if let Some(val) = self.title { seminar.title = val; }
        if let Some(val) = self.description { seminar.description = val; }
        if let Some(val) = self.date { seminar.date = val; }
        if let Some(val) = self.time { seminar.time = val; }
        if let Some(val) = self.location { seminar.location = val; }
        if let Some(val) = self.background_image { seminar.background_image = val; }
        if let Some(val) = self.contact_phone { seminar.contact_phone = val; }
        if let Some(val) = self.contact_email { seminar.contact_email = val; }
        if let Some(val) = self.contact_whatsapp { seminar.contact_whatsapp = val; }
        if let Some(val) = self.max_capacity { seminar.max_capacity = val; }
        if let Some(val) = self.is_active { seminar.is_active = val; }
        seminar.updated_at = Utc::now();
    }
}
