use crate::domain::models::seminar::SeminarPatch;
use crate::domain::services::capacity::{parse_capacity, CapacityInput};
use crate::domain::services::registration_guard::RegistrationRequest;
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query flag that is set only by the literal `true`; any other value reads as off.
fn true_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.as_deref() == Some("true"))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_seminar_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation("Geçersiz tarih formatı.".into()))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SeedAdminRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct CreateRegistrationRequest {
    #[serde(alias = "fullName")]
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(alias = "seminarId")]
    pub seminar_id: Option<String>,
}

impl From<CreateRegistrationRequest> for RegistrationRequest {
    fn from(req: CreateRegistrationRequest) -> Self {
        RegistrationRequest {
            full_name: req.full_name,
            phone: req.phone,
            email: req.email,
            seminar_id: req.seminar_id,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateSeminarRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    #[serde(alias = "backgroundImage")]
    pub background_image: Option<String>,
    #[serde(alias = "contactPhone")]
    pub contact_phone: Option<String>,
    #[serde(alias = "contactEmail")]
    pub contact_email: Option<String>,
    #[serde(alias = "contactWhatsapp")]
    pub contact_whatsapp: Option<String>,
    #[serde(alias = "maxCapacity")]
    pub max_capacity: Option<CapacityInput>,
}

impl CreateSeminarRequest {
    pub fn normalize_optionals(&mut self) {
        self.description = blank_to_none(self.description.take());
        self.time = blank_to_none(self.time.take());
        self.location = blank_to_none(self.location.take());
        self.background_image = blank_to_none(self.background_image.take());
        self.contact_phone = blank_to_none(self.contact_phone.take());
        self.contact_email = blank_to_none(self.contact_email.take());
        self.contact_whatsapp = blank_to_none(self.contact_whatsapp.take());
    }
}

#[derive(Deserialize, Default)]
pub struct UpdateSeminarRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "backgroundImage")]
    pub background_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "contactPhone")]
    pub contact_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "contactEmail")]
    pub contact_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "contactWhatsapp")]
    pub contact_whatsapp: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", alias = "maxCapacity")]
    pub max_capacity: Option<Option<CapacityInput>>,
    #[serde(alias = "isActive")]
    pub is_active: Option<bool>,
}

impl UpdateSeminarRequest {
    pub fn into_patch(self) -> Result<SeminarPatch, AppError> {
        let title = match self.title {
            Some(title) if title.trim().is_empty() => {
                return Err(AppError::Validation("Başlık boş olamaz.".into()));
            }
            other => other,
        };

        let date = self.date.as_deref().map(parse_seminar_date).transpose()?;

        let max_capacity = match self.max_capacity {
            None => None,
            Some(None) => Some(None),
            Some(Some(input)) => Some(parse_capacity(Some(&input))?),
        };

        // Blank text clears a nullable field just like null does.
        let nullable = |v: Option<Option<String>>| v.map(blank_to_none);

        Ok(SeminarPatch {
            title,
            description: nullable(self.description),
            date,
            time: nullable(self.time),
            location: nullable(self.location),
            background_image: nullable(self.background_image),
            contact_phone: nullable(self.contact_phone),
            contact_email: nullable(self.contact_email),
            contact_whatsapp: nullable(self.contact_whatsapp),
            max_capacity,
            is_active: self.is_active,
        })
    }
}

#[derive(Deserialize, Default)]
pub struct ExportQuery {
    #[serde(alias = "seminarId")]
    pub seminar_id: Option<String>,
    #[serde(default, deserialize_with = "true_flag")]
    pub censored: bool,
    #[serde(alias = "dateFrom")]
    pub date_from: Option<String>,
    #[serde(alias = "dateTo")]
    pub date_to: Option<String>,
}

impl ExportQuery {
    pub fn seminar_id(&self) -> Option<&str> {
        self.seminar_id.as_deref().filter(|v| !v.is_empty())
    }

    pub fn parsed_range(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
        let parse = |raw: &Option<String>| -> Result<Option<NaiveDate>, AppError> {
            match raw.as_deref().filter(|v| !v.is_empty()) {
                None => Ok(None),
                Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d")
                    .map(Some)
                    .map_err(|_| AppError::Validation("Tarih formatı YYYY-MM-DD olmalıdır.".into())),
            }
        };
        Ok((parse(&self.date_from)?, parse(&self.date_to)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let req: UpdateSeminarRequest = serde_json::from_str(r#"{"time": null, "maxCapacity": "15"}"#).unwrap();
        let patch = req.into_patch().unwrap();

        assert_eq!(patch.time, Some(None));
        assert_eq!(patch.description, None);
        assert_eq!(patch.max_capacity, Some(Some(15)));
        assert_eq!(patch.title, None);
    }

    #[test]
    fn test_update_request_clears_capacity() {
        let req: UpdateSeminarRequest = serde_json::from_str(r#"{"max_capacity": ""}"#).unwrap();
        assert_eq!(req.into_patch().unwrap().max_capacity, Some(None));

        let req: UpdateSeminarRequest = serde_json::from_str(r#"{"max_capacity": null}"#).unwrap();
        assert_eq!(req.into_patch().unwrap().max_capacity, Some(None));
    }

    #[test]
    fn test_update_request_rejects_blank_title() {
        let req: UpdateSeminarRequest = serde_json::from_str(r#"{"title": "  "}"#).unwrap();
        assert!(matches!(req.into_patch(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_seminar_date_formats() {
        let plain = parse_seminar_date("2026-03-15").unwrap();
        assert_eq!(plain.to_rfc3339(), "2026-03-15T00:00:00+00:00");

        let full = parse_seminar_date("2026-03-15T14:00:00+03:00").unwrap();
        assert_eq!(full.to_rfc3339(), "2026-03-15T11:00:00+00:00");

        assert!(parse_seminar_date("15/03/2026").is_err());
    }

    #[test]
    fn test_export_censored_flag_only_true() {
        let parse = |qs: &str| -> bool {
            serde_urlencoded::from_str::<ExportQuery>(qs).unwrap().censored
        };
        assert!(parse("censored=true"));
        assert!(!parse("censored=1"));
        assert!(!parse("censored=yes"));
        assert!(!parse("censored="));
        assert!(!parse(""));
    }

    #[test]
    fn test_registration_request_accepts_camel_case() {
        let req: CreateRegistrationRequest = serde_json::from_str(
            r#"{"fullName": "Ali Veli", "phone": "05551234567", "email": "ali@example.com", "seminarId": "s1", "kvkkAccepted": true}"#
        ).unwrap();
        let req: RegistrationRequest = req.into();
        assert_eq!(req.full_name.as_deref(), Some("Ali Veli"));
        assert_eq!(req.seminar_id.as_deref(), Some("s1"));
    }
}
