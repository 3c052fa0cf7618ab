//! Flattening of registrations into spreadsheet rows, with optional PII
//! masking for exports that leave the admin team.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use crate::domain::models::export::{ExportRecord, ExportRow};
use crate::domain::models::spreadsheet::{Cell, Column, Sheet};

pub const SHEET_NAME: &str = "Kayıtlar";

/// Consent is mandatory on the public form, so every stored registration
/// carries it. There is no per-row consent record to read from.
pub const CONSENT_MARKER: &str = "Evet";

const COLUMNS: [(&str, f64); 11] = [
    ("No", 5.0),
    ("Seminer Adı", 30.0),
    ("Seminer Tarihi", 15.0),
    ("Seminer Saati", 10.0),
    ("Konum", 25.0),
    ("Ad Soyad", 25.0),
    ("E-posta", 30.0),
    ("Telefon", 18.0),
    ("Kayıt Tarihi", 15.0),
    ("Kayıt Saati", 12.0),
    ("KVKK Onayı", 12.0),
];

pub fn censor_name(text: &str) -> String {
    if text.chars().count() < 2 {
        return text.to_string();
    }

    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if word.chars().count() > 1 => {
                    let mut masked = String::from(first);
                    masked.extend(chars.map(|_| '*'));
                    masked
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn censor_email(email: &str) -> String {
    let Some((local, domain)) = email.split_once('@') else {
        return email.to_string();
    };
    if domain.is_empty() {
        return email.to_string();
    }

    let chars: Vec<char> = local.chars().collect();
    let masked_local = match chars.as_slice() {
        [] => "*".to_string(),
        [first] | [first, _] => format!("{}*", first),
        [first, middle @ .., last] => format!("{}{}{}", first, "*".repeat(middle.len()), last),
    };

    format!("{}@{}", masked_local, domain)
}

pub fn censor_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 4 {
        return phone.to_string();
    }
    let (hidden, visible) = digits.split_at(digits.len() - 4);
    format!("{}{}", "*".repeat(hidden.len()), visible)
}

fn or_dash(value: &Option<String>) -> String {
    value.as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}

/// One row per record, numbered from 1, ordered by seminar date then
/// registration time (both newest first).
pub fn build_rows(records: &[ExportRecord], censored: bool, tz: Tz) -> Vec<ExportRow> {
    let mut sorted: Vec<&ExportRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.seminar_date.cmp(&a.seminar_date)
            .then_with(|| b.registered_at.cmp(&a.registered_at))
    });

    sorted.into_iter()
        .enumerate()
        .map(|(index, record)| {
            let registered_local = record.registered_at.with_timezone(&tz);
            let (full_name, email, phone) = if censored {
                (censor_name(&record.full_name), censor_email(&record.email), censor_phone(&record.phone))
            } else {
                (record.full_name.clone(), record.email.clone(), record.phone.clone())
            };

            ExportRow {
                sequence: index + 1,
                seminar_title: record.seminar_title.clone(),
                seminar_date: record.seminar_date.with_timezone(&tz).format("%d.%m.%Y").to_string(),
                seminar_time: or_dash(&record.seminar_time),
                seminar_location: or_dash(&record.seminar_location),
                full_name,
                email,
                phone,
                registration_date: registered_local.format("%d.%m.%Y").to_string(),
                registration_time: registered_local.format("%H:%M").to_string(),
                consent: CONSENT_MARKER.to_string(),
            }
        })
        .collect()
}

pub fn build_sheet(rows: &[ExportRow]) -> Sheet {
    Sheet {
        name: SHEET_NAME.to_string(),
        columns: COLUMNS.iter()
            .map(|(header, width)| Column { header: header.to_string(), width: *width })
            .collect(),
        rows: rows.iter()
            .map(|row| vec![
                Cell::Number(row.sequence as f64),
                Cell::Text(row.seminar_title.clone()),
                Cell::Text(row.seminar_date.clone()),
                Cell::Text(row.seminar_time.clone()),
                Cell::Text(row.seminar_location.clone()),
                Cell::Text(row.full_name.clone()),
                Cell::Text(row.email.clone()),
                Cell::Text(row.phone.clone()),
                Cell::Text(row.registration_date.clone()),
                Cell::Text(row.registration_time.clone()),
                Cell::Text(row.consent.clone()),
            ])
            .collect(),
    }
}

/// e.g. `seminer_kayitlari_tekil_sansurlu_2026-03-15.xlsx`
pub fn export_filename(single_seminar: bool, censored: bool, today: NaiveDate) -> String {
    let scope = if single_seminar { "_tekil" } else { "_tum_kayitlar" };
    let censored = if censored { "_sansurlu" } else { "" };
    format!("seminer_kayitlari{}{}_{}.xlsx", scope, censored, today.format("%Y-%m-%d"))
}

/// Widens calendar days in `tz` to UTC instants: `from` starts at local
/// midnight, `to` ends at local 23:59:59.999.
pub fn day_bounds(from: Option<NaiveDate>, to: Option<NaiveDate>, tz: Tz) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let local = |date: NaiveDate, time: NaiveTime| {
        tz.from_local_datetime(&date.and_time(time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    };

    let start = from.and_then(|d| {
        NaiveTime::from_hms_opt(0, 0, 0).and_then(|t| local(d, t))
    });
    let end = to.and_then(|d| {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).and_then(|t| local(d, t))
    });
    (start, end)
}
