use crate::domain::{
    models::{
        export::{ExportFilter, ExportRecord},
        registration::{InsertOutcome, Registration},
    },
    ports::RegistrationRepository,
};
use crate::error::AppError;
use crate::infra::repositories::{is_foreign_key_violation, is_unique_violation};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;

pub struct SqliteRegistrationRepo {
    pool: SqlitePool,
}

impl SqliteRegistrationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for SqliteRegistrationRepo {
    async fn create_if_room(&self, registration: &Registration, capacity: Option<i32>) -> Result<InsertOutcome, AppError> {
        // One statement: SQLite takes the write lock before evaluating the
        // count, so concurrent submissions cannot both see a free seat.
        let result = sqlx::query(
            r#"INSERT INTO registrations (id, full_name, phone, email, seminar_id, status, created_at)
               SELECT ?, ?, ?, ?, ?, ?, ?
               WHERE ? IS NULL OR (SELECT COUNT(*) FROM registrations WHERE seminar_id = ?) < ?"#
        )
            .bind(&registration.id)
            .bind(&registration.full_name)
            .bind(&registration.phone)
            .bind(&registration.email)
            .bind(&registration.seminar_id)
            .bind(&registration.status)
            .bind(registration.created_at)
            .bind(capacity)
            .bind(&registration.seminar_id)
            .bind(capacity)
            .execute(&self.pool)
            .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::CapacityFull),
            Ok(_) => Ok(InsertOutcome::Inserted(registration.clone())),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) if is_foreign_key_violation(&e) => Ok(InsertOutcome::SeminarMissing),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    async fn exists(&self, seminar_id: &str, email: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM registrations WHERE seminar_id = ? AND email = ?) AS found")
            .bind(seminar_id)
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<bool, _>("found"))
    }

    async fn count_by_seminar(&self, seminar_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE seminar_id = ?")
            .bind(seminar_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn counts_by_seminar(&self) -> Result<HashMap<String, i64>, AppError> {
        let rows = sqlx::query("SELECT seminar_id, COUNT(*) AS count FROM registrations GROUP BY seminar_id")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(rows.into_iter()
            .map(|row| (row.get::<String, _>("seminar_id"), row.get::<i64, _>("count")))
            .collect())
    }

    async fn list_by_seminar(&self, seminar_id: &str, limit: Option<i64>) -> Result<Vec<Registration>, AppError> {
        // LIMIT -1 means no limit in SQLite
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE seminar_id = ? ORDER BY created_at DESC LIMIT ?"
        )
            .bind(seminar_id)
            .bind(limit.unwrap_or(-1))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_export(&self, filter: &ExportFilter) -> Result<Vec<ExportRecord>, AppError> {
        sqlx::query_as::<_, ExportRecord>(
            r#"SELECT r.full_name, r.email, r.phone, r.created_at AS registered_at,
                      s.title AS seminar_title, s.date AS seminar_date,
                      s.time AS seminar_time, s.location AS seminar_location
               FROM registrations r
               JOIN seminars s ON s.id = r.seminar_id
               WHERE (? IS NULL OR r.seminar_id = ?)
                 AND (? IS NULL OR r.created_at >= ?)
                 AND (? IS NULL OR r.created_at <= ?)
               ORDER BY s.date DESC, r.created_at DESC"#
        )
            .bind(&filter.seminar_id)
            .bind(&filter.seminar_id)
            .bind(filter.created_from)
            .bind(filter.created_from)
            .bind(filter.created_to)
            .bind(filter.created_to)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
