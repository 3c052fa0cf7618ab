use crate::domain::{
    models::{
        export::{ExportFilter, ExportRecord},
        registration::{InsertOutcome, Registration},
    },
    ports::RegistrationRepository,
};
use crate::error::AppError;
use crate::infra::repositories::is_unique_violation;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn create_if_room(&self, registration: &Registration, capacity: Option<i32>) -> Result<InsertOutcome, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Row lock on the seminar serialises registrations for it until commit.
        let locked = sqlx::query("SELECT id FROM seminars WHERE id = $1 FOR UPDATE")
            .bind(&registration.seminar_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(AppError::Database)?;
        if locked.is_none() {
            return Ok(InsertOutcome::SeminarMissing);
        }

        if let Some(capacity) = capacity {
            let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE seminar_id = $1")
                .bind(&registration.seminar_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::Database)?;
            if row.get::<i64, _>("count") >= i64::from(capacity) {
                return Ok(InsertOutcome::CapacityFull);
            }
        }

        let inserted = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, full_name, phone, email, seminar_id, status, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
        )
            .bind(&registration.id)
            .bind(&registration.full_name)
            .bind(&registration.phone)
            .bind(&registration.email)
            .bind(&registration.seminar_id)
            .bind(&registration.status)
            .bind(registration.created_at)
            .fetch_one(&mut *tx)
            .await;

        let created = match inserted {
            Ok(created) => created,
            Err(e) if is_unique_violation(&e) => return Ok(InsertOutcome::Duplicate),
            Err(e) => return Err(AppError::Database(e)),
        };

        tx.commit().await.map_err(AppError::Database)?;
        Ok(InsertOutcome::Inserted(created))
    }

    async fn exists(&self, seminar_id: &str, email: &str) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM registrations WHERE seminar_id = $1 AND email = $2) AS found").bind(seminar_id).bind(email).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<bool, _>("found"))
    }

    async fn count_by_seminar(&self, seminar_id: &str) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations WHERE seminar_id = $1").bind(seminar_id).fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM registrations").fetch_one(&self.pool).await.map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn counts_by_seminar(&self) -> Result<HashMap<String, i64>, AppError> {
        let rows = sqlx::query("SELECT seminar_id, COUNT(*) AS count FROM registrations GROUP BY seminar_id").fetch_all(&self.pool).await.map_err(AppError::Database)?;
        Ok(rows.into_iter().map(|row| (row.get::<String, _>("seminar_id"), row.get::<i64, _>("count"))).collect())
    }

    async fn list_by_seminar(&self, seminar_id: &str, limit: Option<i64>) -> Result<Vec<Registration>, AppError> {
        // LIMIT NULL is LIMIT ALL
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE seminar_id = $1 ORDER BY created_at DESC LIMIT $2").bind(seminar_id).bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_for_export(&self, filter: &ExportFilter) -> Result<Vec<ExportRecord>, AppError> {
        sqlx::query_as::<_, ExportRecord>(
            r#"SELECT r.full_name, r.email, r.phone, r.created_at AS registered_at,
                      s.title AS seminar_title, s.date AS seminar_date,
                      s.time AS seminar_time, s.location AS seminar_location
               FROM registrations r
               JOIN seminars s ON s.id = r.seminar_id
               WHERE ($1::text IS NULL OR r.seminar_id = $1)
                 AND ($2::timestamptz IS NULL OR r.created_at >= $2)
                 AND ($3::timestamptz IS NULL OR r.created_at <= $3)
               ORDER BY s.date DESC, r.created_at DESC"#
        )
            .bind(&filter.seminar_id)
            .bind(filter.created_from)
            .bind(filter.created_to)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
