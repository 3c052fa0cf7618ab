use crate::domain::{models::seminar::Seminar, ports::SeminarRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

pub struct SqliteSeminarRepo {
    pool: SqlitePool,
}

impl SqliteSeminarRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeminarRepository for SqliteSeminarRepo {
    async fn create(&self, seminar: &Seminar) -> Result<Seminar, AppError> {
        sqlx::query_as::<_, Seminar>(
            r#"INSERT INTO seminars (
                id, slug, title, description, date, time, location, background_image,
                contact_phone, contact_email, contact_whatsapp, is_active, max_capacity,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&seminar.id)
            .bind(&seminar.slug)
            .bind(&seminar.title)
            .bind(&seminar.description)
            .bind(seminar.date)
            .bind(&seminar.time)
            .bind(&seminar.location)
            .bind(&seminar.background_image)
            .bind(&seminar.contact_phone)
            .bind(&seminar.contact_email)
            .bind(&seminar.contact_whatsapp)
            .bind(seminar.is_active)
            .bind(seminar.max_capacity)
            .bind(seminar.created_at)
            .bind(seminar.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Seminar>, AppError> {
        sqlx::query_as::<_, Seminar>("SELECT * FROM seminars WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Seminar>, AppError> {
        sqlx::query_as::<_, Seminar>("SELECT * FROM seminars WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Seminar>, AppError> {
        sqlx::query_as::<_, Seminar>("SELECT * FROM seminars ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn count_active(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM seminars WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(row.get::<i64, _>("count"))
    }

    async fn update(&self, seminar: &Seminar) -> Result<Seminar, AppError> {
        sqlx::query_as::<_, Seminar>(
            r#"UPDATE seminars SET
                title=?, description=?, date=?, time=?, location=?, background_image=?,
                contact_phone=?, contact_email=?, contact_whatsapp=?, is_active=?, max_capacity=?,
                updated_at=?
               WHERE id=? RETURNING *"#
        )
            .bind(&seminar.title)
            .bind(&seminar.description)
            .bind(seminar.date)
            .bind(&seminar.time)
            .bind(&seminar.location)
            .bind(&seminar.background_image)
            .bind(&seminar.contact_phone)
            .bind(&seminar.contact_email)
            .bind(&seminar.contact_whatsapp)
            .bind(seminar.is_active)
            .bind(seminar.max_capacity)
            .bind(seminar.updated_at)
            .bind(&seminar.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Seminer bulunamadı.".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // registrations go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM seminars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Seminer bulunamadı.".into()));
        }
        Ok(())
    }
}
