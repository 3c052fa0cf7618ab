use crate::domain::models::{
    admin::Admin,
    export::{ExportFilter, ExportRecord},
    registration::{InsertOutcome, Registration},
    seminar::Seminar,
    spreadsheet::Sheet,
    upload::{ImageUpload, StoredObject},
};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: &Admin) -> Result<Admin, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Admin>, AppError>;
}

#[async_trait]
pub trait SeminarRepository: Send + Sync {
    async fn create(&self, seminar: &Seminar) -> Result<Seminar, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Seminar>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Seminar>, AppError>;
    /// Newest first.
    async fn list(&self) -> Result<Vec<Seminar>, AppError>;
    async fn count_active(&self) -> Result<i64, AppError>;
    async fn update(&self, seminar: &Seminar) -> Result<Seminar, AppError>;
    /// Removes the seminar together with its registrations.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Inserts the registration only while the seminar is below `capacity`
    /// (`None` = unlimited) and the email is not yet registered for it. The
    /// capacity check and the insert happen in one transaction.
    async fn create_if_room(&self, registration: &Registration, capacity: Option<i32>) -> Result<InsertOutcome, AppError>;
    async fn exists(&self, seminar_id: &str, email: &str) -> Result<bool, AppError>;
    async fn count_by_seminar(&self, seminar_id: &str) -> Result<i64, AppError>;
    async fn count_all(&self) -> Result<i64, AppError>;
    async fn counts_by_seminar(&self) -> Result<HashMap<String, i64>, AppError>;
    /// Newest first, optionally capped at `limit` rows.
    async fn list_by_seminar(&self, seminar_id: &str, limit: Option<i64>) -> Result<Vec<Registration>, AppError>;
    /// Ordered by seminar date, then registration time, both descending.
    async fn list_for_export(&self, filter: &ExportFilter) -> Result<Vec<ExportRecord>, AppError>;
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    fn max_upload_bytes(&self) -> usize;
    async fn store_image(&self, image: ImageUpload) -> Result<StoredObject, AppError>;
}

pub trait SpreadsheetRenderer: Send + Sync {
    fn render(&self, sheet: &Sheet) -> Result<Vec<u8>, AppError>;
}
