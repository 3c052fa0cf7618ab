pub mod sqlite_admin_repo;
pub mod sqlite_registration_repo;
pub mod sqlite_seminar_repo;

pub mod postgres_admin_repo;
pub mod postgres_registration_repo;
pub mod postgres_seminar_repo;

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_foreign_key_violation())
        .unwrap_or(false)
}
