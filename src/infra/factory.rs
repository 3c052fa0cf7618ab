use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::{Config, StorageBackend};
use crate::state::AppState;
use crate::domain::ports::ObjectStorage;
use crate::domain::services::auth_service::AuthService;
use crate::infra::spreadsheet::xlsx_renderer::XlsxRenderer;
use crate::infra::storage::{cloudinary_storage::CloudinaryStorage, local_storage::LocalDiskStorage};
use crate::infra::repositories::{
    postgres_admin_repo::PostgresAdminRepo, postgres_registration_repo::PostgresRegistrationRepo,
    postgres_seminar_repo::PostgresSeminarRepo,
    sqlite_admin_repo::SqliteAdminRepo, sqlite_registration_repo::SqliteRegistrationRepo,
    sqlite_seminar_repo::SqliteSeminarRepo,
};

fn build_storage(config: &Config) -> Arc<dyn ObjectStorage> {
    match (&config.storage_backend, &config.cloudinary) {
        (StorageBackend::Cloudinary, Some(cloudinary)) => {
            info!("Using Cloudinary image storage (cloud: {})", cloudinary.cloud_name);
            Arc::new(CloudinaryStorage::new(cloudinary.clone()))
        }
        _ => {
            info!("Using local image storage at {:?}", config.upload_dir);
            Arc::new(LocalDiskStorage::new(config.upload_dir.clone(), config.public_base_url.clone()))
        }
    }
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let auth_service = Arc::new(AuthService::new(config));
    let storage = build_storage(config);
    let spreadsheet = Arc::new(XlsxRenderer);

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState {
            config: config.clone(),
            admin_repo: Arc::new(PostgresAdminRepo::new(pool.clone())),
            seminar_repo: Arc::new(PostgresSeminarRepo::new(pool.clone())),
            registration_repo: Arc::new(PostgresRegistrationRepo::new(pool.clone())),
            auth_service,
            storage,
            spreadsheet,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState {
            config: config.clone(),
            admin_repo: Arc::new(SqliteAdminRepo::new(pool.clone())),
            seminar_repo: Arc::new(SqliteSeminarRepo::new(pool.clone())),
            registration_repo: Arc::new(SqliteRegistrationRepo::new(pool.clone())),
            auth_service,
            storage,
            spreadsheet,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
