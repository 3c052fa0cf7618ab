//! Creates the default admin account and a sample seminar. Safe to run
//! repeatedly: existing records are left untouched.

use chrono::{TimeZone, Utc};
use seminar_backend::{
    config::Config,
    domain::models::{admin::Admin, seminar::{NewSeminarParams, Seminar}},
    domain::services::auth_service::AuthService,
    error::AppError,
    infra::factory::bootstrap_state,
    state::AppState,
};
use std::env;
use tracing::info;

const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
const SAMPLE_SLUG: &str = "ornek-seminer-2026";

async fn seed_admin(state: &AppState) -> Result<(), AppError> {
    if state.admin_repo.find_by_email(DEFAULT_ADMIN_EMAIL).await?.is_some() {
        info!("Admin {} already exists, skipping", DEFAULT_ADMIN_EMAIL);
        return Ok(());
    }

    let password = env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let hash = AuthService::hash_password(&password)?;
    let admin = state.admin_repo
        .create(&Admin::new(DEFAULT_ADMIN_EMAIL.to_string(), hash, Some("Admin".to_string())))
        .await?;

    info!("Admin created: {} ({})", admin.email, admin.id);
    Ok(())
}

async fn seed_sample_seminar(state: &AppState) -> Result<(), AppError> {
    if state.seminar_repo.find_by_slug(SAMPLE_SLUG).await?.is_some() {
        info!("Sample seminar {} already exists, skipping", SAMPLE_SLUG);
        return Ok(());
    }

    let date = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0)
        .single()
        .ok_or(AppError::Internal)?;

    let seminar = Seminar::new(NewSeminarParams {
        slug: SAMPLE_SLUG.to_string(),
        title: "Örnek Seminer 2026".to_string(),
        description: Some("Bu bir örnek seminer açıklamasıdır.".to_string()),
        date,
        time: Some("14:00".to_string()),
        location: Some("Online".to_string()),
        background_image: None,
        contact_phone: None,
        contact_email: Some("info@example.com".to_string()),
        contact_whatsapp: None,
        max_capacity: Some(100),
    });

    let created = state.seminar_repo.create(&seminar).await?;
    info!("Sample seminar created: {} ({})", created.title, created.slug);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let config = Config::from_env();
    let state = bootstrap_state(&config).await;

    seed_admin(&state).await?;
    seed_sample_seminar(&state).await?;

    info!("Seeding finished");
    Ok(())
}
