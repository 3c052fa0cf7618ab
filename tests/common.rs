#![allow(dead_code)]

use seminar_backend::{
    api::router::create_router,
    state::AppState,
    config::{Config, StorageBackend},
    infra::repositories::{
        sqlite_admin_repo::SqliteAdminRepo,
        sqlite_registration_repo::SqliteRegistrationRepo,
        sqlite_seminar_repo::SqliteSeminarRepo,
    },
    infra::spreadsheet::xlsx_renderer::XlsxRenderer,
    domain::models::{admin::Admin, upload::{ImageUpload, StoredObject}},
    domain::services::auth_service::AuthService,
    domain::ports::ObjectStorage,
    error::AppError,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, header},
    response::Response,
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::Value;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Keeps uploads in memory.
#[derive(Default)]
pub struct MockStorage {
    pub stored: Mutex<Vec<ImageUpload>>,
}

#[async_trait]
impl ObjectStorage for MockStorage {
    fn max_upload_bytes(&self) -> usize {
        1024 * 1024
    }

    async fn store_image(&self, image: ImageUpload) -> Result<StoredObject, AppError> {
        let public_id = format!("mock/{}", Uuid::new_v4());
        let url = format!("https://cdn.test/{}.{}", public_id, image.kind.extension());
        self.stored.lock().unwrap().push(image);
        Ok(StoredObject { url, public_id })
    }
}

pub struct AuthHeaders {
    pub access_token: String,
    pub csrf_token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub storage: Arc<MockStorage>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_env("test").await
    }

    pub async fn with_env(app_env: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("../tests/keys/test_private.pem");
        let pub_key_pem = include_str!("../tests/keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            app_env: app_env.to_string(),
            display_timezone: "Europe/Istanbul".to_string(),
            storage_backend: StorageBackend::Cloudinary,
            upload_dir: PathBuf::from("./uploads"),
            public_base_url: "http://localhost".to_string(),
            cloudinary: None,
        };

        let storage = Arc::new(MockStorage::default());

        let state = Arc::new(AppState {
            config: config.clone(),
            admin_repo: Arc::new(SqliteAdminRepo::new(pool.clone())),
            seminar_repo: Arc::new(SqliteSeminarRepo::new(pool.clone())),
            registration_repo: Arc::new(SqliteRegistrationRepo::new(pool.clone())),
            auth_service: Arc::new(AuthService::new(&config)),
            storage: storage.clone(),
            spreadsheet: Arc::new(XlsxRenderer),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            storage,
        }
    }

    pub async fn create_admin(&self) {
        let hash = AuthService::hash_password(ADMIN_PASSWORD).unwrap();
        self.state.admin_repo
            .create(&Admin::new(ADMIN_EMAIL.to_string(), hash, Some("Admin".to_string())))
            .await
            .unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// JSON request, optionally carrying the session cookie and CSRF header.
    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>, auth: Option<&AuthHeaders>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(auth) = auth {
            builder = builder
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn login(&self) -> AuthHeaders {
        let payload = serde_json::json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD
        });

        let response = self.request("POST", "/api/v1/auth/login", Some(payload), None).await;

        if !response.status().is_success() {
            panic!("Login failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token_cookie = cookies.iter()
            .find(|c| c.contains("access_token="))
            .expect("No access_token cookie returned");

        let start = access_token_cookie.find("access_token=").unwrap() + 13;
        let end = access_token_cookie[start..].find(';').unwrap_or(access_token_cookie.len() - start);
        let access_token = access_token_cookie[start..start+end].to_string();

        let body_json = parse_body(response).await;
        let csrf_token = body_json["csrf_token"].as_str().expect("No csrf_token in body").to_string();

        AuthHeaders {
            access_token,
            csrf_token
        }
    }

    /// Creates an admin, logs in and returns the session.
    pub async fn admin_session(&self) -> AuthHeaders {
        self.create_admin().await;
        self.login().await
    }

    /// Creates a seminar through the API and returns its JSON.
    pub async fn create_seminar(&self, auth: &AuthHeaders, payload: Value) -> Value {
        let response = self.request("POST", "/api/v1/seminars", Some(payload), Some(auth)).await;
        assert!(response.status().is_success(), "seminar creation failed: {}", response.status());
        parse_body(response).await["seminar"].clone()
    }

    pub async fn register(&self, seminar_id: &str, full_name: &str, email: &str, phone: &str) -> Response {
        let payload = serde_json::json!({
            "full_name": full_name,
            "email": email,
            "phone": phone,
            "seminar_id": seminar_id
        });
        self.request("POST", "/api/v1/registrations", Some(payload), None).await
    }
}

pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
