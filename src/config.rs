use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    Cloudinary,
}

#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub app_env: String,
    pub display_timezone: String,
    pub storage_backend: StorageBackend,
    pub upload_dir: PathBuf,
    pub public_base_url: String,
    pub cloudinary: Option<CloudinaryConfig>,
}

impl Config {
    pub fn from_env() -> Self {
        let storage_backend = match env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".to_string()).as_str() {
            "cloudinary" => StorageBackend::Cloudinary,
            "local" => StorageBackend::Local,
            other => panic!("STORAGE_BACKEND must be 'local' or 'cloudinary', got '{}'", other),
        };

        let cloudinary = match (
            env::var("CLOUDINARY_CLOUD_NAME"),
            env::var("CLOUDINARY_API_KEY"),
            env::var("CLOUDINARY_API_SECRET"),
        ) {
            (Ok(cloud_name), Ok(api_key), Ok(api_secret)) => Some(CloudinaryConfig { cloud_name, api_key, api_secret }),
            _ => None,
        };

        if storage_backend == StorageBackend::Cloudinary && cloudinary.is_none() {
            panic!("CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set for the cloudinary backend");
        }

        let display_timezone = env::var("DISPLAY_TIMEZONE").unwrap_or_else(|_| "Europe/Istanbul".to_string());
        if display_timezone.parse::<chrono_tz::Tz>().is_err() {
            panic!("DISPLAY_TIMEZONE '{}' is not a known IANA timezone", display_timezone);
        }

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.seminar-registration.local".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            display_timezone,
            storage_backend,
            upload_dir: PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "./uploads".to_string())),
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            cloudinary,
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn timezone(&self) -> chrono_tz::Tz {
        self.display_timezone.parse().unwrap_or(chrono_tz::Europe::Istanbul)
    }
}
