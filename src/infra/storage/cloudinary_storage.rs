use crate::config::CloudinaryConfig;
use crate::domain::models::upload::{ImageUpload, StoredObject};
use crate::domain::ports::ObjectStorage;
use crate::error::AppError;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{error, info};

pub const CLOUDINARY_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const UPLOAD_FOLDER: &str = "seminar-registration";
// 9:16 portrait crop, automatic quality and format
const UPLOAD_TRANSFORMATION: &str = "c_fill,g_auto,h_1920,w_1080/q_auto:good/f_auto";

pub struct CloudinaryStorage {
    client: Client,
    config: CloudinaryConfig,
}

impl CloudinaryStorage {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!("https://api.cloudinary.com/v1_1/{}/image/upload", self.config.cloud_name)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Cloudinary request signature: params sorted by key, joined as
/// `k=v&k=v`, the API secret appended, then SHA-256 hex.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted.iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ObjectStorage for CloudinaryStorage {
    fn max_upload_bytes(&self) -> usize {
        CLOUDINARY_MAX_UPLOAD_BYTES
    }

    async fn store_image(&self, image: ImageUpload) -> Result<StoredObject, AppError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", UPLOAD_FOLDER),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.config.api_secret,
        );

        let data_uri = format!(
            "data:{};base64,{}",
            image.kind.mime(),
            general_purpose::STANDARD.encode(&image.bytes)
        );

        let form = [
            ("file", data_uri.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("folder", UPLOAD_FOLDER),
            ("transformation", UPLOAD_TRANSFORMATION),
            ("signature", signature.as_str()),
            ("signature_algorithm", "sha256"),
        ];

        let res = self.client.post(self.upload_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Cloudinary connection error: {}", e);
                error!("{}", msg);
                AppError::Storage(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Cloudinary upload failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Storage(msg));
        }

        let body: UploadResponse = res.json().await.map_err(|e| {
            AppError::Storage(format!("Unexpected Cloudinary response: {}", e))
        })?;

        info!("Image uploaded to Cloudinary: {}", body.public_id);

        Ok(StoredObject {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_sorts_params() {
        let sig = sign_params(&[("timestamp", "1315060510"), ("public_id", "sample_image")], "abcd");
        let same = sign_params(&[("public_id", "sample_image"), ("timestamp", "1315060510")], "abcd");
        assert_eq!(sig, same);
        assert_eq!(sig, "e3c44b54e67a3ecc918f5d7236ca5faa36250ea8a8cd6cbabfd2d6bb2453acac");
    }
}
