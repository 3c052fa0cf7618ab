use crate::domain::models::upload::{ImageUpload, StoredObject};
use crate::domain::ports::ObjectStorage;
use crate::error::AppError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{error, info};
use uuid::Uuid;

pub const LOCAL_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Writes images under `root`; the router serves that directory at `/uploads`.
pub struct LocalDiskStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDiskStorage {
    pub fn new(root: PathBuf, public_base_url: String) -> Self {
        Self { root, public_base_url }
    }
}

#[async_trait]
impl ObjectStorage for LocalDiskStorage {
    fn max_upload_bytes(&self) -> usize {
        LOCAL_MAX_UPLOAD_BYTES
    }

    async fn store_image(&self, image: ImageUpload) -> Result<StoredObject, AppError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            error!("Cannot create upload dir {:?}: {}", self.root, e);
            AppError::Storage(format!("create_dir_all failed: {}", e))
        })?;

        let public_id = Uuid::new_v4().to_string();
        let file_name = format!("{}.{}", public_id, image.kind.extension());
        let path = self.root.join(&file_name);

        tokio::fs::write(&path, &image.bytes).await.map_err(|e| {
            error!("Cannot write upload {:?}: {}", path, e);
            AppError::Storage(format!("write failed: {}", e))
        })?;

        info!("Stored image {} ({} bytes)", file_name, image.bytes.len());

        Ok(StoredObject {
            url: format!("{}/uploads/{}", self.public_base_url.trim_end_matches('/'), file_name),
            public_id,
        })
    }
}
