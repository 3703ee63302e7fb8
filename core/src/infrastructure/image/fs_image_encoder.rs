use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    common::entities::app_errors::CoreError,
    diagnosis::{entities::EncodedImage, ports::ImageEncoder},
};

/// Reads images from the local filesystem and base64-encodes them.
#[derive(Debug, Clone, Default)]
pub struct FsImageEncoder;

impl FsImageEncoder {
    pub fn new() -> Self {
        Self
    }

    fn mime_type(path: &Path) -> &'static str {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        }
    }
}

impl ImageEncoder for FsImageEncoder {
    async fn encode(&self, path: PathBuf) -> Result<EncodedImage, CoreError> {
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            tracing::error!(path = %path.display(), "Failed to read image: {}", e);
            CoreError::ImageReadError(format!("{}: {}", path.display(), e))
        })?;

        Ok(EncodedImage {
            mime_type: Self::mime_type(&path).to_string(),
            data: general_purpose::STANDARD.encode(&bytes),
        })
    }
}
