//! Cloudinary Image Store
//!
//! Signed JSON upload of a base64 data URI. The signature is the SHA-1 of
//! the sorted signed parameters followed by the API secret.

use chrono::Utc;
use platform::crypto::{sha1_hex, to_base64};
use serde::{Deserialize, Serialize};

use crate::application::config::{CatalogConfig, CloudinaryConfig};
use crate::domain::image_store::{ImageStore, ImageUpload};
use crate::domain::value_object::image_link::ImageLink;
use crate::error::{CatalogError, CatalogResult};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Serialize)]
struct UploadRequest<'a> {
    file: String,
    api_key: &'a str,
    timestamp: i64,
    signature: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Cloudinary-backed [`ImageStore`]
#[derive(Debug, Clone)]
pub struct CloudinaryImageStore {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upload_timeout)
            .build()
            .map_err(|e| CatalogError::Internal(format!("http client: {e}")))?;

        Ok(Self {
            client,
            config: config.cloudinary.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    fn sign(&self, timestamp: i64) -> String {
        sha1_hex(format!("timestamp={timestamp}{}", self.config.api_secret).as_bytes())
    }
}

impl ImageStore for CloudinaryImageStore {
    async fn upload(&self, image: &ImageUpload) -> CatalogResult<ImageLink> {
        let timestamp = Utc::now().timestamp();
        let mime = image
            .content_type
            .as_deref()
            .unwrap_or(FALLBACK_CONTENT_TYPE);

        let body = UploadRequest {
            file: format!("data:{mime};base64,{}", to_base64(&image.bytes)),
            api_key: &self.config.api_key,
            timestamp,
            signature: self.sign(timestamp),
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| CatalogError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upload(format!("object store returned {status}")));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Upload(format!("unreadable upload response: {e}")))?;

        let link = ImageLink::new(&uploaded.secure_url)
            .map_err(|_| CatalogError::Upload("object store returned an invalid URL".into()))?;

        tracing::info!(bytes = image.bytes.len(), url = %link, "Image uploaded");
        Ok(link)
    }
}
