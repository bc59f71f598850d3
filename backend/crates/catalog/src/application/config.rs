//! Catalog Configuration

use std::fmt;
use std::time::Duration;

/// Default object-store base URL
pub const DEFAULT_CLOUDINARY_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Default upstream request timeout
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Default cap on an uploaded image (5 MiB)
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Cloudinary credentials
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub base_url: String,
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            base_url: DEFAULT_CLOUDINARY_BASE_URL.to_string(),
        }
    }
}

impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub cloudinary: CloudinaryConfig,
    /// Timeout for object-store requests
    pub upload_timeout: Duration,
    /// Largest accepted image, also the multipart body limit
    pub max_image_bytes: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cloudinary: CloudinaryConfig::default(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}

impl CatalogConfig {
    /// Create config for development (placeholder credentials)
    pub fn development() -> Self {
        Self {
            cloudinary: CloudinaryConfig {
                cloud_name: "demo".to_string(),
                api_key: "dev".to_string(),
                api_secret: "dev-secret".to_string(),
                ..CloudinaryConfig::default()
            },
            ..Self::default()
        }
    }
}
