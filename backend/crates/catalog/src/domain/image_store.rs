//! Object store for course images

use crate::domain::value_object::image_link::ImageLink;
use crate::error::CatalogResult;

/// Uploaded image file
#[derive(Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("file_name", &self.file_name)
            .finish()
    }
}

/// Accepts a blob and returns its public URL
#[trait_variant::make(ImageStore: Send)]
pub trait LocalImageStore {
    /// Failures surface as `CatalogError::Upload`
    async fn upload(&self, image: &ImageUpload) -> CatalogResult<ImageLink>;
}
