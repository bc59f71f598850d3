//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Course, module, and completion entities, repository and
//!   object-store traits
//! - `application/` - Use cases and progress aggregation
//! - `infra/` - Postgres, in-memory, and Cloudinary implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Access Model
//! - Administrators manage the courses they own and the modules they created
//! - Learners read modules and track progress of courses they paid for

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::{CatalogConfig, CloudinaryConfig};
pub use domain::image_store::{ImageStore, ImageUpload};
pub use domain::repository::{CourseRepository, ModuleRepository};
pub use error::{CatalogError, CatalogResult};
pub use infra::{CloudinaryImageStore, InMemoryCatalogRepository, PgCatalogRepository};
pub use presentation::{CatalogAppState, catalog_router};
