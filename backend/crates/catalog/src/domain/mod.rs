//! Domain Layer
//!
//! Course, module, and completion entities, value objects, and the
//! persistence and object-store interfaces.

pub mod entity;
pub mod image_store;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::completion::ModuleCompletion;
pub use entity::course::{Course, CourseChanges, NewCourse};
pub use entity::module::{Module, ModuleChanges, NewModule};
pub use image_store::{ImageStore, ImageUpload};
pub use repository::{CourseRepository, ModuleRepository};
