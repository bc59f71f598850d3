//! Application Layer
//!
//! Course, module, and progress use cases.

pub mod add_course;
pub mod config;
pub mod course_input;
pub mod delete_course;
pub mod list_courses;
pub mod modules;
pub mod progress;
pub mod update_course;

// Re-exports
pub use add_course::AddCourseUseCase;
pub use config::{CatalogConfig, CloudinaryConfig};
pub use course_input::CourseInput;
pub use delete_course::DeleteCourseUseCase;
pub use list_courses::{ListOwnedCoursesUseCase, ListPurchasedCoursesUseCase};
pub use modules::{
    AddModuleUseCase, DeleteModuleUseCase, ListModulesUseCase, ModuleInput, UpdateModuleUseCase,
};
pub use progress::{ModuleProgress, ProgressReport, ProgressUseCase, ToggleCompletionUseCase};
pub use update_course::UpdateCourseUseCase;
