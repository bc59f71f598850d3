//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use kernel::id::{AdministratorId, CourseId, LearnerId, ModuleId};

use crate::domain::entity::{
    completion::ModuleCompletion,
    course::{Course, CourseChanges, NewCourse},
    module::{Module, ModuleChanges, NewModule},
};
use crate::error::CatalogResult;

/// Course repository trait
#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    async fn create_course(&self, course: &NewCourse) -> CatalogResult<Course>;

    async fn find_course(&self, id: CourseId) -> CatalogResult<Option<Course>>;

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> CatalogResult<Option<Course>>;

    /// Delete a course and its modules; `false` if it did not exist
    ///
    /// A course referenced by payments fails with `CourseInUse`.
    async fn delete_course(&self, id: CourseId) -> CatalogResult<bool>;

    /// Courses created by the administrator, oldest first
    async fn list_owned(&self, owner: AdministratorId) -> CatalogResult<Vec<Course>>;

    /// Courses the learner holds a `success` payment for
    async fn list_purchased(&self, learner: LearnerId) -> CatalogResult<Vec<Course>>;

    /// Whether the learner holds a `success` payment for the course
    async fn is_entitled(&self, learner: LearnerId, course: CourseId) -> CatalogResult<bool>;
}

/// Module and completion repository trait
#[trait_variant::make(ModuleRepository: Send)]
pub trait LocalModuleRepository {
    async fn create_module(&self, module: &NewModule) -> CatalogResult<Module>;

    async fn find_module(&self, id: ModuleId) -> CatalogResult<Option<Module>>;

    async fn update_module(
        &self,
        id: ModuleId,
        changes: &ModuleChanges,
    ) -> CatalogResult<Option<Module>>;

    async fn delete_module(&self, id: ModuleId) -> CatalogResult<bool>;

    /// Modules of a course ordered by id
    async fn list_modules(&self, course: CourseId) -> CatalogResult<Vec<Module>>;

    /// The learner's completion records for the modules of a course
    async fn list_completions(
        &self,
        learner: LearnerId,
        course: CourseId,
    ) -> CatalogResult<Vec<ModuleCompletion>>;

    /// Flip the learner's completion flag for a module in one atomic step
    ///
    /// A missing record is created as completed.
    async fn toggle_completion(
        &self,
        learner: LearnerId,
        module: ModuleId,
    ) -> CatalogResult<ModuleCompletion>;
}
