//! Module Use Cases
//!
//! Administrators manage modules of the courses they own; learners read
//! the modules of the courses they are entitled to.

use std::sync::Arc;

use kernel::id::{AdministratorId, CourseId, LearnerId, ModuleId};
use kernel::validation::Violations;

use crate::domain::entity::course::Course;
use crate::domain::entity::module::{Module, ModuleChanges, NewModule};
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::domain::value_object::text::{Description, Title};
use crate::error::{CatalogError, CatalogResult};

/// Module form
#[derive(Debug, Default)]
pub struct ModuleInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ModuleInput {
    fn validate(self, violations: &mut Violations) -> ModuleChanges {
        ModuleChanges {
            title: self
                .title
                .filter(|t| !t.trim().is_empty())
                .and_then(|t| violations.check("title", Title::new(&t))),
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .and_then(|d| violations.check("description", Description::new(&d))),
        }
    }
}

/// Load a course and require `admin` to own it
pub(crate) async fn owned_course<R: CourseRepository>(
    repo: &R,
    admin: AdministratorId,
    course_id: CourseId,
) -> CatalogResult<Course> {
    let course = repo
        .find_course(course_id)
        .await?
        .ok_or(CatalogError::CourseNotFound)?;
    if !course.is_owned_by(admin) {
        return Err(CatalogError::Forbidden);
    }
    Ok(course)
}

/// Require an existing course and a `success` payment for it
pub(crate) async fn entitled_course<R: CourseRepository>(
    repo: &R,
    learner: LearnerId,
    course_id: CourseId,
) -> CatalogResult<Course> {
    let course = repo
        .find_course(course_id)
        .await?
        .ok_or(CatalogError::CourseNotFound)?;
    if !repo.is_entitled(learner, course_id).await? {
        tracing::debug!(learner_id = %learner, course_id = %course_id, "Learner not entitled");
        return Err(CatalogError::Forbidden);
    }
    Ok(course)
}

/// Load a module and require `admin` to have created it
async fn created_module<R: ModuleRepository>(
    repo: &R,
    admin: AdministratorId,
    module_id: ModuleId,
) -> CatalogResult<Module> {
    let module = repo
        .find_module(module_id)
        .await?
        .ok_or(CatalogError::ModuleNotFound)?;
    if !module.is_created_by(admin) {
        return Err(CatalogError::Forbidden);
    }
    Ok(module)
}

// ============================================================================
// Administrator side
// ============================================================================

/// Add module use case
pub struct AddModuleUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> AddModuleUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        admin: AdministratorId,
        course_id: CourseId,
        input: ModuleInput,
    ) -> CatalogResult<Module> {
        let mut violations = Violations::new();
        if input.title.as_deref().is_none_or(|t| t.trim().is_empty()) {
            violations.add("title", "Title is required");
        }
        let changes = input.validate(&mut violations);
        let Some(title) = changes.title else {
            return Err(violations.into_error().into());
        };
        violations.into_result()?;

        owned_course(self.repo.as_ref(), admin, course_id).await?;

        let module = self
            .repo
            .create_module(&NewModule {
                course_id,
                admin_id: admin,
                title,
                description: changes.description,
            })
            .await?;

        tracing::info!(module_id = %module.id, course_id = %course_id, "Module created");
        Ok(module)
    }
}

/// Update module use case (creator only)
pub struct UpdateModuleUseCase<R>
where
    R: ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateModuleUseCase<R>
where
    R: ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        admin: AdministratorId,
        module_id: ModuleId,
        input: ModuleInput,
    ) -> CatalogResult<Module> {
        let mut violations = Violations::new();
        let changes = input.validate(&mut violations);
        violations.into_result()?;
        if changes.is_empty() {
            return Err(CatalogError::invalid_field(
                "title",
                "At least one field must be provided",
            ));
        }

        created_module(self.repo.as_ref(), admin, module_id).await?;

        let module = self
            .repo
            .update_module(module_id, &changes)
            .await?
            .ok_or(CatalogError::ModuleNotFound)?;

        tracing::info!(module_id = %module_id, "Module updated");
        Ok(module)
    }
}

/// Delete module use case (creator only)
pub struct DeleteModuleUseCase<R>
where
    R: ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteModuleUseCase<R>
where
    R: ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, admin: AdministratorId, module_id: ModuleId) -> CatalogResult<()> {
        created_module(self.repo.as_ref(), admin, module_id).await?;

        if !self.repo.delete_module(module_id).await? {
            return Err(CatalogError::ModuleNotFound);
        }

        tracing::info!(module_id = %module_id, "Module deleted");
        Ok(())
    }
}

// ============================================================================
// Listing
// ============================================================================

/// List modules use case
///
/// An empty list is `NoModules` for either caller.
pub struct ListModulesUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> ListModulesUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Modules of a course the administrator owns
    pub async fn for_owner(
        &self,
        admin: AdministratorId,
        course_id: CourseId,
    ) -> CatalogResult<Vec<Module>> {
        owned_course(self.repo.as_ref(), admin, course_id).await?;
        self.non_empty(course_id).await
    }

    /// Modules of a course the learner is entitled to
    pub async fn for_learner(
        &self,
        learner: LearnerId,
        course_id: CourseId,
    ) -> CatalogResult<Vec<Module>> {
        entitled_course(self.repo.as_ref(), learner, course_id).await?;
        self.non_empty(course_id).await
    }

    async fn non_empty(&self, course_id: CourseId) -> CatalogResult<Vec<Module>> {
        let modules = self.repo.list_modules(course_id).await?;
        if modules.is_empty() {
            return Err(CatalogError::NoModules);
        }
        Ok(modules)
    }
}
