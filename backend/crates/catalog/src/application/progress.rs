//! Progress Use Cases
//!
//! Completion toggling and the per-course progress report. Both require
//! the learner to be entitled to the course.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{CourseId, LearnerId, ModuleId};

use crate::application::modules::entitled_course;
use crate::domain::entity::completion::ModuleCompletion;
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::domain::value_object::percentage::Percentage;
use crate::error::{CatalogError, CatalogResult};

/// One module's line in a progress report
#[derive(Debug, Clone)]
pub struct ModuleProgress {
    pub module_id: ModuleId,
    pub title: String,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Progress through a course
#[derive(Debug, Clone)]
pub struct ProgressReport {
    pub course_id: CourseId,
    pub modules: Vec<ModuleProgress>,
    pub completed: usize,
    pub total: usize,
    pub percentage: Percentage,
}

/// Progress use case
pub struct ProgressUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> ProgressUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Checks run in order: course exists, learner entitled, modules exist
    pub async fn execute(&self, learner: LearnerId, course_id: CourseId) -> CatalogResult<ProgressReport> {
        entitled_course(self.repo.as_ref(), learner, course_id).await?;

        let modules = self.repo.list_modules(course_id).await?;
        let completions: HashMap<ModuleId, ModuleCompletion> = self
            .repo
            .list_completions(learner, course_id)
            .await?
            .into_iter()
            .map(|c| (c.module_id, c))
            .collect();

        let lines: Vec<ModuleProgress> = modules
            .into_iter()
            .map(|module| {
                let record = completions.get(&module.id);
                let is_completed = record.is_some_and(|r| r.is_completed);
                ModuleProgress {
                    module_id: module.id,
                    title: module.title.as_str().to_string(),
                    is_completed,
                    completed_at: record.and_then(|r| r.completed_at).filter(|_| is_completed),
                }
            })
            .collect();

        let total = lines.len();
        let completed = lines.iter().filter(|l| l.is_completed).count();
        let percentage = Percentage::of(completed, total).ok_or(CatalogError::NoModules)?;

        Ok(ProgressReport {
            course_id,
            modules: lines,
            completed,
            total,
            percentage,
        })
    }
}

/// Toggle completion use case
pub struct ToggleCompletionUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    repo: Arc<R>,
}

impl<R> ToggleCompletionUseCase<R>
where
    R: CourseRepository + ModuleRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, learner: LearnerId, module_id: ModuleId) -> CatalogResult<ModuleCompletion> {
        let module = self
            .repo
            .find_module(module_id)
            .await?
            .ok_or(CatalogError::ModuleNotFound)?;
        entitled_course(self.repo.as_ref(), learner, module.course_id).await?;

        let record = self.repo.toggle_completion(learner, module_id).await?;

        tracing::info!(
            learner_id = %learner,
            module_id = %module_id,
            is_completed = record.is_completed,
            "Module completion toggled"
        );
        Ok(record)
    }
}
