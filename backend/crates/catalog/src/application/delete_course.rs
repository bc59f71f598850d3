//! Delete Course Use Case

use std::sync::Arc;

use kernel::id::{AdministratorId, CourseId};

use crate::domain::repository::CourseRepository;
use crate::error::{CatalogError, CatalogResult};

/// Delete course use case; the course's modules go with it
pub struct DeleteCourseUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCourseUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: AdministratorId, course_id: CourseId) -> CatalogResult<()> {
        let course = self
            .repo
            .find_course(course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound)?;
        if !course.is_owned_by(owner) {
            return Err(CatalogError::Forbidden);
        }

        if !self.repo.delete_course(course_id).await? {
            return Err(CatalogError::CourseNotFound);
        }

        tracing::info!(course_id = %course_id, "Course deleted");
        Ok(())
    }
}
