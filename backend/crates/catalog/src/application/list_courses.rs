//! Course Listing Use Cases

use std::sync::Arc;

use kernel::id::{AdministratorId, LearnerId};

use crate::domain::entity::course::Course;
use crate::domain::repository::CourseRepository;
use crate::error::{CatalogError, CatalogResult};

/// Courses created by an administrator (possibly empty)
pub struct ListOwnedCoursesUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
}

impl<R> ListOwnedCoursesUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: AdministratorId) -> CatalogResult<Vec<Course>> {
        self.repo.list_owned(owner).await
    }
}

/// Courses a learner has paid for; none is `NoPurchasedCourses`
pub struct ListPurchasedCoursesUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
}

impl<R> ListPurchasedCoursesUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, learner: LearnerId) -> CatalogResult<Vec<Course>> {
        let courses = self.repo.list_purchased(learner).await?;
        if courses.is_empty() {
            return Err(CatalogError::NoPurchasedCourses);
        }
        Ok(courses)
    }
}
