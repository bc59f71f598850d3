//! Update Course Use Case

use std::sync::Arc;

use kernel::id::{AdministratorId, CourseId};
use kernel::validation::Violations;

use crate::application::course_input::{CourseInput, ImageSource};
use crate::domain::entity::course::{Course, CourseChanges};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::CourseRepository;
use crate::error::{CatalogError, CatalogResult};

/// Update course use case
///
/// Only the owning administrator may update; the image is replaced only
/// when a new one is supplied.
pub struct UpdateCourseUseCase<R, S>
where
    R: CourseRepository,
    S: ImageStore,
{
    repo: Arc<R>,
    images: Arc<S>,
}

impl<R, S> UpdateCourseUseCase<R, S>
where
    R: CourseRepository,
    S: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<S>) -> Self {
        Self { repo, images }
    }

    pub async fn execute(
        &self,
        owner: AdministratorId,
        course_id: CourseId,
        input: CourseInput,
    ) -> CatalogResult<Course> {
        let course = self
            .repo
            .find_course(course_id)
            .await?
            .ok_or(CatalogError::CourseNotFound)?;
        if !course.is_owned_by(owner) {
            return Err(CatalogError::Forbidden);
        }

        let mut violations = Violations::new();
        let form = input.validate(&mut violations);
        violations.into_result()?;

        let image_url = match form.image {
            Some(ImageSource::Upload(upload)) => Some(self.images.upload(&upload).await?),
            Some(ImageSource::Link(link)) => Some(link),
            None => None,
        };

        let changes = CourseChanges {
            title: form.title,
            description: form.description,
            price: form.price,
            category: form.category,
            image_url,
        };
        if changes.is_empty() {
            return Err(CatalogError::invalid_field(
                "title",
                "At least one field must be provided",
            ));
        }

        let updated = self
            .repo
            .update_course(course_id, &changes)
            .await?
            .ok_or(CatalogError::CourseNotFound)?;

        tracing::info!(course_id = %course_id, "Course updated");
        Ok(updated)
    }
}
