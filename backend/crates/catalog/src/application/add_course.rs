//! Add Course Use Case

use std::sync::Arc;

use kernel::id::AdministratorId;
use kernel::validation::Violations;

use crate::application::course_input::{CourseInput, ImageSource};
use crate::domain::entity::course::{Course, NewCourse};
use crate::domain::image_store::ImageStore;
use crate::domain::repository::CourseRepository;
use crate::error::CatalogResult;

/// Add course use case
pub struct AddCourseUseCase<R, S>
where
    R: CourseRepository,
    S: ImageStore,
{
    repo: Arc<R>,
    images: Arc<S>,
}

impl<R, S> AddCourseUseCase<R, S>
where
    R: CourseRepository,
    S: ImageStore,
{
    pub fn new(repo: Arc<R>, images: Arc<S>) -> Self {
        Self { repo, images }
    }

    /// Title, description, price, and an image (file or link) are required
    pub async fn execute(&self, owner: AdministratorId, input: CourseInput) -> CatalogResult<Course> {
        let mut violations = Violations::new();
        for (field, message) in input.missing_required() {
            violations.add(field, message);
        }
        let form = input.validate(&mut violations);

        let (Some(title), Some(description), Some(price), Some(image)) =
            (form.title, form.description, form.price, form.image)
        else {
            return Err(violations.into_error().into());
        };
        violations.into_result()?;

        // Upload only after every field validated
        let image_url = match image {
            ImageSource::Upload(upload) => self.images.upload(&upload).await?,
            ImageSource::Link(link) => link,
        };

        let course = self
            .repo
            .create_course(&NewCourse {
                title,
                description,
                price,
                category: form.category,
                image_url,
                owner_id: owner,
            })
            .await?;

        tracing::info!(course_id = %course.id, owner_id = %owner, "Course created");
        Ok(course)
    }
}
