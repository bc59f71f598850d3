//! Course Entity

use chrono::{DateTime, Utc};
use kernel::id::{AdministratorId, CourseId};

use crate::domain::value_object::{
    image_link::ImageLink,
    price::Price,
    text::{Description, Title},
};

/// Course offered by an administrator
#[derive(Debug, Clone)]
pub struct Course {
    pub id: CourseId,
    pub title: Title,
    pub description: Description,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: ImageLink,
    pub owner_id: AdministratorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn is_owned_by(&self, admin: AdministratorId) -> bool {
        self.owner_id == admin
    }
}

/// Validated course data for insertion
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: Title,
    pub description: Description,
    pub price: Price,
    pub category: Option<String>,
    pub image_url: ImageLink,
    pub owner_id: AdministratorId,
}

/// Partial course update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct CourseChanges {
    pub title: Option<Title>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub image_url: Option<ImageLink>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
    }

    /// Apply the changes to a course in place
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(category) = &self.category {
            course.category = Some(category.clone());
        }
        if let Some(image_url) = &self.image_url {
            course.image_url = image_url.clone();
        }
        course.updated_at = Utc::now();
    }
}
