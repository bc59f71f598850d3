//! Course form validation shared by add and update

use kernel::validation::Violations;

use crate::domain::image_store::ImageUpload;
use crate::domain::value_object::{
    image_link::ImageLink,
    price::Price,
    text::{Description, Title},
};

/// Raw course form; every field optional so add and update share it
#[derive(Debug, Default)]
pub struct CourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub image_link: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Where the course image comes from
#[derive(Debug)]
pub(crate) enum ImageSource {
    Upload(ImageUpload),
    Link(ImageLink),
}

/// Field-validated course form
#[derive(Debug, Default)]
pub(crate) struct ValidatedCourse {
    pub title: Option<Title>,
    pub description: Option<Description>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub image: Option<ImageSource>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CourseInput {
    /// Required-on-create fields that are absent or blank
    pub(crate) fn missing_required(&self) -> Vec<(&'static str, &'static str)> {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(|s| s.trim().is_empty());
        let mut missing = Vec::new();
        if blank(&self.title) {
            missing.push(("title", "Title is required"));
        }
        if blank(&self.description) {
            missing.push(("description", "Description is required"));
        }
        if blank(&self.price) {
            missing.push(("price", "Price is required"));
        }
        let has_file = self.image.as_ref().is_some_and(|i| !i.bytes.is_empty());
        if !has_file && blank(&self.image_link) {
            missing.push(("image", "Provide an image file or an imageLink"));
        }
        missing
    }

    /// Validate every present field, collecting all violations
    ///
    /// Blank fields count as absent. A file wins over `imageLink`.
    pub(crate) fn validate(self, violations: &mut Violations) -> ValidatedCourse {
        let image = match (self.image, present(self.image_link)) {
            (Some(upload), _) if !upload.bytes.is_empty() => Some(ImageSource::Upload(upload)),
            (_, Some(link)) => violations
                .check("imageLink", ImageLink::new(&link))
                .map(ImageSource::Link),
            _ => None,
        };

        ValidatedCourse {
            title: present(self.title).and_then(|t| violations.check("title", Title::new(&t))),
            description: present(self.description)
                .and_then(|d| violations.check("description", Description::new(&d))),
            price: present(self.price).and_then(|p| violations.check("price", Price::parse(&p))),
            category: present(self.category).map(|c| c.trim().to_string()),
            image,
        }
    }
}
