//! Module Entity
//!
//! A unit of course content. The creating administrator is recorded
//! separately from the course owner and is the only one who may edit it.

use chrono::{DateTime, Utc};
use kernel::id::{AdministratorId, CourseId, ModuleId};

use crate::domain::value_object::text::{Description, Title};

/// Course module
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub course_id: CourseId,
    pub admin_id: AdministratorId,
    pub title: Title,
    pub description: Option<Description>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    pub fn is_created_by(&self, admin: AdministratorId) -> bool {
        self.admin_id == admin
    }
}

/// Validated module data for insertion
#[derive(Debug, Clone)]
pub struct NewModule {
    pub course_id: CourseId,
    pub admin_id: AdministratorId,
    pub title: Title,
    pub description: Option<Description>,
}

/// Partial module update
#[derive(Debug, Clone, Default)]
pub struct ModuleChanges {
    pub title: Option<Title>,
    pub description: Option<Description>,
}

impl ModuleChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    pub fn apply_to(&self, module: &mut Module) {
        if let Some(title) = &self.title {
            module.title = title.clone();
        }
        if let Some(description) = &self.description {
            module.description = Some(description.clone());
        }
        module.updated_at = Utc::now();
    }
}
