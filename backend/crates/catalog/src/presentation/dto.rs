//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{ModuleProgress, ProgressReport};
use crate::domain::entity::{completion::ModuleCompletion, course::Course, module::Module};
use crate::domain::value_object::percentage::Percentage;

// ============================================================================
// Courses
// ============================================================================

/// Course body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub category: Option<String>,
    pub image_url: String,
    pub admin_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.value(),
            title: course.title.as_str().to_string(),
            description: course.description.as_str().to_string(),
            price: course.price.value(),
            category: course.category.clone(),
            image_url: course.image_url.as_str().to_string(),
            admin_id: course.owner_id.value(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

// ============================================================================
// Modules
// ============================================================================

/// Add or update module request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Module body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub id: i64,
    pub course_id: i64,
    pub admin_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Module> for ModuleResponse {
    fn from(module: &Module) -> Self {
        Self {
            id: module.id.value(),
            course_id: module.course_id.value(),
            admin_id: module.admin_id.value(),
            title: module.title.as_str().to_string(),
            description: module.description.as_ref().map(|d| d.as_str().to_string()),
            created_at: module.created_at,
            updated_at: module.updated_at,
        }
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Completion record after a toggle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub module_id: i64,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&ModuleCompletion> for CompletionResponse {
    fn from(record: &ModuleCompletion) -> Self {
        Self {
            module_id: record.module_id.value(),
            is_completed: record.is_completed,
            completed_at: record.completed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgressResponse {
    pub module_id: i64,
    pub title: String,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&ModuleProgress> for ModuleProgressResponse {
    fn from(line: &ModuleProgress) -> Self {
        Self {
            module_id: line.module_id.value(),
            title: line.title.clone(),
            is_completed: line.is_completed,
            completed_at: line.completed_at,
        }
    }
}

/// Progress through a course; `completionPercentage` renders as `"50.00"`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub course_id: i64,
    pub modules: Vec<ModuleProgressResponse>,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub completion_percentage: Percentage,
}

impl From<&ProgressReport> for ProgressResponse {
    fn from(report: &ProgressReport) -> Self {
        Self {
            course_id: report.course_id.value(),
            modules: report.modules.iter().map(ModuleProgressResponse::from).collect(),
            completed_modules: report.completed,
            total_modules: report.total,
            completion_percentage: report.percentage,
        }
    }
}
