//! In-memory Repository Implementation
//!
//! Backs tests. One lock guards every table, so the completion toggle is
//! atomic the same way the Postgres upsert is.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{AdministratorId, CourseId, Id, LearnerId, ModuleId};
use tokio::sync::Mutex;

use crate::domain::entity::{
    completion::ModuleCompletion,
    course::{Course, CourseChanges, NewCourse},
    module::{Module, ModuleChanges, NewModule},
};
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    courses: BTreeMap<i64, Course>,
    modules: BTreeMap<i64, Module>,
    completions: HashMap<(i64, i64), ModuleCompletion>,
    /// (learner, course) pairs with a `success` payment
    entitlements: HashSet<(i64, i64)>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory catalog repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogRepository {
    inner: Arc<Mutex<Tables>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful purchase
    pub async fn grant_entitlement(&self, learner: LearnerId, course: CourseId) {
        let mut tables = self.inner.lock().await;
        tables.entitlements.insert((learner.value(), course.value()));
    }
}

impl CourseRepository for InMemoryCatalogRepository {
    async fn create_course(&self, course: &NewCourse) -> CatalogResult<Course> {
        let mut tables = self.inner.lock().await;
        let id = tables.next_id();
        let now = Utc::now();
        let created = Course {
            id: Id::new(id),
            title: course.title.clone(),
            description: course.description.clone(),
            price: course.price,
            category: course.category.clone(),
            image_url: course.image_url.clone(),
            owner_id: course.owner_id,
            created_at: now,
            updated_at: now,
        };
        tables.courses.insert(id, created.clone());
        Ok(created)
    }

    async fn find_course(&self, id: CourseId) -> CatalogResult<Option<Course>> {
        let tables = self.inner.lock().await;
        Ok(tables.courses.get(&id.value()).cloned())
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> CatalogResult<Option<Course>> {
        let mut tables = self.inner.lock().await;
        Ok(tables.courses.get_mut(&id.value()).map(|course| {
            changes.apply_to(course);
            course.clone()
        }))
    }

    async fn delete_course(&self, id: CourseId) -> CatalogResult<bool> {
        let mut tables = self.inner.lock().await;
        if tables.entitlements.iter().any(|(_, course)| *course == id.value()) {
            return Err(CatalogError::CourseInUse);
        }
        if tables.courses.remove(&id.value()).is_none() {
            return Ok(false);
        }

        let removed: HashSet<i64> = tables
            .modules
            .values()
            .filter(|m| m.course_id == id)
            .map(|m| m.id.value())
            .collect();
        tables.modules.retain(|module_id, _| !removed.contains(module_id));
        tables
            .completions
            .retain(|(_, module_id), _| !removed.contains(module_id));
        Ok(true)
    }

    async fn list_owned(&self, owner: AdministratorId) -> CatalogResult<Vec<Course>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .courses
            .values()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn list_purchased(&self, learner: LearnerId) -> CatalogResult<Vec<Course>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .courses
            .values()
            .filter(|c| {
                tables
                    .entitlements
                    .contains(&(learner.value(), c.id.value()))
            })
            .cloned()
            .collect())
    }

    async fn is_entitled(&self, learner: LearnerId, course: CourseId) -> CatalogResult<bool> {
        let tables = self.inner.lock().await;
        Ok(tables
            .entitlements
            .contains(&(learner.value(), course.value())))
    }
}

impl ModuleRepository for InMemoryCatalogRepository {
    async fn create_module(&self, module: &NewModule) -> CatalogResult<Module> {
        let mut tables = self.inner.lock().await;
        if !tables.courses.contains_key(&module.course_id.value()) {
            return Err(CatalogError::CourseNotFound);
        }
        let id = tables.next_id();
        let now = Utc::now();
        let created = Module {
            id: Id::new(id),
            course_id: module.course_id,
            admin_id: module.admin_id,
            title: module.title.clone(),
            description: module.description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.modules.insert(id, created.clone());
        Ok(created)
    }

    async fn find_module(&self, id: ModuleId) -> CatalogResult<Option<Module>> {
        let tables = self.inner.lock().await;
        Ok(tables.modules.get(&id.value()).cloned())
    }

    async fn update_module(
        &self,
        id: ModuleId,
        changes: &ModuleChanges,
    ) -> CatalogResult<Option<Module>> {
        let mut tables = self.inner.lock().await;
        Ok(tables.modules.get_mut(&id.value()).map(|module| {
            changes.apply_to(module);
            module.clone()
        }))
    }

    async fn delete_module(&self, id: ModuleId) -> CatalogResult<bool> {
        let mut tables = self.inner.lock().await;
        let removed = tables.modules.remove(&id.value()).is_some();
        tables
            .completions
            .retain(|(_, module_id), _| *module_id != id.value());
        Ok(removed)
    }

    async fn list_modules(&self, course: CourseId) -> CatalogResult<Vec<Module>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .modules
            .values()
            .filter(|m| m.course_id == course)
            .cloned()
            .collect())
    }

    async fn list_completions(
        &self,
        learner: LearnerId,
        course: CourseId,
    ) -> CatalogResult<Vec<ModuleCompletion>> {
        let tables = self.inner.lock().await;
        Ok(tables
            .completions
            .values()
            .filter(|c| c.learner_id == learner)
            .filter(|c| {
                tables
                    .modules
                    .get(&c.module_id.value())
                    .is_some_and(|m| m.course_id == course)
            })
            .cloned()
            .collect())
    }

    async fn toggle_completion(
        &self,
        learner: LearnerId,
        module: ModuleId,
    ) -> CatalogResult<ModuleCompletion> {
        let mut tables = self.inner.lock().await;
        let now = Utc::now();
        let key = (learner.value(), module.value());

        if let Some(record) = tables.completions.get_mut(&key) {
            record.toggle(now);
            return Ok(record.clone());
        }

        let id = tables.next_id();
        let record = ModuleCompletion {
            id: Id::new(id),
            learner_id: learner,
            module_id: module,
            is_completed: true,
            completed_at: Some(now),
        };
        tables.completions.insert(key, record.clone());
        Ok(record)
    }
}
