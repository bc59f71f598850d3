//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::conversions::DatabaseErrorExt;
use kernel::id::{AdministratorId, CourseId, Id, LearnerId, ModuleId};
use sqlx::PgPool;

use crate::domain::entity::{
    completion::ModuleCompletion,
    course::{Course, CourseChanges, NewCourse},
    module::{Module, ModuleChanges, NewModule},
};
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::domain::value_object::{
    image_link::ImageLink,
    price::Price,
    text::{Description, Title},
};
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Course Repository Implementation
// ============================================================================

impl CourseRepository for PgCatalogRepository {
    async fn create_course(&self, course: &NewCourse) -> CatalogResult<Course> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            INSERT INTO courses (
                title,
                description,
                price,
                category,
                image_url,
                owner_id
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, price, category, image_url, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(course.title.as_str())
        .bind(course.description.as_str())
        .bind(course.price.value())
        .bind(course.category.as_deref())
        .bind(course.image_url.as_str())
        .bind(course.owner_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_course())
    }

    async fn find_course(&self, id: CourseId) -> CatalogResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, description, price, category, image_url, owner_id,
                   created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn update_course(
        &self,
        id: CourseId,
        changes: &CourseChanges,
    ) -> CatalogResult<Option<Course>> {
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            UPDATE courses
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                category = COALESCE($5, category),
                image_url = COALESCE($6, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, price, category, image_url, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(id.value())
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.description.as_ref().map(|d| d.as_str()))
        .bind(changes.price.map(|p| p.value()))
        .bind(changes.category.as_deref())
        .bind(changes.image_url.as_ref().map(|i| i.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseRow::into_course))
    }

    async fn delete_course(&self, id: CourseId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.is_foreign_key_violation() {
                    CatalogError::CourseInUse
                } else {
                    CatalogError::Database(e)
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_owned(&self, owner: AdministratorId) -> CatalogResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, description, price, category, image_url, owner_id,
                   created_at, updated_at
            FROM courses
            WHERE owner_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn list_purchased(&self, learner: LearnerId) -> CatalogResult<Vec<Course>> {
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT c.id, c.title, c.description, c.price, c.category, c.image_url, c.owner_id,
                   c.created_at, c.updated_at
            FROM courses c
            WHERE EXISTS (
                SELECT 1 FROM payments p
                WHERE p.course_id = c.id
                  AND p.learner_id = $1
                  AND p.status = 'success'
            )
            ORDER BY c.id
            "#,
        )
        .bind(learner.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_course).collect())
    }

    async fn is_entitled(&self, learner: LearnerId, course: CourseId) -> CatalogResult<bool> {
        let entitled: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM payments
                WHERE learner_id = $1 AND course_id = $2 AND status = 'success'
            )
            "#,
        )
        .bind(learner.value())
        .bind(course.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(entitled)
    }
}

// ============================================================================
// Module Repository Implementation
// ============================================================================

impl ModuleRepository for PgCatalogRepository {
    async fn create_module(&self, module: &NewModule) -> CatalogResult<Module> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            INSERT INTO modules (course_id, admin_id, title, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, course_id, admin_id, title, description, created_at, updated_at
            "#,
        )
        .bind(module.course_id.value())
        .bind(module.admin_id.value())
        .bind(module.title.as_str())
        .bind(module.description.as_ref().map(|d| d.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Course deleted between the ownership check and the insert
            if e.is_foreign_key_violation() {
                CatalogError::CourseNotFound
            } else {
                CatalogError::Database(e)
            }
        })?;

        Ok(row.into_module())
    }

    async fn find_module(&self, id: ModuleId) -> CatalogResult<Option<Module>> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT id, course_id, admin_id, title, description, created_at, updated_at
            FROM modules
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ModuleRow::into_module))
    }

    async fn update_module(
        &self,
        id: ModuleId,
        changes: &ModuleChanges,
    ) -> CatalogResult<Option<Module>> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            UPDATE modules
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, course_id, admin_id, title, description, created_at, updated_at
            "#,
        )
        .bind(id.value())
        .bind(changes.title.as_ref().map(|t| t.as_str()))
        .bind(changes.description.as_ref().map(|d| d.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ModuleRow::into_module))
    }

    async fn delete_module(&self, id: ModuleId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM modules WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_modules(&self, course: CourseId) -> CatalogResult<Vec<Module>> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT id, course_id, admin_id, title, description, created_at, updated_at
            FROM modules
            WHERE course_id = $1
            ORDER BY id
            "#,
        )
        .bind(course.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ModuleRow::into_module).collect())
    }

    async fn list_completions(
        &self,
        learner: LearnerId,
        course: CourseId,
    ) -> CatalogResult<Vec<ModuleCompletion>> {
        let rows = sqlx::query_as::<_, CompletionRow>(
            r#"
            SELECT mc.id, mc.learner_id, mc.module_id, mc.is_completed, mc.completed_at
            FROM module_completions mc
            JOIN modules m ON m.id = mc.module_id
            WHERE mc.learner_id = $1 AND m.course_id = $2
            "#,
        )
        .bind(learner.value())
        .bind(course.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CompletionRow::into_completion).collect())
    }

    async fn toggle_completion(
        &self,
        learner: LearnerId,
        module: ModuleId,
    ) -> CatalogResult<ModuleCompletion> {
        // Absent row: first toggle completes. Present row: flip in place.
        let row = sqlx::query_as::<_, CompletionRow>(
            r#"
            INSERT INTO module_completions (learner_id, module_id, is_completed, completed_at)
            VALUES ($1, $2, TRUE, NOW())
            ON CONFLICT (learner_id, module_id) DO UPDATE
            SET is_completed = NOT module_completions.is_completed,
                completed_at = CASE
                    WHEN module_completions.is_completed THEN NULL
                    ELSE NOW()
                END
            RETURNING id, learner_id, module_id, is_completed, completed_at
            "#,
        )
        .bind(learner.value())
        .bind(module.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_completion())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    description: String,
    price: i64,
    category: Option<String>,
    image_url: String,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CourseRow {
    fn into_course(self) -> Course {
        Course {
            id: Id::new(self.id),
            title: Title::from_db(self.title),
            description: Description::from_db(self.description),
            price: Price::from_db(self.price),
            category: self.category,
            image_url: ImageLink::from_db(self.image_url),
            owner_id: Id::new(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ModuleRow {
    id: i64,
    course_id: i64,
    admin_id: i64,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ModuleRow {
    fn into_module(self) -> Module {
        Module {
            id: Id::new(self.id),
            course_id: Id::new(self.course_id),
            admin_id: Id::new(self.admin_id),
            title: Title::from_db(self.title),
            description: self.description.map(Description::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CompletionRow {
    id: i64,
    learner_id: i64,
    module_id: i64,
    is_completed: bool,
    completed_at: Option<DateTime<Utc>>,
}

impl CompletionRow {
    fn into_completion(self) -> ModuleCompletion {
        ModuleCompletion {
            id: Id::new(self.id),
            learner_id: Id::new(self.learner_id),
            module_id: Id::new(self.module_id),
            is_completed: self.is_completed,
            completed_at: self.completed_at,
        }
    }
}
