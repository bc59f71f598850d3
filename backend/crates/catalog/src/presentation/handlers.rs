//! HTTP Handlers

use std::sync::Arc;

use auth::CurrentActor;
use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::markers::{Administrator, Learner};
use kernel::id::{CourseId, Id, ModuleId};

use crate::application::config::CatalogConfig;
use crate::application::{
    AddCourseUseCase, AddModuleUseCase, CourseInput, DeleteCourseUseCase, DeleteModuleUseCase,
    ListModulesUseCase, ListOwnedCoursesUseCase, ListPurchasedCoursesUseCase, ModuleInput,
    ProgressUseCase, ToggleCompletionUseCase, UpdateCourseUseCase, UpdateModuleUseCase,
};
use crate::domain::image_store::{ImageStore, ImageUpload};
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    CompletionResponse, CourseResponse, ModuleRequest, ModuleResponse, ProgressResponse,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R, S> {
    pub repo: Arc<R>,
    pub images: Arc<S>,
    pub config: Arc<CatalogConfig>,
}

impl<R, S> Clone for CatalogAppState<R, S> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            images: self.images.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, S> CatalogAppState<R, S> {
    pub fn new(repo: Arc<R>, images: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            repo,
            images,
            config,
        }
    }
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> CatalogResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| CatalogError::invalid_field("body", rejection.body_text()))
}

fn path_id<M>(path: Result<Path<i64>, PathRejection>) -> CatalogResult<Id<M>> {
    path.map(|Path(id)| Id::new(id))
        .map_err(|_| CatalogError::invalid_field("id", "Path id must be an integer"))
}

/// Read the course form
///
/// Text parts fill the matching fields; the `image` part is the file.
/// Unknown parts are ignored.
async fn course_form(
    multipart: Result<Multipart, MultipartRejection>,
    max_image_bytes: usize,
) -> CatalogResult<CourseInput> {
    let mut multipart = multipart
        .map_err(|rejection| CatalogError::invalid_field("body", rejection.body_text()))?;
    let mut input = CourseInput::default();
    let malformed = |e: MultipartError| CatalogError::invalid_field("body", e.body_text());

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await.map_err(malformed)?;
                if bytes.len() > max_image_bytes {
                    return Err(CatalogError::invalid_field(
                        "image",
                        format!("Image must be at most {max_image_bytes} bytes"),
                    ));
                }
                input.image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    content_type,
                    file_name,
                });
            }
            "title" | "description" | "price" | "category" | "imageLink" => {
                let value = Some(field.text().await.map_err(malformed)?);
                match name.as_str() {
                    "title" => input.title = value,
                    "description" => input.description = value,
                    "price" => input.price = value,
                    "category" => input.category = value,
                    _ => input.image_link = value,
                }
            }
            _ => {}
        }
    }

    Ok(input)
}

// ============================================================================
// Courses (administrator)
// ============================================================================

/// GET /courses/owned
pub async fn list_owned_courses<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
) -> CatalogResult<Json<Vec<CourseResponse>>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let courses = ListOwnedCoursesUseCase::new(state.repo.clone())
        .execute(admin.id)
        .await?;
    Ok(Json(courses.iter().map(CourseResponse::from).collect()))
}

/// POST /courses (multipart)
pub async fn add_course<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let input = course_form(multipart, state.config.max_image_bytes).await?;
    let course = AddCourseUseCase::new(state.repo.clone(), state.images.clone())
        .execute(admin.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(&course))))
}

/// PATCH /courses/{id} (multipart)
pub async fn update_course<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> CatalogResult<Json<CourseResponse>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let input = course_form(multipart, state.config.max_image_bytes).await?;
    let course = UpdateCourseUseCase::new(state.repo.clone(), state.images.clone())
        .execute(admin.id, course_id, input)
        .await?;

    Ok(Json(CourseResponse::from(&course)))
}

/// DELETE /courses/{id}
pub async fn delete_course<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<StatusCode>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    DeleteCourseUseCase::new(state.repo.clone())
        .execute(admin.id, course_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Courses (learner)
// ============================================================================

/// GET /courses/purchased
pub async fn list_purchased_courses<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(learner): CurrentActor<Learner>,
) -> CatalogResult<Json<Vec<CourseResponse>>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let courses = ListPurchasedCoursesUseCase::new(state.repo.clone())
        .execute(learner.id)
        .await?;
    Ok(Json(courses.iter().map(CourseResponse::from).collect()))
}

// ============================================================================
// Modules (administrator)
// ============================================================================

/// POST /module/admin/course/{courseId}
pub async fn add_module<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ModuleRequest>, JsonRejection>,
) -> CatalogResult<impl IntoResponse>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let req = json_body(body)?;
    let module = AddModuleUseCase::new(state.repo.clone())
        .execute(
            admin.id,
            course_id,
            ModuleInput {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ModuleResponse::from(&module))))
}

/// GET /module/admin/course/{courseId}
pub async fn list_owner_modules<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<Vec<ModuleResponse>>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let modules = ListModulesUseCase::new(state.repo.clone())
        .for_owner(admin.id, course_id)
        .await?;
    Ok(Json(modules.iter().map(ModuleResponse::from).collect()))
}

/// PATCH /module/admin/{moduleId}
pub async fn update_module<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<ModuleRequest>, JsonRejection>,
) -> CatalogResult<Json<ModuleResponse>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let module_id: ModuleId = path_id(path)?;
    let req = json_body(body)?;
    let module = UpdateModuleUseCase::new(state.repo.clone())
        .execute(
            admin.id,
            module_id,
            ModuleInput {
                title: req.title,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(ModuleResponse::from(&module)))
}

/// DELETE /module/admin/{moduleId}
pub async fn delete_module<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(admin): CurrentActor<Administrator>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<StatusCode>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let module_id: ModuleId = path_id(path)?;
    DeleteModuleUseCase::new(state.repo.clone())
        .execute(admin.id, module_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Modules and progress (learner)
// ============================================================================

/// GET /module/course/{courseId}
pub async fn list_learner_modules<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(learner): CurrentActor<Learner>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<Vec<ModuleResponse>>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let modules = ListModulesUseCase::new(state.repo.clone())
        .for_learner(learner.id, course_id)
        .await?;
    Ok(Json(modules.iter().map(ModuleResponse::from).collect()))
}

/// PATCH /module/{moduleId}/status
pub async fn toggle_completion<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(learner): CurrentActor<Learner>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<CompletionResponse>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let module_id: ModuleId = path_id(path)?;
    let record = ToggleCompletionUseCase::new(state.repo.clone())
        .execute(learner.id, module_id)
        .await?;
    Ok(Json(CompletionResponse::from(&record)))
}

/// GET /module/progress/course/{courseId}
pub async fn progress<R, S>(
    State(state): State<CatalogAppState<R, S>>,
    CurrentActor(learner): CurrentActor<Learner>,
    path: Result<Path<i64>, PathRejection>,
) -> CatalogResult<Json<ProgressResponse>>
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
{
    let course_id: CourseId = path_id(path)?;
    let report = ProgressUseCase::new(state.repo.clone())
        .execute(learner.id, course_id)
        .await?;
    Ok(Json(ProgressResponse::from(&report)))
}
