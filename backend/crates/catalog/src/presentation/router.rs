//! Catalog Router

use auth::{AccountRepository, SessionGate, require_actor};
use axum::extract::DefaultBodyLimit;
use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use kernel::id::markers::{Administrator, Learner};

use crate::domain::image_store::ImageStore;
use crate::domain::repository::{CourseRepository, ModuleRepository};
use crate::presentation::handlers::{self, CatalogAppState};

/// Room for the text parts of a course form on top of the image
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Course and module routes
///
/// Each route sits behind the session gate of the actor type that may
/// call it.
pub fn catalog_router<R, S, AR>(state: CatalogAppState<R, S>, gate: SessionGate<AR>) -> Router
where
    R: CourseRepository + ModuleRepository + Send + Sync + 'static,
    S: ImageStore + Send + Sync + 'static,
    AR: AccountRepository + Send + Sync + 'static,
{
    let body_limit = state.config.max_image_bytes + FORM_OVERHEAD_BYTES;

    let learner = Router::new()
        .route(
            "/courses/purchased",
            get(handlers::list_purchased_courses::<R, S>),
        )
        .route(
            "/module/course/{courseId}",
            get(handlers::list_learner_modules::<R, S>),
        )
        .route(
            "/module/{moduleId}/status",
            patch(handlers::toggle_completion::<R, S>),
        )
        .route(
            "/module/progress/course/{courseId}",
            get(handlers::progress::<R, S>),
        )
        .route_layer(middleware::from_fn_with_state(
            gate.clone(),
            require_actor::<Learner, AR>,
        ));

    let admin = Router::new()
        .route("/courses/owned", get(handlers::list_owned_courses::<R, S>))
        .route("/courses", post(handlers::add_course::<R, S>))
        .route(
            "/courses/{id}",
            patch(handlers::update_course::<R, S>).delete(handlers::delete_course::<R, S>),
        )
        .route(
            "/module/admin/course/{courseId}",
            post(handlers::add_module::<R, S>).get(handlers::list_owner_modules::<R, S>),
        )
        .route(
            "/module/admin/{moduleId}",
            patch(handlers::update_module::<R, S>).delete(handlers::delete_module::<R, S>),
        )
        .route_layer(middleware::from_fn_with_state(
            gate,
            require_actor::<Administrator, AR>,
        ));

    learner
        .merge(admin)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
