//! Unit tests for the catalog crate

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use kernel::id::{AdministratorId, CourseId, Id, LearnerId};

    use crate::application::{AddCourseUseCase, AddModuleUseCase, CourseInput, ModuleInput};
    use crate::domain::entity::{course::Course, module::Module};
    use crate::domain::image_store::{ImageStore, ImageUpload};
    use crate::domain::value_object::image_link::ImageLink;
    use crate::error::{CatalogError, CatalogResult};
    use crate::infra::InMemoryCatalogRepository;

    pub const OWNER: AdministratorId = Id::new(1);
    pub const OTHER_ADMIN: AdministratorId = Id::new(2);
    pub const LEARNER: LearnerId = Id::new(10);

    /// Object store double: hands out a fixed URL or fails
    #[derive(Default)]
    pub struct FakeImageStore {
        pub fail: bool,
        pub uploads: AtomicUsize,
    }

    impl FakeImageStore {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn upload_count(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }
    }

    impl ImageStore for FakeImageStore {
        async fn upload(&self, _image: &ImageUpload) -> CatalogResult<ImageLink> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::Upload("store unavailable".into()));
            }
            Ok(ImageLink::from_db("https://cdn.example.com/uploaded.png"))
        }
    }

    pub fn repo() -> Arc<InMemoryCatalogRepository> {
        Arc::new(InMemoryCatalogRepository::new())
    }

    pub fn course_input(title: &str) -> CourseInput {
        CourseInput {
            title: Some(title.to_string()),
            description: Some("Ownership, borrowing, and lifetimes".to_string()),
            price: Some("500".to_string()),
            category: Some("programming".to_string()),
            image_link: Some("https://cdn.example.com/rust.png".to_string()),
            image: None,
        }
    }

    pub fn image_file() -> ImageUpload {
        ImageUpload {
            bytes: vec![0x89, b'P', b'N', b'G'],
            content_type: Some("image/png".to_string()),
            file_name: Some("cover.png".to_string()),
        }
    }

    pub async fn add_course(repo: &Arc<InMemoryCatalogRepository>, title: &str) -> Course {
        AddCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::default()))
            .execute(OWNER, course_input(title))
            .await
            .unwrap()
    }

    pub async fn add_module(
        repo: &Arc<InMemoryCatalogRepository>,
        course_id: CourseId,
        title: &str,
    ) -> Module {
        AddModuleUseCase::new(repo.clone())
            .execute(
                OWNER,
                course_id,
                ModuleInput {
                    title: Some(title.to_string()),
                    description: None,
                },
            )
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod course_tests {
    use super::support::*;
    use std::sync::Arc;

    use kernel::id::Id;

    use crate::application::{
        AddCourseUseCase, CourseInput, DeleteCourseUseCase, ListOwnedCoursesUseCase,
        ListPurchasedCoursesUseCase, UpdateCourseUseCase,
    };
    use crate::domain::repository::{CourseRepository, ModuleRepository};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_add_course_reports_every_missing_field() {
        let repo = repo();
        let result = AddCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::default()))
            .execute(OWNER, CourseInput::default())
            .await;

        let Err(CatalogError::Validation(violations)) = result else {
            panic!("expected validation error");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"description"));
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"image"));
    }

    #[tokio::test]
    async fn test_add_course_rejects_relative_image_link() {
        let repo = repo();
        let mut input = course_input("Rust 101");
        input.image_link = Some("/covers/rust.png".to_string());

        let result = AddCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::default()))
            .execute(OWNER, input)
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_course_file_wins_over_link() {
        let repo = repo();
        let store = Arc::new(FakeImageStore::default());
        let mut input = course_input("Rust 101");
        input.image = Some(image_file());

        let course = AddCourseUseCase::new(repo.clone(), store.clone())
            .execute(OWNER, input)
            .await
            .unwrap();

        assert_eq!(store.upload_count(), 1);
        assert_eq!(course.image_url.as_str(), "https://cdn.example.com/uploaded.png");
        assert_eq!(course.price.value(), 500);
    }

    #[tokio::test]
    async fn test_upload_failure_creates_nothing() {
        let repo = repo();
        let mut input = course_input("Rust 101");
        input.image = Some(image_file());

        let result = AddCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::failing()))
            .execute(OWNER, input)
            .await;

        assert!(matches!(result, Err(CatalogError::Upload(_))));
        assert!(repo.list_owned(OWNER).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_form_skips_upload() {
        let repo = repo();
        let store = Arc::new(FakeImageStore::default());
        let mut input = course_input("Rust 101");
        input.price = Some("-5".to_string());
        input.image = Some(image_file());

        let result = AddCourseUseCase::new(repo.clone(), store.clone())
            .execute(OWNER, input)
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
        assert_eq!(store.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_update_course_owner_only() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let use_case = UpdateCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::default()));

        let foreign = use_case
            .execute(OTHER_ADMIN, course.id, course_input("Hijacked"))
            .await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        let missing = use_case
            .execute(OWNER, Id::new(999), course_input("Ghost"))
            .await;
        assert!(matches!(missing, Err(CatalogError::CourseNotFound)));

        let updated = use_case
            .execute(
                OWNER,
                course.id,
                CourseInput {
                    price: Some("750".to_string()),
                    ..CourseInput::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price.value(), 750);
        assert_eq!(updated.title.as_str(), "Rust 101");
        assert_eq!(updated.image_url, course.image_url);
    }

    #[tokio::test]
    async fn test_update_course_requires_a_field() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;

        let result = UpdateCourseUseCase::new(repo.clone(), Arc::new(FakeImageStore::default()))
            .execute(OWNER, course.id, CourseInput::default())
            .await;

        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_course_cascades_modules() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let module = add_module(&repo, course.id, "Ownership").await;
        let use_case = DeleteCourseUseCase::new(repo.clone());

        let foreign = use_case.execute(OTHER_ADMIN, course.id).await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        use_case.execute(OWNER, course.id).await.unwrap();
        assert!(repo.find_course(course.id).await.unwrap().is_none());
        assert!(repo.find_module(module.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_purchased_course_is_conflict() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        repo.grant_entitlement(LEARNER, course.id).await;

        let result = DeleteCourseUseCase::new(repo.clone())
            .execute(OWNER, course.id)
            .await;

        assert!(matches!(result, Err(CatalogError::CourseInUse)));
        assert!(repo.find_course(course.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_course_listings() {
        let repo = repo();
        assert!(ListOwnedCoursesUseCase::new(repo.clone())
            .execute(OWNER)
            .await
            .unwrap()
            .is_empty());

        let purchased = ListPurchasedCoursesUseCase::new(repo.clone())
            .execute(LEARNER)
            .await;
        assert!(matches!(purchased, Err(CatalogError::NoPurchasedCourses)));

        let first = add_course(&repo, "Rust 101").await;
        add_course(&repo, "Async Rust").await;
        repo.grant_entitlement(LEARNER, first.id).await;

        let owned = ListOwnedCoursesUseCase::new(repo.clone())
            .execute(OWNER)
            .await
            .unwrap();
        assert_eq!(owned.len(), 2);

        let purchased = ListPurchasedCoursesUseCase::new(repo.clone())
            .execute(LEARNER)
            .await
            .unwrap();
        assert_eq!(purchased.len(), 1);
        assert_eq!(purchased[0].id, first.id);
    }
}

#[cfg(test)]
mod module_tests {
    use super::support::*;

    use kernel::id::Id;

    use crate::application::{
        AddModuleUseCase, DeleteModuleUseCase, ListModulesUseCase, ModuleInput,
        UpdateModuleUseCase,
    };
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_add_module_requires_owner_and_title() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let use_case = AddModuleUseCase::new(repo.clone());

        let untitled = use_case
            .execute(OWNER, course.id, ModuleInput::default())
            .await;
        assert!(matches!(untitled, Err(CatalogError::Validation(_))));

        let foreign = use_case
            .execute(
                OTHER_ADMIN,
                course.id,
                ModuleInput {
                    title: Some("Intruder".to_string()),
                    description: None,
                },
            )
            .await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        let missing = use_case
            .execute(
                OWNER,
                Id::new(999),
                ModuleInput {
                    title: Some("Orphan".to_string()),
                    description: None,
                },
            )
            .await;
        assert!(matches!(missing, Err(CatalogError::CourseNotFound)));
    }

    #[tokio::test]
    async fn test_update_and_delete_module_creator_only() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let module = add_module(&repo, course.id, "Ownership").await;

        let input = || ModuleInput {
            title: None,
            description: Some("Moves and copies".to_string()),
        };

        let foreign = UpdateModuleUseCase::new(repo.clone())
            .execute(OTHER_ADMIN, module.id, input())
            .await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        let updated = UpdateModuleUseCase::new(repo.clone())
            .execute(OWNER, module.id, input())
            .await
            .unwrap();
        assert_eq!(updated.title.as_str(), "Ownership");
        assert_eq!(
            updated.description.as_ref().map(|d| d.as_str()),
            Some("Moves and copies")
        );

        let foreign = DeleteModuleUseCase::new(repo.clone())
            .execute(OTHER_ADMIN, module.id)
            .await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        DeleteModuleUseCase::new(repo.clone())
            .execute(OWNER, module.id)
            .await
            .unwrap();
        let gone = DeleteModuleUseCase::new(repo.clone())
            .execute(OWNER, module.id)
            .await;
        assert!(matches!(gone, Err(CatalogError::ModuleNotFound)));
    }

    #[tokio::test]
    async fn test_list_modules_ordered_and_gated() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let use_case = ListModulesUseCase::new(repo.clone());

        let empty = use_case.for_owner(OWNER, course.id).await;
        assert!(matches!(empty, Err(CatalogError::NoModules)));

        let first = add_module(&repo, course.id, "Ownership").await;
        let second = add_module(&repo, course.id, "Borrowing").await;

        let listed = use_case.for_owner(OWNER, course.id).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let foreign = use_case.for_owner(OTHER_ADMIN, course.id).await;
        assert!(matches!(foreign, Err(CatalogError::Forbidden)));

        let unpaid = use_case.for_learner(LEARNER, course.id).await;
        assert!(matches!(unpaid, Err(CatalogError::Forbidden)));

        repo.grant_entitlement(LEARNER, course.id).await;
        assert_eq!(use_case.for_learner(LEARNER, course.id).await.unwrap().len(), 2);
    }
}

#[cfg(test)]
mod progress_tests {
    use super::support::*;

    use kernel::id::Id;

    use crate::application::{ProgressUseCase, ToggleCompletionUseCase};
    use crate::error::CatalogError;

    #[tokio::test]
    async fn test_half_completed_course_is_fifty_percent() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let m1 = add_module(&repo, course.id, "Ownership").await;
        let m2 = add_module(&repo, course.id, "Borrowing").await;
        repo.grant_entitlement(LEARNER, course.id).await;

        ToggleCompletionUseCase::new(repo.clone())
            .execute(LEARNER, m1.id)
            .await
            .unwrap();

        let report = ProgressUseCase::new(repo.clone())
            .execute(LEARNER, course.id)
            .await
            .unwrap();

        assert_eq!(report.percentage.to_string(), "50.00");
        assert_eq!((report.completed, report.total), (1, 2));
        assert_eq!(report.modules[0].module_id, m1.id);
        assert!(report.modules[0].is_completed);
        assert!(report.modules[0].completed_at.is_some());
        assert_eq!(report.modules[1].module_id, m2.id);
        assert!(!report.modules[1].is_completed);
        assert!(report.modules[1].completed_at.is_none());
    }

    #[tokio::test]
    async fn test_progress_is_scoped_to_the_learner() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let module = add_module(&repo, course.id, "Ownership").await;
        let other = Id::new(11);
        repo.grant_entitlement(LEARNER, course.id).await;
        repo.grant_entitlement(other, course.id).await;

        ToggleCompletionUseCase::new(repo.clone())
            .execute(other, module.id)
            .await
            .unwrap();

        let report = ProgressUseCase::new(repo.clone())
            .execute(LEARNER, course.id)
            .await
            .unwrap();
        assert_eq!(report.percentage.to_string(), "0.00");
    }

    #[tokio::test]
    async fn test_course_without_modules_is_not_found() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        repo.grant_entitlement(LEARNER, course.id).await;

        let result = ProgressUseCase::new(repo.clone())
            .execute(LEARNER, course.id)
            .await;
        assert!(matches!(result, Err(CatalogError::NoModules)));
    }

    #[tokio::test]
    async fn test_progress_checks_course_then_entitlement() {
        let repo = repo();
        let use_case = ProgressUseCase::new(repo.clone());

        let missing = use_case.execute(LEARNER, Id::new(999)).await;
        assert!(matches!(missing, Err(CatalogError::CourseNotFound)));

        // No modules either, but entitlement is checked first
        let course = add_course(&repo, "Rust 101").await;
        let unpaid = use_case.execute(LEARNER, course.id).await;
        assert!(matches!(unpaid, Err(CatalogError::Forbidden)));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let repo = repo();
        let course = add_course(&repo, "Rust 101").await;
        let module = add_module(&repo, course.id, "Ownership").await;
        repo.grant_entitlement(LEARNER, course.id).await;
        let use_case = ToggleCompletionUseCase::new(repo.clone());

        let first = use_case.execute(LEARNER, module.id).await.unwrap();
        assert!(first.is_completed);
        assert!(first.completed_at.is_some());

        let second = use_case.execute(LEARNER, module.id).await.unwrap();
        assert!(!second.is_completed);
        assert!(second.completed_at.is_none());
        assert_eq!(first.id, second.id);

        let third = use_case.execute(LEARNER, module.id).await.unwrap();
        assert!(third.is_completed);
        assert!(third.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_toggle_requires_module_and_entitlement() {
        let repo = repo();
        let use_case = ToggleCompletionUseCase::new(repo.clone());

        let missing = use_case.execute(LEARNER, Id::new(999)).await;
        assert!(matches!(missing, Err(CatalogError::ModuleNotFound)));

        let course = add_course(&repo, "Rust 101").await;
        let module = add_module(&repo, course.id, "Ownership").await;
        let unpaid = use_case.execute(LEARNER, module.id).await;
        assert!(matches!(unpaid, Err(CatalogError::Forbidden)));
    }
}

#[cfg(test)]
mod cloudinary_tests {
    use super::support::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::application::config::CatalogConfig;
    use crate::domain::image_store::ImageStore;
    use crate::error::CatalogError;
    use crate::infra::CloudinaryImageStore;

    fn store(server: &MockServer) -> CloudinaryImageStore {
        let mut config = CatalogConfig::development();
        config.cloudinary.base_url = server.uri();
        CloudinaryImageStore::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/demo/image/upload"))
            .and(body_partial_json(json!({ "api_key": "dev" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "secure_url": "https://res.cloudinary.com/demo/image/upload/v1/cover.png",
                "public_id": "cover"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let link = store(&server).upload(&image_file()).await.unwrap();
        assert_eq!(
            link.as_str(),
            "https://res.cloudinary.com/demo/image/upload/v1/cover.png"
        );
    }

    #[tokio::test]
    async fn test_upstream_error_is_upload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = store(&server).upload(&image_file()).await;
        assert!(matches!(result, Err(CatalogError::Upload(_))));
    }

    #[tokio::test]
    async fn test_unusable_url_is_upload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "secure_url": "not a url" })),
            )
            .mount(&server)
            .await;

        let result = store(&server).upload(&image_file()).await;
        assert!(matches!(result, Err(CatalogError::Upload(_))));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use std::sync::Arc;

    use auth::application::{RegisterInput, RegisterUseCase};
    use auth::{AccountProfile, AuthConfig, InMemoryAccountRepository, SessionGate, TokenService};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kernel::id::markers::{Administrator, Learner};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::AddCourseUseCase;
    use crate::application::config::CatalogConfig;
    use crate::infra::InMemoryCatalogRepository;
    use crate::presentation::{CatalogAppState, catalog_router};

    const BOUNDARY: &str = "catalog-test-boundary";

    struct Harness {
        catalog: Arc<InMemoryCatalogRepository>,
        app: Router,
        admin: AccountProfile<Administrator>,
        admin_token: String,
        learner: AccountProfile<Learner>,
        learner_token: String,
    }

    fn register_input(handle: &str) -> RegisterInput {
        RegisterInput {
            handle: handle.to_string(),
            email: format!("{handle}@example.com"),
            contact: "9876543210".to_string(),
            address: "12 Harbour Road".to_string(),
            password: "TestPassword123!".to_string(),
            confirm_password: "TestPassword123!".to_string(),
        }
    }

    async fn harness() -> Harness {
        let accounts = Arc::new(InMemoryAccountRepository::new());
        let auth_config = Arc::new(AuthConfig::with_random_secrets());
        let tokens = TokenService::new(auth_config.clone());
        let register = RegisterUseCase::new(accounts.clone(), auth_config.clone());

        let admin = register
            .execute::<Administrator>(register_input("instructor"))
            .await
            .unwrap();
        let learner = register
            .execute::<Learner>(register_input("student"))
            .await
            .unwrap();

        let catalog = repo();
        let state = CatalogAppState::new(
            catalog.clone(),
            Arc::new(FakeImageStore::default()),
            Arc::new(CatalogConfig::development()),
        );
        let app = catalog_router(state, SessionGate::new(accounts, auth_config));

        Harness {
            catalog,
            app,
            admin_token: tokens.issue_access_token(&admin).unwrap().token,
            learner_token: tokens.issue_access_token(&learner).unwrap().token,
            admin,
            learner,
        }
    }

    fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    async fn json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    #[tokio::test]
    async fn test_add_course_from_multipart_form() {
        let h = harness().await;
        let body = multipart_body(&[
            ("title", "Rust 101"),
            ("description", "Ownership, borrowing, and lifetimes"),
            ("price", "500"),
            ("imageLink", "https://cdn.example.com/rust.png"),
        ]);

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/courses")
                    .header(header::AUTHORIZATION, bearer(&h.admin_token))
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let course = json(response).await;
        assert_eq!(course["title"], "Rust 101");
        assert_eq!(course["price"], 500);
        assert_eq!(course["adminId"], h.admin.id.value());
    }

    #[tokio::test]
    async fn test_learner_token_rejected_on_admin_route() {
        let h = harness().await;
        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/courses/owned")
                    .header(header::AUTHORIZATION, bearer(&h.learner_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_progress_renders_two_decimals() {
        let h = harness().await;
        let owned_course = AddCourseUseCase::new(h.catalog.clone(), Arc::new(FakeImageStore::default()))
            .execute(h.admin.id, course_input("Async Rust"))
            .await
            .unwrap();
        h.catalog
            .grant_entitlement(h.learner.id, owned_course.id)
            .await;

        let mut module_ids = Vec::new();
        for title in ["Futures", "Pinning"] {
            let response = h
                .app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri(format!("/module/admin/course/{}", owned_course.id.value()))
                        .header(header::AUTHORIZATION, bearer(&h.admin_token))
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(json!({ "title": title }).to_string()))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            module_ids.push(json(response).await["id"].as_i64().unwrap());
        }

        let toggled = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/module/{}/status", module_ids[0]))
                    .header(header::AUTHORIZATION, bearer(&h.learner_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(toggled.status(), StatusCode::OK);
        assert_eq!(json(toggled).await["isCompleted"], true);

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/module/progress/course/{}", owned_course.id.value()))
                    .header(header::AUTHORIZATION, bearer(&h.learner_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["completionPercentage"], "50.00");
        assert_eq!(body["totalModules"], 2);
        assert_eq!(body["modules"][1]["completedAt"], Value::Null);
    }

    #[tokio::test]
    async fn test_unpaid_progress_is_forbidden() {
        let h = harness().await;
        let course = add_course(&h.catalog, "Rust 101").await;
        add_module(&h.catalog, course.id, "Ownership").await;

        let response = h
            .app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/module/progress/course/{}", course.id.value()))
                    .header(header::AUTHORIZATION, bearer(&h.learner_token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
