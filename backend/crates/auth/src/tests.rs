//! Unit tests for the auth crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::token::TokenService;
    use crate::application::{RegisterInput, RegisterUseCase};
    use crate::domain::actor::Actor;
    use crate::domain::entity::account::AccountProfile;
    use crate::infra::InMemoryAccountRepository;

    pub const PASSWORD: &str = "TestPassword123!";

    pub struct Fixture {
        pub repo: Arc<InMemoryAccountRepository>,
        pub config: Arc<AuthConfig>,
        pub tokens: TokenService,
    }

    pub fn fixture() -> Fixture {
        let config = Arc::new(AuthConfig::with_random_secrets());
        Fixture {
            repo: Arc::new(InMemoryAccountRepository::new()),
            tokens: TokenService::new(config.clone()),
            config,
        }
    }

    pub fn register_input(handle: &str, email: &str) -> RegisterInput {
        RegisterInput {
            handle: handle.to_string(),
            email: email.to_string(),
            contact: "9876543210".to_string(),
            address: "12 Harbour Road".to_string(),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
        }
    }

    pub async fn register<A: Actor>(fx: &Fixture, handle: &str) -> AccountProfile<A> {
        RegisterUseCase::new(fx.repo.clone(), fx.config.clone())
            .execute::<A>(register_input(handle, &format!("{handle}@example.com")))
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod token_tests {
    use super::support::*;
    use crate::application::token::{Claims, TokenKind};
    use crate::domain::actor::ActorKind;
    use crate::error::AuthError;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use kernel::id::markers::{Administrator, Learner};

    #[tokio::test]
    async fn test_access_token_round_trip() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;

        let issued = fx.tokens.issue_access_token(&profile).unwrap();
        let id = fx.tokens.verify::<Learner>(&issued.token, TokenKind::Access).unwrap();

        assert_eq!(id, profile.id);
        assert_eq!(issued.ttl, fx.config.learner.access_ttl);
    }

    #[tokio::test]
    async fn test_learner_token_rejected_as_administrator() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let issued = fx.tokens.issue_access_token(&profile).unwrap();

        let result = fx.tokens.verify::<Administrator>(&issued.token, TokenKind::Access);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_actor_claim_checked_even_with_shared_secret() {
        let mut config = crate::application::config::AuthConfig::with_random_secrets();
        config.administrator = config.learner.clone();
        let tokens = crate::application::token::TokenService::new(std::sync::Arc::new(config));

        let issued = tokens
            .issue_refresh_token::<Learner>(kernel::id::Id::new(7))
            .unwrap();
        let result = tokens.verify::<Administrator>(&issued.token, TokenKind::Refresh);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_access_token_is_not_a_refresh_token() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let pair = fx.tokens.issue_pair(&profile).unwrap();

        assert!(fx.tokens.verify::<Learner>(&pair.access.token, TokenKind::Refresh).is_err());
        assert!(fx.tokens.verify::<Learner>(&pair.refresh.token, TokenKind::Access).is_err());
        assert!(fx.tokens.verify::<Learner>(&pair.refresh.token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        let fx = fixture();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            actor: ActorKind::Learner,
            typ: TokenKind::Access,
            name: None,
            email: None,
            iat: now - 120,
            exp: now - 60,
            jti: "expired".to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&fx.config.learner.access_secret),
        )
        .unwrap();

        let result = fx.tokens.verify::<Learner>(&token, TokenKind::Access);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let fx = fixture();
        assert!(matches!(
            fx.tokens.verify::<Learner>("not-a-jwt", TokenKind::Access),
            Err(AuthError::InvalidToken)
        ));
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::support::*;
    use crate::application::*;
    use crate::domain::repository::AccountRepository;
    use crate::error::AuthError;
    use kernel::error::kind::ErrorKind;
    use kernel::id::markers::{Administrator, Learner};

    fn login_input(handle: &str, password: &str) -> LoginInput {
        LoginInput {
            handle: Some(handle.to_string()),
            email: None,
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let fx = fixture();
        register::<Learner>(&fx, "alice").await;

        let use_case = RegisterUseCase::new(fx.repo.clone(), fx.config.clone());
        let err = use_case
            .execute::<Learner>(register_input("ALICE", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountExists));
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let err = use_case
            .execute::<Learner>(register_input("bob", "alice@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountExists));
    }

    #[tokio::test]
    async fn test_same_handle_allowed_across_actor_types() {
        let fx = fixture();
        register::<Learner>(&fx, "alice").await;
        let admin = register::<Administrator>(&fx, "alice").await;
        assert_eq!(admin.handle.original(), "alice");
    }

    #[tokio::test]
    async fn test_register_reports_every_violation() {
        let fx = fixture();
        let mut input = register_input("alice", "not-an-email");
        input.contact = "12345".to_string();
        input.confirm_password = "Different123!".to_string();

        let err = RegisterUseCase::new(fx.repo.clone(), fx.config.clone())
            .execute::<Learner>(input)
            .await
            .unwrap_err();

        let AuthError::Validation(violations) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field()).collect();
        assert_eq!(fields, vec!["email", "contact", "confirmPassword"]);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let fx = fixture();
        register::<Learner>(&fx, "alice").await;
        let use_case = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone());

        let wrong_password = use_case
            .execute::<Learner>(login_input("alice", "WrongPassword99!"))
            .await
            .err()
            .unwrap();
        let unknown = use_case
            .execute::<Learner>(login_input("nobody", PASSWORD))
            .await
            .err()
            .unwrap();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            wrong_password.to_app_error().message(),
            unknown.to_app_error().message()
        );
    }

    #[tokio::test]
    async fn test_login_requires_exactly_one_identifier() {
        let fx = fixture();
        let use_case = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone());

        let neither = LoginInput {
            handle: None,
            email: None,
            password: PASSWORD.to_string(),
        };
        assert!(matches!(
            use_case.execute::<Learner>(neither).await,
            Err(AuthError::Validation(_))
        ));

        let both = LoginInput {
            handle: Some("alice".to_string()),
            email: Some("alice@example.com".to_string()),
            password: PASSWORD.to_string(),
        };
        assert!(matches!(
            use_case.execute::<Learner>(both).await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_by_email_stores_refresh_token() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;

        let output = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(LoginInput {
                handle: None,
                email: Some("Alice@Example.com".to_string()),
                password: PASSWORD.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(output.profile.id, profile.id);
        assert_eq!(
            fx.repo.stored_refresh_token(profile.id).await,
            Some(output.tokens.refresh.token)
        );
    }

    #[tokio::test]
    async fn test_refresh_rotates_and_old_token_dies() {
        let fx = fixture();
        register::<Learner>(&fx, "alice").await;
        let login = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(login_input("alice", PASSWORD))
            .await
            .unwrap();
        let refresh = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone());

        let original = login.tokens.refresh.token;
        let rotated = refresh.execute::<Learner>(Some(&original)).await.unwrap();
        assert_ne!(rotated.refresh.token, original);

        let reuse = refresh.execute::<Learner>(Some(&original)).await;
        assert!(matches!(reuse, Err(AuthError::InvalidToken)));

        assert!(refresh
            .execute::<Learner>(Some(&rotated.refresh.token))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_refresh_after_logout_fails() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let login = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(login_input("alice", PASSWORD))
            .await
            .unwrap();

        LogoutUseCase::new(fx.repo.clone())
            .execute::<Learner>(profile.id)
            .await
            .unwrap();
        assert_eq!(
            fx.repo.stored_refresh_token(profile.id).await,
            Some(String::new())
        );

        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute::<Learner>(Some(&login.tokens.refresh.token))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_refresh_without_token_is_unauthorized() {
        let fx = fixture();
        let result = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute::<Learner>(None)
            .await;
        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refresh_has_one_winner() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let login = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(login_input("alice", PASSWORD))
            .await
            .unwrap();
        let presented = login.tokens.refresh.token;

        for round in 0..10 {
            let first = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone());
            let second = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone());
            let (a, b) = tokio::join!(
                tokio::spawn({
                    let token = presented.clone();
                    async move { first.execute::<Learner>(Some(&token)).await }
                }),
                tokio::spawn({
                    let token = presented.clone();
                    async move { second.execute::<Learner>(Some(&token)).await }
                }),
            );
            let results = [a.unwrap(), b.unwrap()];
            let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
            // The token is stale from the second round on
            let expected = if round == 0 { 1 } else { 0 };
            assert_eq!(winners.len(), expected, "round {round}");

            if let Some(winner) = winners.first() {
                assert_eq!(
                    fx.repo.stored_refresh_token(profile.id).await,
                    Some(winner.refresh.token.clone())
                );
            }
        }
    }

    #[tokio::test]
    async fn test_change_password_checks_old_and_revokes_refresh() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let login = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(login_input("alice", PASSWORD))
            .await
            .unwrap();
        let use_case = ChangePasswordUseCase::new(fx.repo.clone(), fx.config.clone());

        let wrong_old = use_case
            .execute::<Learner>(
                profile.id,
                ChangePasswordInput {
                    old_password: "NotMyPassword77!".to_string(),
                    new_password: "FreshSecret4567x".to_string(),
                    confirm_new_password: "FreshSecret4567x".to_string(),
                },
            )
            .await
            .unwrap_err();
        let AuthError::Validation(violations) = wrong_old else {
            panic!("expected validation error");
        };
        assert_eq!(violations[0].field(), "oldPassword");

        use_case
            .execute::<Learner>(
                profile.id,
                ChangePasswordInput {
                    old_password: PASSWORD.to_string(),
                    new_password: "FreshSecret4567x".to_string(),
                    confirm_new_password: "FreshSecret4567x".to_string(),
                },
            )
            .await
            .unwrap();

        let refresh = RefreshUseCase::new(fx.repo.clone(), fx.tokens.clone())
            .execute::<Learner>(Some(&login.tokens.refresh.token))
            .await;
        assert!(matches!(refresh, Err(AuthError::InvalidToken)));

        let relogin = LoginUseCase::new(fx.repo.clone(), fx.config.clone(), fx.tokens.clone())
            .execute::<Learner>(login_input("alice", "FreshSecret4567x"))
            .await;
        assert!(relogin.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_conflict_and_partial_update() {
        let fx = fixture();
        let alice = register::<Learner>(&fx, "alice").await;
        register::<Learner>(&fx, "bob").await;
        let use_case = UpdateProfileUseCase::new(fx.repo.clone());

        let taken = use_case
            .execute::<Learner>(
                alice.id,
                UpdateProfileInput {
                    email: Some("bob@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(taken, Err(AuthError::AccountExists)));

        let updated = use_case
            .execute::<Learner>(
                alice.id,
                UpdateProfileInput {
                    contact: Some("1112223334".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.contact.as_str(), "1112223334");
        assert_eq!(updated.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_check_session_outcomes() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let token = fx.tokens.issue_access_token(&profile).unwrap().token;
        let use_case = CheckSessionUseCase::new(fx.repo.clone(), fx.tokens.clone());

        assert!(matches!(
            use_case.execute::<Learner>(None).await,
            Err(AuthError::Unauthorized)
        ));
        assert!(matches!(
            use_case.execute::<Learner>(Some("bogus")).await,
            Err(AuthError::InvalidToken)
        ));
        assert_eq!(
            use_case.execute::<Learner>(Some(&token)).await.unwrap().id,
            profile.id
        );

        fx.repo.delete::<Learner>(profile.id).await.unwrap();
        assert!(matches!(
            use_case.execute::<Learner>(Some(&token)).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_account() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let use_case = DeleteAccountUseCase::new(fx.repo.clone());

        use_case.execute::<Learner>(profile.id).await.unwrap();
        assert!(matches!(
            use_case.execute::<Learner>(profile.id).await,
            Err(AuthError::AccountNotFound)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use super::support::*;
    use crate::presentation::router::learner_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kernel::id::markers::{Administrator, Learner};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(fx: &Fixture) -> Router {
        learner_router(fx.repo.clone(), fx.config.clone())
    }

    async fn json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn me_request() -> axum::http::request::Builder {
        Request::builder().method("GET").uri("/me")
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let fx = fixture();
        let response = app(&fx)
            .oneshot(me_request().body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(response).await["detail"], "Authentication required");
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let token = fx.tokens.issue_access_token(&profile).unwrap().token;

        let response = app(&fx)
            .oneshot(
                me_request()
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["username"], "alice");
        assert!(body.get("password").is_none());
        assert!(body.get("refreshToken").is_none());
    }

    #[tokio::test]
    async fn test_cookie_takes_precedence_over_bearer() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let token = fx.tokens.issue_access_token(&profile).unwrap().token;

        let valid_cookie = app(&fx)
            .oneshot(
                me_request()
                    .header(header::COOKIE, format!("accessToken={token}"))
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(valid_cookie.status(), StatusCode::OK);

        let invalid_cookie = app(&fx)
            .oneshot(
                me_request()
                    .header(header::COOKIE, "accessToken=garbage")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(invalid_cookie.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(invalid_cookie).await["detail"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_administrator_token_rejected_by_learner_gate() {
        let fx = fixture();
        let admin = register::<Administrator>(&fx, "root").await;
        let token = fx.tokens.issue_access_token(&admin).unwrap().token;

        let response = app(&fx)
            .oneshot(
                me_request()
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deleted_account_token_is_invalid() {
        let fx = fixture();
        let profile = register::<Learner>(&fx, "alice").await;
        let token = fx.tokens.issue_access_token(&profile).unwrap().token;

        let delete = app(&fx)
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(delete.status(), StatusCode::NO_CONTENT);

        let response = app(&fx)
            .oneshot(
                me_request()
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json(response).await["detail"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_register_then_login_sets_cookies() {
        let fx = fixture();
        let register = app(&fx)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({
                            "username": "alice",
                            "email": "alice@example.com",
                            "contact": "9876543210",
                            "address": "12 Harbour Road",
                            "password": PASSWORD,
                            "confirmPassword": PASSWORD,
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(register.status(), StatusCode::CREATED);

        let login = app(&fx)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        serde_json::json!({ "username": "alice", "password": PASSWORD })
                            .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(login.status(), StatusCode::OK);

        let cookies: Vec<String> = login
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert!(cookies.iter().any(|c| c.starts_with("accessToken=") && c.contains("HttpOnly")));
        assert!(cookies.iter().any(|c| c.starts_with("refreshToken=") && c.contains("Secure")));

        let body = json(login).await;
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_refresh_from_body() {
        let fx = fixture();
        register::<Learner>(&fx, "alice").await;
        let login = crate::application::LoginUseCase::new(
            fx.repo.clone(),
            fx.config.clone(),
            fx.tokens.clone(),
        )
        .execute::<Learner>(crate::application::LoginInput {
            handle: Some("alice".to_string()),
            email: None,
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

        let request = || {
            Request::builder()
                .method("POST")
                .uri("/refresh-access-token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({ "refreshToken": login.tokens.refresh.token }).to_string(),
                ))
                .unwrap()
        };

        let first = app(&fx).oneshot(request()).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert!(first.headers().get_all(header::SET_COOKIE).iter().count() >= 2);

        let replay = app(&fx).oneshot(request()).await.unwrap();
        assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let fx = fixture();
        let response = app(&fx)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
