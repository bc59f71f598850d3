//! API Server Entry Point
//!
//! Builds the feature routers from environment configuration and serves
//! them. Startup failures surface through `anyhow`;
//! request-level errors are rendered by each feature crate.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::{PgAccountRepository, SessionGate, admin_router, learner_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use billing::{BillingAppState, PgPaymentRepository, RazorpayGateway, billing_router};
use catalog::{CatalogAppState, CloudinaryImageStore, PgCatalogRepository, catalog_router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,billing=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Accounts and session gate
    let accounts = Arc::new(PgAccountRepository::new(pool.clone()));
    let auth_config = Arc::new(config.auth);
    let gate = SessionGate::new(accounts.clone(), auth_config.clone());

    // Catalog
    let images = Arc::new(CloudinaryImageStore::new(&config.catalog)?);
    let catalog_state = CatalogAppState::new(
        Arc::new(PgCatalogRepository::new(pool.clone())),
        images,
        Arc::new(config.catalog),
    );

    // Billing
    let gateway = Arc::new(RazorpayGateway::new(&config.billing)?);
    let billing_state = BillingAppState::new(
        Arc::new(PgPaymentRepository::new(pool.clone())),
        gateway,
        Arc::new(config.billing),
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .nest("/users", learner_router(accounts.clone(), auth_config.clone()))
        .nest("/admin", admin_router(accounts, auth_config))
        .merge(catalog_router(catalog_state, gate.clone()))
        .merge(billing_router(billing_state, gate));

    let app = Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
