//! Course Intake Service
//!
//! Accepts course applications, stores them in SQLite and notifies the
//! applicant and the course administrator by email.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod notify;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::AdminCredentials;
use config::Config;
use db::{ApplicationStore, SqliteApplicationStore};
use notify::Dispatcher;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ApplicationStore>,
    pub dispatcher: Arc<Dispatcher>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Course Intake Service");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Public directory: {:?}", config.public_dir);
    tracing::info!("Admin page: {:?}", config.admin_page);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.uses_default_admin_password() {
        tracing::warn!("ADMIN_PASS is the default value. Change it before exposing the admin area!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let store: Arc<dyn ApplicationStore> = Arc::new(SqliteApplicationStore::new(pool));

    // Initialize mail dispatch
    let dispatcher = Dispatcher::from_config(&config);
    if dispatcher.is_enabled() {
        tracing::info!("Email notifications enabled");
    } else {
        tracing::warn!("SMTP not configured (SMTP_HOST). Emails will not be sent.");
    }

    let state = AppState {
        store,
        dispatcher: Arc::new(dispatcher),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let credentials = AdminCredentials::new(
        state.config.admin_user.clone(),
        state.config.admin_pass.clone(),
    );

    // Admin routes
    let admin_routes = Router::new()
        .route("/api/applications", get(api::list_applications))
        .route("/admin", get(api::admin_page))
        .route_layer(middleware::from_fn(move |req, next| {
            auth::basic_auth_layer(credentials.clone(), req, next)
        }));

    // Public routes
    let public_routes = Router::new()
        .route("/api/apply", post(api::apply))
        .route("/health", get(health_check));

    let static_files = ServeDir::new(&state.config.public_dir);

    Router::new()
        .merge(admin_routes)
        .merge(public_routes)
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security_header(header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
                .layer(security_header(header::X_FRAME_OPTIONS, "SAMEORIGIN"))
                .layer(security_header(header::REFERRER_POLICY, "no-referrer"))
                .layer(security_header(
                    HeaderName::from_static("cross-origin-opener-policy"),
                    "same-origin",
                )),
        )
        .with_state(state)
}

fn security_header(
    name: HeaderName,
    value: &'static str,
) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
