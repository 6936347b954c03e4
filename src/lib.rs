//! BloopBlog - library for app logic and testing

pub mod config;
pub mod db;
pub mod logging;
pub mod routes;
pub mod views;

use std::convert::Infallible;

use axum::extract::Request;
use axum::response::Response;
use axum::{middleware, routing::get, Router};
use mongodb::Database;
use tower::{Layer, Service};
use tower_http::{compression::CompressionLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::db::store::BlogStore;

/// Shared handles injected into every handler. Both fields are cheap
/// clones over the driver's pooled client.
#[derive(Clone)]
pub struct AppState {
    pub store: BlogStore,
    pub db: Database,
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::blog::home))
        .route(
            "/blogs",
            get(routes::blog::index).post(routes::blog::create),
        )
        .route("/blogs/new", get(routes::blog::new_form))
        .route(
            "/blogs/{id}",
            get(routes::blog::show)
                .put(routes::blog::update)
                .delete(routes::blog::destroy),
        )
        .route("/blogs/{id}/edit", get(routes::blog::edit_form))
        .route("/health", get(routes::health::health_ping))
        .route("/health/database", get(routes::health::health_database))
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        // Global 1 MB request body cap
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .with_state(state)
}

/// The app as actually served: the router behind the form method override.
///
/// The override must wrap the router from outside. A layer attached with
/// `Router::layer` runs after method dispatch, which is too late to turn a
/// form POST into a PUT or DELETE.
pub fn create_service(
    state: AppState,
) -> impl Service<Request, Response = Response, Error = Infallible, Future: Send> + Clone + Send + 'static
{
    middleware::from_fn(routes::method_override::rewrite_method).layer(create_app(state))
}

/// Run the server (used by main).
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the process lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered lines.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    let server_config = config::ServerConfig::from_env()?;

    let db_config = config::DbConfig::default();
    let database = db::connect(&db_config).await?;
    let state = AppState {
        store: BlogStore::new(&database),
        db: database,
    };

    let app = create_service(state);

    let listener = tokio::net::TcpListener::bind(server_config.addr()).await?;
    tracing::info!("BloopBlog server online at http://{}", listener.local_addr()?);

    axum::serve(listener, axum::ServiceExt::into_make_service(app)).await?;

    Ok(())
}
