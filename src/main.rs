//! Fleetcheck server binary.
//!
//! Wires configuration, the PostgreSQL pool, handlers, and the HTTP router
//! together. Construction is explicit: no container, no globals.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::{routing::get, Json, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use fleetcheck::adapters::http::{execution_routes, ExecutionHandlers};
use fleetcheck::adapters::postgres::{
    PostgresCatalogStore, PostgresExecutionRepository, PostgresIncidentSink,
};
use fleetcheck::application::handlers::execution::{
    ExecuteChecklistHandler, GetExecutionHandler, ListExecutionsHandler,
};
use fleetcheck::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let catalog = Arc::new(PostgresCatalogStore::new(pool.clone()));
    let executions = Arc::new(PostgresExecutionRepository::new(pool.clone()));
    let incidents = Arc::new(PostgresIncidentSink::new(pool));

    let execute_handler = Arc::new(ExecuteChecklistHandler::new(
        catalog,
        executions.clone(),
        incidents,
    ));
    let get_handler = Arc::new(GetExecutionHandler::new(executions.clone()));
    let list_handler = Arc::new(ListExecutionsHandler::new(executions));
    let handlers = ExecutionHandlers::new(execute_handler, get_handler, list_handler);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api/executions", execution_routes(handlers))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "fleetcheck listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
