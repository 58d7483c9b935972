//! HTTP server for field queries.
//!
//! Loads the field catalog at startup and exposes it under `/api/fields`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use agrospace::config::Config;
use agrospace::FieldCatalog;

mod api;
use api::AppState;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Agricultural field query server")]
struct Args {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing fields.kml and centroids.kml
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Listen address
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }

    info!("AgroSpace Field Server");

    let catalog = FieldCatalog::new(config.data.sources());
    catalog.load().context("Failed to load field catalog")?;

    let state: AppState = Arc::new(catalog);

    // Build router
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/fields", get(api::list_fields))
        .route("/api/fields/{id}/size", get(api::field_size))
        .route("/api/fields/distance", post(api::distance))
        .route("/api/fields/point-location", post(api::point_location))
        .with_state(state);

    if let Some(dir) = &config.server.static_dir {
        info!("Serving static files from {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health_handler(State(catalog): State<AppState>) -> Json<HealthResponse> {
    match catalog.stats() {
        Ok(stats) => Json(HealthResponse {
            status: "ok",
            fields: stats.fields,
        }),
        Err(_) => Json(HealthResponse {
            status: "degraded",
            fields: 0,
        }),
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    fields: usize,
}
