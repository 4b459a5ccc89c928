//! DataQuark stock report API server.
//!
//! Thin axum layer over [`report_service::StockReportService`]: routing,
//! parameter validation, error-to-status mapping, CORS, request IDs and the
//! OpenAPI document.

use axum::{middleware, routing::get, Json, Router};
use chrono::Utc;
use gateway_client::GatewayClient;
use report_service::{CacheConfig, StockReportService};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod error;
mod request_id;
mod settings;
mod stock_routes;


pub use error::AppError;
pub use settings::Settings;

const APP_NAME: &str = "DataQuark Stock Analysis API";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StockReportService>,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "DataQuark Stock Analysis API"),
    paths(stock_routes::full_report, stock_routes::stock_info),
    components(schemas(
        report_core::StockReport,
        report_core::FundamentalAnalysis,
        report_core::ValuationAnalysis,
        report_core::TechnicalAnalysis,
        report_core::SentimentAnalysis,
        report_core::ErrorBody,
    )),
    tags((name = "stock", description = "Aggregated stock analysis"))
)]
struct ApiDoc;

/// Service banner.
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": format!("Welcome to {}", APP_NAME),
        "version": VERSION,
        "docs": "/docs",
        "current_time": Utc::now().to_rfc3339(),
    }))
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION,
    }))
}

/// Build the full application router for the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(stock_routes::stock_routes())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wire settings, provider and service together and serve until shutdown.
pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();

    let provider = Arc::new(GatewayClient::new(
        settings.gateway_url.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    ));
    let service = Arc::new(StockReportService::new(
        provider,
        CacheConfig {
            ttl: Duration::from_secs(settings.cache_ttl_secs),
            max_entries: settings.cache_max_entries,
        },
    ));

    let router = app(AppState { service });

    let addr = format!("{}:{}", settings.host, settings.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("{} v{} listening on {}", APP_NAME, VERSION, addr);

    axum::serve(listener, router).await?;
    Ok(())
}
