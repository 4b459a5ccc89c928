//! Stock Routes
//!
//! API endpoints for the aggregated per-ticker report and the (placeholder)
//! basic-info lookup.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use report_core::{validate_code, ErrorBody, StockReport};
use serde::Deserialize;
use serde_json::json;

use crate::{AppError, AppState};

/// Query parameters shared by the stock endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct CodeQuery {
    /// 6-digit A-share ticker code, e.g. 600519
    pub code: String,
}

pub fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/stock/full-report", get(full_report))
        .route("/api/v1/stock/info", get(stock_info))
}

/// Full four-section analysis report for one ticker.
#[utoipa::path(
    get,
    path = "/api/v1/stock/full-report",
    params(CodeQuery),
    responses(
        (status = 200, description = "Aggregated report", body = StockReport),
        (status = 400, description = "Malformed stock code", body = ErrorBody),
        (status = 404, description = "Unknown ticker", body = ErrorBody),
        (status = 500, description = "Provider failure", body = ErrorBody),
    ),
    tag = "stock"
)]
pub async fn full_report(
    State(state): State<AppState>,
    Query(query): Query<CodeQuery>,
) -> Result<Json<StockReport>, AppError> {
    validate_code(&query.code)?;

    tracing::info!("Report requested for {}", query.code);
    let report = state.service.full_report(&query.code).await?;
    tracing::info!("Report served for {} ({})", report.code, report.name);

    Ok(Json(report))
}

/// Basic stock info. Placeholder: points at the full-report endpoint.
#[utoipa::path(
    get,
    path = "/api/v1/stock/info",
    params(CodeQuery),
    responses(
        (status = 200, description = "Basic info placeholder"),
        (status = 400, description = "Malformed stock code", body = ErrorBody),
    ),
    tag = "stock"
)]
pub async fn stock_info(
    Query(query): Query<CodeQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    validate_code(&query.code)?;

    Ok(Json(json!({
        "code": query.code,
        "message": "Basic info is not implemented yet; use /full-report for complete data",
        "full_report_url": format!("/api/v1/stock/full-report?code={}", query.code),
    })))
}
