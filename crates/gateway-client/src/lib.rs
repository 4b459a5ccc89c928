//! HTTP client for the market-data gateway.
//!
//! The gateway normalizes the upstream vendor feed into a stable JSON shape;
//! numeric indicators arrive as strings with "-" marking missing values, and
//! callers coerce them (`report_core::coerce`).

use async_trait::async_trait;
use chrono::NaiveDate;
use report_core::{
    DailyBar, FinancialIndicators, FundFlowRow, MarketDataProvider, ReportError, SpotQuote,
    StockProfile,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    client: Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// GET a gateway endpoint and decode the JSON body.
    ///
    /// A 404 from the gateway means the ticker is unknown; every other
    /// non-success status is a provider failure carrying the body text.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        code: &str,
        query: &[(&str, String)],
    ) -> Result<T, ReportError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Gateway request: {}", url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| ReportError::Provider(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ReportError::NotFound(code.to_string()));
        }

        if !response.status().is_success() {
            return Err(ReportError::Provider(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ReportError::Provider(e.to_string()))
    }
}

#[derive(Deserialize)]
struct HistoryResponse {
    bars: Vec<RawBar>,
}

#[derive(Deserialize)]
struct RawBar {
    date: NaiveDate,
    close: f64,
}

#[derive(Deserialize)]
struct FundFlowResponse {
    rows: Vec<FundFlowRow>,
}

#[derive(Deserialize)]
struct ConceptResponse {
    labels: Vec<String>,
}

#[derive(Deserialize)]
struct IndicatorResponse {
    periods: Vec<FinancialIndicators>,
}

#[async_trait]
impl MarketDataProvider for GatewayClient {
    async fn profile(&self, code: &str) -> Result<StockProfile, ReportError> {
        let profile: StockProfile = self
            .get_json(&format!("/api/v1/profile/{}", code), code, &[])
            .await?;

        // Some upstream feeds answer unknown tickers with an empty row
        // instead of a 404.
        if profile.name.trim().is_empty() {
            return Err(ReportError::NotFound(code.to_string()));
        }

        Ok(profile)
    }

    async fn financial_indicators(
        &self,
        code: &str,
    ) -> Result<Vec<FinancialIndicators>, ReportError> {
        let resp: IndicatorResponse = self
            .get_json(&format!("/api/v1/financials/{}", code), code, &[])
            .await?;
        Ok(resp.periods)
    }

    async fn spot_quote(&self, code: &str) -> Result<SpotQuote, ReportError> {
        self.get_json(&format!("/api/v1/quote/{}", code), code, &[])
            .await
    }

    async fn daily_history(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, ReportError> {
        let resp: HistoryResponse = self
            .get_json(
                &format!("/api/v1/history/{}", code),
                code,
                &[
                    ("start", start.format("%Y-%m-%d").to_string()),
                    ("end", end.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;

        Ok(resp
            .bars
            .into_iter()
            .map(|b| DailyBar {
                date: b.date,
                close: b.close,
            })
            .collect())
    }

    async fn fund_flow(&self, code: &str) -> Result<Vec<FundFlowRow>, ReportError> {
        let resp: FundFlowResponse = self
            .get_json(&format!("/api/v1/fundflow/{}", code), code, &[])
            .await?;
        Ok(resp.rows)
    }

    async fn concept_labels(&self, code: &str) -> Result<Vec<String>, ReportError> {
        let resp: ConceptResponse = self
            .get_json(&format!("/api/v1/concepts/{}", code), code, &[])
            .await?;
        Ok(resp.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = GatewayClient::new("http://gw:8080/", Duration::from_secs(5));
        assert_eq!(client.base_url, "http://gw:8080");
    }

    #[test]
    fn profile_decodes_with_missing_fields() {
        let json = r#"{
            "code": "600519",
            "name": "贵州茅台",
            "market_cap": "2,100,000,000,000",
            "pe_ttm": "-",
            "pb": "8.9"
        }"#;
        let profile: StockProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "贵州茅台");
        assert_eq!(profile.pe_ttm.as_deref(), Some("-"));
        assert!(profile.dividend_yield.is_none());
    }

    #[test]
    fn history_response_decodes() {
        let json = r#"{"bars": [
            {"date": "2024-01-02", "close": 1685.0},
            {"date": "2024-01-03", "close": 1690.5}
        ]}"#;
        let resp: HistoryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.bars.len(), 2);
        assert_eq!(resp.bars[1].close, 1690.5);
    }

    #[test]
    fn fund_flow_response_decodes() {
        let json = r#"{"rows": [
            {"date": "2024-06-01", "main_net_inflow": "12,345.6", "small_net_inflow": "-"}
        ]}"#;
        let resp: FundFlowResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.rows[0].main_net_inflow.as_deref(), Some("12,345.6"));
    }
}
