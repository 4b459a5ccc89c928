use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ReportError;

/// Primary lookup result: company identity plus the raw valuation and share
/// structure fields the gateway reports alongside it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockProfile {
    pub code: String,
    pub name: String,

    pub market_cap: Option<String>,
    pub circulating_market_cap: Option<String>,
    pub total_shares: Option<String>,
    pub circulating_shares: Option<String>,

    pub pe_static: Option<String>,
    pub pe_dynamic: Option<String>,
    pub pe_ttm: Option<String>,
    pub pb: Option<String>,
    pub ps: Option<String>,
    pub dividend_yield: Option<String>,
}

/// One reporting period of financial indicators. Latest period wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialIndicators {
    /// Period end date, e.g. "2024-12-31"
    pub period: String,
    pub revenue: Option<String>,
    pub net_profit: Option<String>,
    pub gross_profit_margin: Option<String>,
    pub net_profit_margin: Option<String>,
    pub roe: Option<String>,
    pub roa: Option<String>,
    pub debt_to_asset_ratio: Option<String>,
    pub current_ratio: Option<String>,
    pub quick_ratio: Option<String>,
    pub revenue_growth_yoy: Option<String>,
    pub net_profit_growth_yoy: Option<String>,
}

/// Real-time quote row for a single ticker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotQuote {
    pub code: String,
    pub latest_price: Option<String>,
    pub price_change: Option<String>,
    pub price_change_percent: Option<String>,
    pub volume: Option<String>,
    pub turnover: Option<String>,
    pub turnover_rate: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
}

/// Daily OHLC bar; only the close participates in indicator computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// One day of money-flow data. Latest row wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FundFlowRow {
    pub date: String,
    pub main_net_inflow: Option<String>,
    pub super_large_net_inflow: Option<String>,
    pub large_net_inflow: Option<String>,
    pub medium_net_inflow: Option<String>,
    pub small_net_inflow: Option<String>,
}

/// Seam between the aggregation service and the external market-data
/// gateway. The service only ever talks through this trait, so tests swap in
/// an in-memory provider.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Resolve company identity. This is the one call that must succeed for
    /// a report to be produced; an unknown ticker is `ReportError::NotFound`.
    async fn profile(&self, code: &str) -> Result<StockProfile, ReportError>;

    /// Financial indicator history, oldest first.
    async fn financial_indicators(
        &self,
        code: &str,
    ) -> Result<Vec<FinancialIndicators>, ReportError>;

    async fn spot_quote(&self, code: &str) -> Result<SpotQuote, ReportError>;

    /// Daily bars in [start, end], oldest first.
    async fn daily_history(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyBar>, ReportError>;

    /// Money-flow history, oldest first.
    async fn fund_flow(&self, code: &str) -> Result<Vec<FundFlowRow>, ReportError>;

    async fn concept_labels(&self, code: &str) -> Result<Vec<String>, ReportError>;
}
