use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fundamental analysis section: share structure, profitability, health,
/// growth. All fields optional — a missing provider field is absence, not an
/// error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FundamentalAnalysis {
    /// Total market cap (CNY)
    pub market_cap: Option<f64>,
    /// Free-float market cap (CNY)
    pub circulating_market_cap: Option<f64>,
    pub total_shares: Option<f64>,
    pub circulating_shares: Option<f64>,

    pub revenue_ttm: Option<f64>,
    pub net_profit_ttm: Option<f64>,
    /// Gross margin (%)
    pub gross_profit_margin: Option<f64>,
    /// Net margin (%)
    pub net_profit_margin: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,

    /// Debt-to-asset ratio (%)
    pub debt_to_asset_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,

    /// Revenue growth year-over-year (%)
    pub revenue_growth_yoy: Option<f64>,
    /// Net profit growth year-over-year (%)
    pub net_profit_growth_yoy: Option<f64>,
}

/// Valuation multiples section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValuationAnalysis {
    pub pe_static: Option<f64>,
    pub pe_dynamic: Option<f64>,
    pub pe_ttm: Option<f64>,
    pub pb: Option<f64>,
    pub ps: Option<f64>,
    /// Dividend yield (%)
    pub dividend_yield: Option<f64>,
}

/// Technical section: spot quote plus indicators derived from daily history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TechnicalAnalysis {
    pub current_price: Option<f64>,
    pub price_change: Option<f64>,
    pub price_change_percent: Option<f64>,

    pub volume: Option<f64>,
    pub turnover: Option<f64>,
    /// Turnover rate (%)
    pub turnover_rate: Option<f64>,

    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub week_52_high: Option<f64>,
    pub week_52_low: Option<f64>,

    pub ma_5: Option<f64>,
    pub ma_10: Option<f64>,
    pub ma_20: Option<f64>,
    pub ma_60: Option<f64>,
}

/// Sentiment section: money-flow breakdown and concept-board membership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SentimentAnalysis {
    /// Main-force net inflow (CNY 10k)
    pub main_net_inflow: Option<f64>,
    pub super_large_net_inflow: Option<f64>,
    pub large_net_inflow: Option<f64>,
    pub medium_net_inflow: Option<f64>,
    pub small_net_inflow: Option<f64>,

    /// Concept-board labels, capped at 10
    #[serde(default)]
    pub concept_labels: Vec<String>,
}

/// Full per-ticker report: the aggregation result returned by the API and
/// held in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StockReport {
    /// 6-digit ticker code
    pub code: String,
    /// Company short name resolved from the primary lookup
    pub name: String,
    pub update_time: DateTime<Utc>,

    pub fundamental: FundamentalAnalysis,
    pub valuation: ValuationAnalysis,
    pub technical: TechnicalAnalysis,
    pub sentiment: SentimentAnalysis,
}

/// JSON body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub detail: String,
}
