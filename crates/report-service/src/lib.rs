//! Per-ticker report aggregation.
//!
//! For each request the service resolves the company profile (the one call
//! that must succeed), fans out the remaining section fetches concurrently,
//! and degrades any failed section to its empty default. Assembled reports
//! are cached per ticker for a configurable TTL.

use chrono::{Duration as ChronoDuration, Utc};
use dashmap::DashMap;
use report_core::{
    field_f64, FundamentalAnalysis, MarketDataProvider, ReportError, SentimentAnalysis,
    StockProfile, StockReport, TechnicalAnalysis, ValuationAnalysis,
};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub mod technical;


/// Trading days needed before moving averages are computed.
const MIN_BARS_FOR_MA: usize = 60;

/// History window for 52-week range and moving averages.
const HISTORY_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_entries: 1000,
        }
    }
}

/// Cached report with its fetch timestamp.
struct CacheEntry {
    report: StockReport,
    cached_at: Instant,
}

pub struct StockReportService {
    provider: Arc<dyn MarketDataProvider>,
    config: CacheConfig,
    cache: DashMap<String, CacheEntry>,
    last_sweep: Mutex<Instant>,
}

impl StockReportService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: CacheConfig) -> Self {
        Self {
            provider,
            config,
            cache: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Build (or serve from cache) the full four-section report for a ticker.
    pub async fn full_report(&self, code: &str) -> Result<StockReport, ReportError> {
        if let Some(entry) = self.cache.get(code) {
            if entry.cached_at.elapsed() < self.config.ttl {
                tracing::info!("Serving cached report for {}", code);
                return Ok(entry.report.clone());
            }
        }

        self.sweep_expired();

        // Primary lookup. Unlike the section fetches this one is not
        // tolerated: no name, no report.
        let profile = self.provider.profile(code).await?;
        if profile.name.trim().is_empty() {
            return Err(ReportError::NotFound(code.to_string()));
        }

        let (fundamental, valuation, technical, sentiment) = tokio::join!(
            self.build_fundamental(code, &profile),
            self.build_valuation(&profile),
            self.build_technical(code),
            self.build_sentiment(code),
        );

        let fundamental = match fundamental {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Fundamental section failed for {}: {}", code, e);
                FundamentalAnalysis::default()
            }
        };

        let technical = match technical {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Technical section failed for {}: {}", code, e);
                TechnicalAnalysis::default()
            }
        };

        let report = StockReport {
            code: code.to_string(),
            name: profile.name.clone(),
            update_time: Utc::now(),
            fundamental,
            valuation,
            technical,
            sentiment,
        };

        // Size guard only, no eviction: a full cache stops accepting entries
        // until the sweep frees room.
        if self.cache.len() < self.config.max_entries {
            self.cache.insert(
                code.to_string(),
                CacheEntry {
                    report: report.clone(),
                    cached_at: Instant::now(),
                },
            );
        }

        tracing::info!("Built full report for {} ({})", code, report.name);
        Ok(report)
    }

    /// Drop every expired entry, at most once per TTL interval.
    fn sweep_expired(&self) {
        let mut last = match self.last_sweep.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if last.elapsed() < self.config.ttl {
            return;
        }

        let before = self.cache.len();
        let ttl = self.config.ttl;
        self.cache.retain(|_, entry| entry.cached_at.elapsed() < ttl);
        *last = Instant::now();

        let removed = before.saturating_sub(self.cache.len());
        if removed > 0 {
            tracing::info!("Swept {} expired cache entries", removed);
        }
    }

    async fn build_fundamental(
        &self,
        code: &str,
        profile: &StockProfile,
    ) -> Result<FundamentalAnalysis, ReportError> {
        let periods = self.provider.financial_indicators(code).await?;

        let mut section = FundamentalAnalysis {
            market_cap: field_f64(profile.market_cap.as_ref()),
            circulating_market_cap: field_f64(profile.circulating_market_cap.as_ref()),
            total_shares: field_f64(profile.total_shares.as_ref()),
            circulating_shares: field_f64(profile.circulating_shares.as_ref()),
            ..Default::default()
        };

        if let Some(latest) = periods.last() {
            section.revenue_ttm = field_f64(latest.revenue.as_ref());
            section.net_profit_ttm = field_f64(latest.net_profit.as_ref());
            section.gross_profit_margin = field_f64(latest.gross_profit_margin.as_ref());
            section.net_profit_margin = field_f64(latest.net_profit_margin.as_ref());
            section.roe = field_f64(latest.roe.as_ref());
            section.roa = field_f64(latest.roa.as_ref());
            section.debt_to_asset_ratio = field_f64(latest.debt_to_asset_ratio.as_ref());
            section.current_ratio = field_f64(latest.current_ratio.as_ref());
            section.quick_ratio = field_f64(latest.quick_ratio.as_ref());
            section.revenue_growth_yoy = field_f64(latest.revenue_growth_yoy.as_ref());
            section.net_profit_growth_yoy = field_f64(latest.net_profit_growth_yoy.as_ref());
        }

        Ok(section)
    }

    /// Valuation comes straight off the already-fetched profile, so it cannot
    /// fail once the primary lookup has succeeded.
    async fn build_valuation(&self, profile: &StockProfile) -> ValuationAnalysis {
        ValuationAnalysis {
            pe_static: field_f64(profile.pe_static.as_ref()),
            pe_dynamic: field_f64(profile.pe_dynamic.as_ref()),
            pe_ttm: field_f64(profile.pe_ttm.as_ref()),
            pb: field_f64(profile.pb.as_ref()),
            ps: field_f64(profile.ps.as_ref()),
            dividend_yield: field_f64(profile.dividend_yield.as_ref()),
        }
    }

    async fn build_technical(&self, code: &str) -> Result<TechnicalAnalysis, ReportError> {
        let end = Utc::now().date_naive();
        let start = end - ChronoDuration::days(HISTORY_DAYS);

        let (quote, history) = tokio::join!(
            self.provider.spot_quote(code),
            self.provider.daily_history(code, start, end),
        );
        let quote = quote?;
        let history = history?;

        let mut section = TechnicalAnalysis {
            current_price: field_f64(quote.latest_price.as_ref()),
            price_change: field_f64(quote.price_change.as_ref()),
            price_change_percent: field_f64(quote.price_change_percent.as_ref()),
            volume: field_f64(quote.volume.as_ref()),
            turnover: field_f64(quote.turnover.as_ref()),
            turnover_rate: field_f64(quote.turnover_rate.as_ref()),
            day_high: field_f64(quote.high.as_ref()),
            day_low: field_f64(quote.low.as_ref()),
            ..Default::default()
        };

        let closes: Vec<f64> = history.iter().map(|b| b.close).collect();
        if closes.len() >= MIN_BARS_FOR_MA {
            section.ma_5 = technical::moving_average(&closes, 5);
            section.ma_10 = technical::moving_average(&closes, 10);
            section.ma_20 = technical::moving_average(&closes, 20);
            section.ma_60 = technical::moving_average(&closes, 60);

            let (high, low) = technical::range_high_low(&closes);
            section.week_52_high = high;
            section.week_52_low = low;
        }

        Ok(section)
    }

    /// Fund flow and concept labels are independent best-effort fetches: one
    /// failing leaves only its own fields empty.
    async fn build_sentiment(&self, code: &str) -> SentimentAnalysis {
        let (rows, labels) = tokio::join!(
            self.provider.fund_flow(code),
            self.provider.concept_labels(code),
        );

        let mut section = SentimentAnalysis::default();

        match rows {
            Ok(rows) => {
                if let Some(latest) = rows.last() {
                    section.main_net_inflow = field_f64(latest.main_net_inflow.as_ref());
                    section.super_large_net_inflow =
                        field_f64(latest.super_large_net_inflow.as_ref());
                    section.large_net_inflow = field_f64(latest.large_net_inflow.as_ref());
                    section.medium_net_inflow = field_f64(latest.medium_net_inflow.as_ref());
                    section.small_net_inflow = field_f64(latest.small_net_inflow.as_ref());
                }
            }
            Err(e) => {
                tracing::warn!("Fund flow failed for {}: {}", code, e);
            }
        }

        match labels {
            Ok(mut labels) => {
                labels.truncate(10);
                section.concept_labels = labels;
            }
            Err(e) => {
                tracing::warn!("Concept labels failed for {}: {}", code, e);
            }
        }

        section
    }

    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.len()
    }
}
