//! Typed records produced by the extraction pipeline.
//!
//! Every record is a plain value type: nothing here borrows from the
//! rendered document, so a snapshot outlives the browser session that
//! produced it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single position in the tracked portfolio.
///
/// `last_price`/`weight` carry the parsed numeric values while the
/// `*_display` fields preserve the original text exactly as the page
/// showed it. A parsed value of `0.0` means "unknown", not zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub last_price: f64,
    pub price_display: String,
    pub weight: f64,
    pub weight_display: String,
}

/// Disclosed transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Purchase,
    Sale,
    Exchange,
    Unknown,
}

impl TradeAction {
    /// Classifies free text from a trade row or surrounding markup.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("purchase") || lower.contains("buy") || lower.contains("bought") {
            TradeAction::Purchase
        } else if lower.contains("sale") || lower.contains("sell") || lower.contains("sold") {
            TradeAction::Sale
        } else if lower.contains("exchange") {
            TradeAction::Exchange
        } else {
            TradeAction::Unknown
        }
    }
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TradeAction::Purchase => "Purchase",
                TradeAction::Sale => "Sale",
                TradeAction::Exchange => "Exchange",
                TradeAction::Unknown => "Unknown",
            }
        )
    }
}

/// Instrument category as disclosed on the filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instrument {
    Stock,
    CallOptions,
    PutOptions,
    Other,
}

impl Instrument {
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        if lower.contains("call") {
            Instrument::CallOptions
        } else if lower.contains("put") {
            Instrument::PutOptions
        } else if lower.contains("stock") || lower.contains("share") {
            Instrument::Stock
        } else {
            Instrument::Other
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Instrument::Stock => "Stock",
                Instrument::CallOptions => "Call Options",
                Instrument::PutOptions => "Put Options",
                Instrument::Other => "Other",
            }
        )
    }
}

/// One disclosed trade. Immutable once extracted: a fresh list is
/// built on every fetch, there is no update path.
///
/// Dates are `None` when the page gave nothing parseable; `None` must
/// propagate as "unknown date", never default to today. A missing
/// amount bracket is the explicit `"N/A"` marker rather than an
/// omitted field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub ticker: String,
    pub action: TradeAction,
    pub traded_date: Option<NaiveDate>,
    pub filed_date: Option<NaiveDate>,
    #[serde(rename = "amount")]
    pub amount_range: String,
    #[serde(rename = "type")]
    pub instrument: Instrument,
    pub description: String,
}

/// A related-stock suggestion shown on a detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarStock {
    pub ticker: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub reason: String,
}

/// A single charting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

/// Everything extracted from one stock detail page, with the trade
/// list already filtered to the tracked entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDetail {
    pub ticker: String,
    pub company_name: String,
    pub exchange: String,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub week_range_low: f64,
    pub week_range_high: f64,
    pub status: String,
    pub description: String,
    pub trades: Vec<Trade>,
    pub similar_stocks: Vec<SimilarStock>,
    pub price_history: Vec<PricePoint>,
}

/// A named sector slice. The set of slices for a portfolio should sum
/// to roughly 100 but this is never validated; partial or missing
/// sectors are acceptable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorAllocation {
    pub name: String,
    pub percentage: f64,
}

/// Filing-cadence figures scanned from the page text. Each label is
/// independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilingStats {
    pub avg_reporting_time: Option<i64>,
    pub avg_filing_frequency: Option<i64>,
    pub time_since_last_filing: Option<i64>,
}

/// Headline performance figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPerformance {
    pub performance_percent: Option<f64>,
    pub total_invested: Option<f64>,
}

/// Counters shown near the portfolio header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub holdings_count: Option<i64>,
    pub copiers: Option<i64>,
}

/// One full portfolio-page extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    pub holdings: Vec<Holding>,
    pub recent_trades: Vec<Trade>,
    pub sector_allocation: Vec<SectorAllocation>,
    pub performance: PortfolioPerformance,
    pub stats: PortfolioStats,
    pub filing_statistics: FilingStats,
    pub historical_performance: Vec<PricePoint>,
    pub last_updated: DateTime<Utc>,
}

/// Outcome of a top-level extraction call.
///
/// `Unavailable` carries no partial data: the orchestrator never hands
/// back a half-built object presented as whole. An empty list inside
/// `Available` is a legitimate successful result and is distinct from
/// `Unavailable`.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<T> {
    Available(T),
    Unavailable,
}

impl<T> Extraction<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Extraction::Available(_))
    }

    /// Converts into an `Option`, discarding the unavailable marker.
    pub fn available(self) -> Option<T> {
        match self {
            Extraction::Available(value) => Some(value),
            Extraction::Unavailable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_text() {
        assert_eq!(TradeAction::from_text("Purchase of shares"), TradeAction::Purchase);
        assert_eq!(TradeAction::from_text("partial SALE"), TradeAction::Sale);
        assert_eq!(TradeAction::from_text("exchange"), TradeAction::Exchange);
        assert_eq!(TradeAction::from_text("received"), TradeAction::Unknown);
    }

    #[test]
    fn instrument_from_text() {
        assert_eq!(Instrument::from_text("Call Options"), Instrument::CallOptions);
        assert_eq!(Instrument::from_text("put options"), Instrument::PutOptions);
        assert_eq!(Instrument::from_text("Stock"), Instrument::Stock);
        assert_eq!(Instrument::from_text("31,600 shares sold"), Instrument::Stock);
        assert_eq!(Instrument::from_text("municipal bond"), Instrument::Other);
    }

    #[test]
    fn extraction_available() {
        let ok: Extraction<Vec<i32>> = Extraction::Available(vec![]);
        assert!(ok.is_available());
        assert_eq!(ok.available(), Some(vec![]));

        let missing: Extraction<Vec<i32>> = Extraction::Unavailable;
        assert!(!missing.is_available());
        assert_eq!(missing.available(), None);
    }
}
