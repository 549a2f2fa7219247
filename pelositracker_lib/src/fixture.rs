//! Reference dataset compiled from official disclosure filings.
//!
//! This is the fallback the server serves when live extraction is
//! unavailable, and the baseline for the comparison and prediction
//! modules. The dataset is constructed once at startup and immutable
//! thereafter; nothing in the process mutates it after `load`.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TrackerError;
use pelositracker_scrape::{
    FilingStats, Holding, Instrument, PortfolioPerformance, PortfolioSnapshot, PortfolioStats,
    PricePoint, SectorAllocation, SimilarStock, StockDetail, Trade, TradeAction,
};

/// One month of portfolio (or index) value, for the comparison charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue {
    pub date: String,
    pub value: f64,
}

/// An attributed quote shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub quote: String,
    pub source: String,
    pub context: String,
}

/// Holdings and headline figures for one tracked profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePortfolio {
    pub holdings: Vec<Holding>,
    pub performance: PortfolioPerformance,
    pub stats: PortfolioStats,
}

/// Static per-ticker descriptive data for the detail pages.
#[derive(Debug, Clone)]
struct StockInfo {
    company_name: String,
    description: String,
    week_range_low: f64,
    week_range_high: f64,
    price_change: f64,
    price_change_percent: f64,
    similar_stocks: Vec<SimilarStock>,
}

fn trade(
    ticker: &str,
    action: TradeAction,
    traded: (i32, u32, u32),
    filed: (i32, u32, u32),
    amount: &str,
    instrument: Instrument,
    description: &str,
) -> Trade {
    Trade {
        ticker: ticker.to_string(),
        action,
        traded_date: NaiveDate::from_ymd_opt(traded.0, traded.1, traded.2),
        filed_date: NaiveDate::from_ymd_opt(filed.0, filed.1, filed.2),
        amount_range: amount.to_string(),
        instrument,
        description: description.to_string(),
    }
}

fn holding(ticker: &str, last_price: f64, weight: f64) -> Holding {
    Holding {
        ticker: ticker.to_string(),
        last_price,
        price_display: format!("${last_price:.2}"),
        weight,
        weight_display: format!("{weight:.0}%"),
    }
}

fn month(date: &str, value: f64) -> MonthlyValue {
    MonthlyValue {
        date: date.to_string(),
        value,
    }
}

fn similar(
    ticker: &str,
    name: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    reason: &str,
) -> SimilarStock {
    SimilarStock {
        ticker: ticker.to_string(),
        name: name.to_string(),
        price,
        change,
        change_percent,
        reason: reason.to_string(),
    }
}

/// The full reference dataset, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    trades: Vec<Trade>,
    holdings: Vec<Holding>,
    sectors: Vec<SectorAllocation>,
    historical: Vec<MonthlyValue>,
    sp500: Vec<MonthlyValue>,
    quotes: Vec<Quote>,
    profiles: HashMap<String, ProfilePortfolio>,
    stock_info: HashMap<String, StockInfo>,
}

impl ReferenceData {
    pub fn load() -> Self {
        let data = Self {
            trades: reference_trades(),
            holdings: reference_holdings(),
            sectors: reference_sectors(),
            historical: historical_performance(),
            sp500: sp500_series(),
            quotes: reference_quotes(),
            profiles: profile_portfolios(),
            stock_info: stock_info_map(),
        };
        info!(
            "reference dataset loaded: {} trade(s), {} holding(s), {} profile(s)",
            data.trades.len(),
            data.holdings.len(),
            data.profiles.len()
        );
        data
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn historical(&self) -> &[MonthlyValue] {
        &self.historical
    }

    pub fn sp500(&self) -> &[MonthlyValue] {
        &self.sp500
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn profile(&self, profile_id: &str) -> Result<&ProfilePortfolio, TrackerError> {
        self.profiles
            .get(&profile_id.to_lowercase())
            .ok_or_else(|| TrackerError::UnknownProfile(profile_id.to_string()))
    }

    /// Assembles a full snapshot from the reference dataset, stamped
    /// with the current time.
    pub fn portfolio_snapshot(&self) -> PortfolioSnapshot {
        PortfolioSnapshot {
            holdings: self.holdings.clone(),
            recent_trades: self.trades.clone(),
            sector_allocation: self.sectors.clone(),
            performance: PortfolioPerformance {
                performance_percent: Some(38.0),
                total_invested: Some(168_000_000.0),
            },
            stats: PortfolioStats {
                holdings_count: Some(11),
                copiers: Some(15234),
            },
            filing_statistics: FilingStats {
                avg_reporting_time: Some(23),
                avg_filing_frequency: Some(55),
                time_since_last_filing: Some(38),
            },
            historical_performance: self
                .historical
                .iter()
                .map(|m| PricePoint {
                    date: m.date.clone(),
                    price: m.value,
                })
                .collect(),
            last_updated: Utc::now(),
        }
    }

    /// Assembles a detail view for `ticker` from the reference
    /// dataset: filed trades for that symbol, the held price when the
    /// portfolio carries it, and a synthetic 30-day price history
    /// derived deterministically from the held price.
    pub fn stock_detail(&self, ticker: &str) -> StockDetail {
        let ticker = ticker.to_uppercase();
        let trades: Vec<Trade> = self
            .trades
            .iter()
            .filter(|t| t.ticker == ticker)
            .cloned()
            .collect();
        let held = self.holdings.iter().find(|h| h.ticker == ticker);
        let current_price = held.map(|h| h.last_price).unwrap_or(0.0);

        let fallback;
        let info = match self.stock_info.get(&ticker) {
            Some(known) => known,
            None => {
                fallback = StockInfo {
                    company_name: format!("{ticker} Corporation"),
                    description: format!("Stock information for {ticker}"),
                    week_range_low: 0.0,
                    week_range_high: 0.0,
                    price_change: 0.0,
                    price_change_percent: 0.0,
                    similar_stocks: Vec::new(),
                };
                &fallback
            }
        };

        StockDetail {
            company_name: info.company_name.clone(),
            exchange: "NASDAQ".to_string(),
            current_price,
            price_change: info.price_change,
            price_change_percent: info.price_change_percent,
            week_range_low: info.week_range_low,
            week_range_high: info.week_range_high,
            status: "Active".to_string(),
            description: info.description.clone(),
            trades,
            similar_stocks: info.similar_stocks.clone(),
            price_history: synthetic_history(
                held.map(|h| h.last_price).unwrap_or(100.0),
                Utc::now().date_naive(),
            ),
            ticker,
        }
    }
}

/// 30 daily points sloping gently up to the current price. Purely a
/// function of the price and the given day, so repeated calls on the
/// same day agree.
pub fn synthetic_history(current_price: f64, today: NaiveDate) -> Vec<PricePoint> {
    (1..=30i64)
        .rev()
        .map(|days_ago| {
            let base = if days_ago > 20 {
                0.95
            } else if days_ago > 10 {
                0.98
            } else {
                0.99
            };
            let daily_var = ((days_ago % 3) as f64 - 1.0) * 0.005;
            let price = current_price * base * (1.0 + daily_var);
            PricePoint {
                date: (today - Duration::days(days_ago))
                    .format("%Y-%m-%d")
                    .to_string(),
                price: (price * 100.0).round() / 100.0,
            }
        })
        .collect()
}

fn reference_trades() -> Vec<Trade> {
    use Instrument::{CallOptions, Stock};
    use TradeAction::{Purchase, Sale};
    vec![
        trade("GOOGL", Purchase, (2025, 1, 14), (2025, 1, 16), "$250,001 - $500,000", CallOptions, "50 call options, strike $150, exp 1/16/2026"),
        trade("AMZN", Purchase, (2025, 1, 14), (2025, 1, 16), "$250,001 - $500,000", CallOptions, "50 call options, strike $150, exp 1/16/2026"),
        trade("TEM", Purchase, (2025, 1, 14), (2025, 1, 16), "$50,001 - $100,000", CallOptions, "50 call options, strike $20, exp 1/16/2026"),
        trade("AAPL", Sale, (2024, 12, 31), (2025, 1, 2), "$5,000,001 - $25,000,000", Stock, "31,600 shares sold"),
        trade("NVDA", Sale, (2024, 12, 31), (2025, 1, 2), "$1,000,001 - $5,000,000", Stock, "10,000 shares sold"),
        trade("NVDA", Purchase, (2024, 12, 20), (2024, 12, 23), "$500,001 - $1,000,000", CallOptions, "500 call options exercised, strike $12"),
        trade("PANW", Purchase, (2024, 12, 20), (2024, 12, 23), "$1,000,001 - $5,000,000", CallOptions, "140 call options exercised, strike $100"),
        trade("CRWD", Purchase, (2024, 11, 22), (2024, 11, 25), "$1,000,001 - $5,000,000", CallOptions, "Call options purchase"),
        trade("AVGO", Purchase, (2024, 11, 22), (2024, 11, 25), "$5,000,001 - $25,000,000", CallOptions, "Call options purchase"),
        trade("NVDA", Purchase, (2024, 11, 18), (2024, 11, 20), "$1,000,001 - $5,000,000", CallOptions, "10,000 call options, strike $120"),
        trade("GOOGL", Purchase, (2024, 10, 15), (2024, 10, 17), "$500,001 - $1,000,000", CallOptions, "20 call options, strike $140"),
        trade("MSFT", Purchase, (2024, 10, 10), (2024, 10, 12), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $400"),
        trade("NVDA", Sale, (2024, 9, 26), (2024, 9, 30), "$1,000,001 - $5,000,000", Stock, "5,000 shares sold"),
        trade("TSLA", Purchase, (2024, 9, 18), (2024, 9, 20), "$500,001 - $1,000,000", CallOptions, "25 call options, strike $220"),
        trade("AMZN", Purchase, (2024, 8, 22), (2024, 8, 26), "$500,001 - $1,000,000", CallOptions, "20 call options, strike $160"),
        trade("GOOGL", Sale, (2024, 8, 15), (2024, 8, 19), "$1,000,001 - $5,000,000", Stock, "8,000 shares sold"),
        trade("MSFT", Purchase, (2024, 7, 1), (2024, 7, 3), "$1,000,001 - $5,000,000", CallOptions, "Call options purchase"),
        trade("NVDA", Purchase, (2024, 7, 10), (2024, 7, 12), "$2,000,001 - $5,000,000", CallOptions, "50 call options, strike $100"),
        trade("AAPL", Purchase, (2024, 6, 28), (2024, 7, 1), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $180"),
        trade("PANW", Purchase, (2024, 6, 14), (2024, 6, 18), "$500,001 - $1,000,000", CallOptions, "50 call options, strike $280"),
        trade("CRWD", Purchase, (2024, 5, 22), (2024, 5, 24), "$500,001 - $1,000,000", CallOptions, "20 call options, strike $250"),
        trade("NVDA", Sale, (2024, 5, 15), (2024, 5, 17), "$1,000,001 - $5,000,000", Stock, "7,500 shares sold"),
        trade("GOOGL", Purchase, (2024, 4, 25), (2024, 4, 29), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $130"),
        trade("MSFT", Sale, (2024, 4, 18), (2024, 4, 22), "$500,001 - $1,000,000", Stock, "2,000 shares sold"),
        trade("NVDA", Purchase, (2024, 3, 20), (2024, 3, 22), "$5,000,001 - $25,000,000", CallOptions, "200 call options, strike $80"),
        trade("AVGO", Purchase, (2024, 3, 12), (2024, 3, 14), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $1,000"),
        trade("AAPL", Sale, (2024, 2, 28), (2024, 3, 1), "$1,000,001 - $5,000,000", Stock, "10,000 shares sold"),
        trade("AMZN", Purchase, (2024, 2, 14), (2024, 2, 16), "$500,001 - $1,000,000", CallOptions, "25 call options, strike $140"),
        trade("TSLA", Sale, (2024, 1, 30), (2024, 2, 1), "$500,001 - $1,000,000", Stock, "3,000 shares sold"),
        trade("NVDA", Purchase, (2024, 1, 22), (2024, 1, 24), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $500"),
        trade("GOOGL", Sale, (2023, 12, 20), (2023, 12, 22), "$1,000,001 - $5,000,000", Stock, "12,000 shares sold"),
        trade("MSFT", Purchase, (2023, 12, 15), (2023, 12, 18), "$2,000,001 - $5,000,000", CallOptions, "100 call options, strike $350"),
        trade("NVDA", Purchase, (2023, 11, 28), (2023, 11, 30), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $450"),
        trade("AAPL", Purchase, (2023, 11, 15), (2023, 11, 17), "$500,001 - $1,000,000", CallOptions, "50 call options, strike $170"),
        trade("AMZN", Sale, (2023, 10, 25), (2023, 10, 27), "$1,000,001 - $5,000,000", Stock, "15,000 shares sold"),
        trade("GOOGL", Purchase, (2023, 10, 12), (2023, 10, 16), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $120"),
        trade("NVDA", Sale, (2023, 9, 20), (2023, 9, 22), "$2,000,001 - $5,000,000", Stock, "15,000 shares sold"),
        trade("MSFT", Purchase, (2023, 9, 8), (2023, 9, 11), "$500,001 - $1,000,000", CallOptions, "25 call options, strike $320"),
        trade("AAPL", Sale, (2023, 8, 30), (2023, 9, 1), "$1,000,001 - $5,000,000", Stock, "15,000 shares sold"),
        trade("NVDA", Purchase, (2023, 8, 15), (2023, 8, 17), "$5,000,001 - $25,000,000", CallOptions, "200 call options, strike $400"),
        trade("GOOGL", Purchase, (2023, 7, 28), (2023, 7, 31), "$1,000,001 - $5,000,000", CallOptions, "75 call options, strike $110"),
        trade("TSLA", Purchase, (2023, 7, 14), (2023, 7, 17), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $250"),
        trade("NVDA", Purchase, (2023, 6, 22), (2023, 6, 26), "$10,000,001 - $50,000,000", CallOptions, "500 call options, strike $350"),
        trade("MSFT", Sale, (2023, 6, 8), (2023, 6, 12), "$500,001 - $1,000,000", Stock, "3,000 shares sold"),
        trade("AAPL", Purchase, (2022, 12, 28), (2022, 12, 30), "$5,000,001 - $25,000,000", CallOptions, "200 call options, strike $140"),
        trade("GOOGL", Sale, (2022, 12, 15), (2022, 12, 19), "$1,000,001 - $5,000,000", Stock, "20,000 shares sold"),
        trade("NVDA", Purchase, (2022, 11, 30), (2022, 12, 2), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $150"),
        trade("MSFT", Purchase, (2022, 11, 18), (2022, 11, 21), "$1,000,001 - $5,000,000", CallOptions, "50 call options, strike $240"),
        trade("AMZN", Purchase, (2022, 10, 25), (2022, 10, 27), "$500,001 - $1,000,000", CallOptions, "50 call options, strike $90"),
        trade("GOOGL", Purchase, (2022, 10, 12), (2022, 10, 14), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $90"),
        trade("AAPL", Sale, (2022, 9, 28), (2022, 9, 30), "$2,000,001 - $5,000,000", Stock, "25,000 shares sold"),
        trade("NVDA", Purchase, (2022, 9, 15), (2022, 9, 19), "$500,001 - $1,000,000", CallOptions, "50 call options, strike $120"),
        trade("MSFT", Sale, (2022, 8, 30), (2022, 9, 1), "$1,000,001 - $5,000,000", Stock, "8,000 shares sold"),
        trade("GOOGL", Purchase, (2022, 8, 18), (2022, 8, 22), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $100"),
        trade("NVDA", Purchase, (2022, 7, 28), (2022, 8, 1), "$5,000,001 - $25,000,000", CallOptions, "500 call options, strike $140"),
        trade("AAPL", Purchase, (2022, 7, 15), (2022, 7, 18), "$1,000,001 - $5,000,000", CallOptions, "100 call options, strike $130"),
        trade("TSLA", Sale, (2022, 6, 30), (2022, 7, 5), "$1,000,001 - $5,000,000", Stock, "10,000 shares sold"),
        trade("AMZN", Purchase, (2022, 6, 16), (2022, 6, 20), "$500,001 - $1,000,000", CallOptions, "50 call options, strike $100"),
        trade("GOOGL", Sale, (2022, 5, 25), (2022, 5, 27), "$1,000,001 - $5,000,000", Stock, "15,000 shares sold"),
        trade("NVDA", Purchase, (2022, 5, 12), (2022, 5, 16), "$2,000,001 - $5,000,000", CallOptions, "200 call options, strike $160"),
    ]
}

fn reference_holdings() -> Vec<Holding> {
    vec![
        holding("NVDA", 145.89, 19.0),
        holding("GOOGL", 189.50, 17.0),
        holding("AVGO", 227.15, 16.0),
        holding("PANW", 210.33, 8.0),
        holding("TEM", 85.20, 8.0),
        holding("AMZN", 230.75, 8.0),
        holding("VST", 145.60, 7.0),
        holding("CRWD", 398.25, 6.0),
        holding("AAPL", 250.35, 4.0),
        holding("MSFT", 445.20, 4.0),
        holding("TSLA", 412.80, 3.0),
    ]
}

fn reference_sectors() -> Vec<SectorAllocation> {
    vec![
        SectorAllocation {
            name: "Technology".to_string(),
            percentage: 85.0,
        },
        SectorAllocation {
            name: "Communication Services".to_string(),
            percentage: 10.0,
        },
        SectorAllocation {
            name: "Consumer Discretionary".to_string(),
            percentage: 5.0,
        },
    ]
}

// Monthly portfolio values, May 2022 through January 2025.
fn historical_performance() -> Vec<MonthlyValue> {
    vec![
        month("2022-05", 95_000_000.0),
        month("2022-06", 92_000_000.0),
        month("2022-07", 88_000_000.0),
        month("2022-08", 85_000_000.0),
        month("2022-09", 82_000_000.0),
        month("2022-10", 80_000_000.0),
        month("2022-11", 84_000_000.0),
        month("2022-12", 87_000_000.0),
        month("2023-01", 91_000_000.0),
        month("2023-02", 94_000_000.0),
        month("2023-03", 98_000_000.0),
        month("2023-04", 102_000_000.0),
        month("2023-05", 106_000_000.0),
        month("2023-06", 112_000_000.0),
        month("2023-07", 118_000_000.0),
        month("2023-08", 115_000_000.0),
        month("2023-09", 110_000_000.0),
        month("2023-10", 114_000_000.0),
        month("2023-11", 119_000_000.0),
        month("2023-12", 122_000_000.0),
        month("2024-01", 126_000_000.0),
        month("2024-02", 129_000_000.0),
        month("2024-03", 135_000_000.0),
        month("2024-04", 138_000_000.0),
        month("2024-05", 142_000_000.0),
        month("2024-06", 145_000_000.0),
        month("2024-07", 148_000_000.0),
        month("2024-08", 151_000_000.0),
        month("2024-09", 154_000_000.0),
        month("2024-10", 158_000_000.0),
        month("2024-11", 162_000_000.0),
        month("2024-12", 165_000_000.0),
        month("2025-01", 168_000_000.0),
    ]
}

// S&P 500 over the same window, normalized to the same starting value.
fn sp500_series() -> Vec<MonthlyValue> {
    vec![
        month("2022-05", 95_000_000.0),
        month("2022-06", 87_550_000.0),
        month("2022-07", 90_440_000.0),
        month("2022-08", 86_450_000.0),
        month("2022-09", 81_370_000.0),
        month("2022-10", 89_300_000.0),
        month("2022-11", 94_525_000.0),
        month("2022-12", 89_680_000.0),
        month("2023-01", 95_680_000.0),
        month("2023-02", 93_230_000.0),
        month("2023-03", 96_850_000.0),
        month("2023-04", 98_090_000.0),
        month("2023-05", 98_090_000.0),
        month("2023-06", 104_760_000.0),
        month("2023-07", 107_900_000.0),
        month("2023-08", 106_190_000.0),
        month("2023-09", 101_710_000.0),
        month("2023-10", 99_690_000.0),
        month("2023-11", 108_740_000.0),
        month("2023-12", 113_590_000.0),
        month("2024-01", 115_320_000.0),
        month("2024-02", 120_920_000.0),
        month("2024-03", 124_880_000.0),
        month("2024-04", 120_160_000.0),
        month("2024-05", 125_090_000.0),
        month("2024-06", 128_750_000.0),
        month("2024-07", 129_900_000.0),
        month("2024-08", 132_280_000.0),
        month("2024-09", 134_980_000.0),
        month("2024-10", 133_840_000.0),
        month("2024-11", 141_340_000.0),
        month("2024-12", 138_410_000.0),
        month("2025-01", 141_980_000.0),
    ]
}

fn reference_quotes() -> Vec<Quote> {
    let entries = [
        (
            "We're a free market economy. They should be able to participate in that.",
            "Interview on congressional stock trading, December 2021",
            "defending lawmakers' right to trade stocks",
        ),
        (
            "I do believe in the integrity of people in public service. I want the public to have that confidence as well.",
            "Press conference, January 2022",
            "discussing stock trading transparency",
        ),
        (
            "My husband and I have been together for 60 years. He's a businessman. He makes his own decisions.",
            "CNN Interview, 2022",
            "explaining her husband's trading activity",
        ),
        (
            "I don't own any stocks. My husband's transactions are his, not mine.",
            "Congressional hearing testimony",
            "clarifying ownership of stock trades",
        ),
        (
            "The American people have a right to know what their elected officials are doing.",
            "Floor speech on government transparency, 2019",
            "advocating for disclosure requirements",
        ),
        (
            "Technology is the future of our economy and our country.",
            "Tech industry event, San Francisco, 2020",
            "discussing technology sector investments",
        ),
        (
            "I have confidence in the American economy and American innovation.",
            "CNBC interview, 2023",
            "discussing economic outlook",
        ),
        (
            "The STOCK Act requires timely disclosure, and we comply with all requirements.",
            "Statement to reporters, 2022",
            "addressing trading disclosure rules",
        ),
    ];
    entries
        .into_iter()
        .map(|(quote, source, context)| Quote {
            quote: quote.to_string(),
            source: source.to_string(),
            context: context.to_string(),
        })
        .collect()
}

fn profile(
    holdings: Vec<Holding>,
    performance_percent: f64,
    total_invested: f64,
    holdings_count: i64,
    copiers: i64,
) -> ProfilePortfolio {
    ProfilePortfolio {
        holdings,
        performance: PortfolioPerformance {
            performance_percent: Some(performance_percent),
            total_invested: Some(total_invested),
        },
        stats: PortfolioStats {
            holdings_count: Some(holdings_count),
            copiers: Some(copiers),
        },
    }
}

fn profile_portfolios() -> HashMap<String, ProfilePortfolio> {
    let mut profiles = HashMap::new();
    profiles.insert(
        "rick-scott".to_string(),
        profile(
            vec![
                holding("AAPL", 250.35, 22.0),
                holding("MSFT", 445.20, 18.0),
                holding("GOOGL", 189.50, 15.0),
                holding("AMZN", 230.75, 12.0),
                holding("TSLA", 412.80, 10.0),
            ],
            28.5,
            95_000_000.0,
            8,
            8234,
        ),
    );
    profiles.insert(
        "tommy-tuberville".to_string(),
        profile(
            vec![
                holding("NVDA", 145.89, 25.0),
                holding("AMD", 125.30, 20.0),
                holding("AAPL", 250.35, 15.0),
                holding("MSFT", 445.20, 12.0),
            ],
            32.0,
            72_000_000.0,
            6,
            5123,
        ),
    );
    profiles.insert(
        "josh-gottheimer".to_string(),
        profile(
            vec![
                holding("GOOGL", 189.50, 20.0),
                holding("META", 638.25, 18.0),
                holding("AAPL", 250.35, 15.0),
                holding("MSFT", 445.20, 14.0),
            ],
            25.8,
            68_000_000.0,
            7,
            4567,
        ),
    );
    profiles.insert(
        "dan-crenshaw".to_string(),
        profile(
            vec![
                holding("NVDA", 145.89, 28.0),
                holding("TSLA", 412.80, 22.0),
                holding("AAPL", 250.35, 16.0),
            ],
            35.2,
            85_000_000.0,
            5,
            6789,
        ),
    );
    profiles.insert(
        "markwayne-mullin".to_string(),
        profile(
            vec![
                holding("XOM", 112.45, 30.0),
                holding("CVX", 145.20, 25.0),
                holding("AAPL", 250.35, 15.0),
            ],
            18.5,
            55_000_000.0,
            6,
            3456,
        ),
    );
    profiles.insert(
        "eric-trump".to_string(),
        profile(
            vec![
                holding("DJT", 45.20, 35.0),
                holding("AAPL", 250.35, 20.0),
                holding("MSFT", 445.20, 15.0),
            ],
            22.3,
            42_000_000.0,
            4,
            2890,
        ),
    );
    profiles
}

fn stock_info_map() -> HashMap<String, StockInfo> {
    let mut map = HashMap::new();
    let mut add = |ticker: &str,
                   company_name: &str,
                   description: &str,
                   week_range_low: f64,
                   week_range_high: f64,
                   price_change: f64,
                   price_change_percent: f64,
                   similar_stocks: Vec<SimilarStock>| {
        map.insert(
            ticker.to_string(),
            StockInfo {
                company_name: company_name.to_string(),
                description: description.to_string(),
                week_range_low,
                week_range_high,
                price_change,
                price_change_percent,
                similar_stocks,
            },
        );
    };

    add(
        "NVDA",
        "NVIDIA Corporation",
        "Leading AI chip manufacturer. Nancy Pelosi has been actively trading NVDA, including a major sale of 10,000 shares on 12/31/2024 and exercising call options.",
        108.13, 152.89, -2.45, -1.65,
        vec![
            similar("AMD", "Advanced Micro Devices", 125.30, -1.20, -0.95, "Semiconductor competitor"),
            similar("AVGO", "Broadcom Inc.", 227.15, 3.45, 1.54, "Also in Pelosi portfolio"),
        ],
    );
    add(
        "GOOGL",
        "Alphabet Inc. (Google)",
        "Tech giant and search leader. Nancy Pelosi purchased 50 call options on 1/14/2025 valued at $250K-$500K, showing continued confidence in big tech.",
        165.50, 195.75, 1.85, 0.99,
        vec![
            similar("META", "Meta Platforms", 638.25, 5.20, 0.82, "Big Tech peer"),
            similar("AMZN", "Amazon.com", 230.75, 2.10, 0.92, "Also in Pelosi portfolio"),
        ],
    );
    add(
        "AVGO",
        "Broadcom Inc.",
        "Semiconductor and infrastructure software company. Nancy Pelosi made a significant purchase of $5M-$25M in call options on 11/22/2024.",
        145.20, 240.50, 4.25, 1.91,
        vec![
            similar("NVDA", "NVIDIA Corporation", 145.89, -2.45, -1.65, "Also in Pelosi portfolio"),
            similar("QCOM", "Qualcomm", 158.40, 0.85, 0.54, "Semiconductor peer"),
        ],
    );
    add(
        "PANW",
        "Palo Alto Networks",
        "Cybersecurity leader. Nancy Pelosi exercised 140 call options on 12/20/2024 valued at $1M-$5M, betting on continued cybersecurity growth.",
        175.80, 225.40, 2.15, 1.03,
        vec![
            similar("CRWD", "CrowdStrike", 398.25, 3.80, 0.96, "Also in Pelosi portfolio"),
            similar("FTNT", "Fortinet", 98.50, -0.45, -0.45, "Cybersecurity competitor"),
        ],
    );
    add(
        "TEM",
        "Tempus AI, Inc.",
        "AI-driven precision medicine company. Nancy Pelosi purchased 50 call options on 1/14/2025 for $50K-$100K, betting on AI healthcare.",
        42.10, 95.30, 3.45, 4.22,
        vec![
            similar("ILMN", "Illumina", 142.30, 1.20, 0.85, "Genomics/healthcare AI"),
            similar("NVDA", "NVIDIA", 145.89, -2.45, -1.65, "AI infrastructure"),
        ],
    );
    add(
        "AMZN",
        "Amazon.com, Inc.",
        "E-commerce and cloud computing giant. Nancy Pelosi purchased 50 call options on 1/14/2025 valued at $250K-$500K.",
        185.30, 240.15, 2.10, 0.92,
        vec![
            similar("GOOGL", "Alphabet", 189.50, 1.85, 0.99, "Also in Pelosi portfolio"),
            similar("MSFT", "Microsoft", 445.20, 3.25, 0.74, "Cloud competitor"),
        ],
    );
    add(
        "VST",
        "Vistra Corp.",
        "Energy company. Part of Nancy Pelosi's diversified portfolio with 7% allocation.",
        95.40, 158.90, 1.25, 0.87,
        vec![similar("NEE", "NextEra Energy", 72.45, 0.35, 0.49, "Energy sector peer")],
    );
    add(
        "CRWD",
        "CrowdStrike Holdings",
        "Cybersecurity platform leader. Nancy Pelosi purchased $1M-$5M in call options on 11/22/2024.",
        225.50, 420.75, 3.80, 0.96,
        vec![
            similar("PANW", "Palo Alto Networks", 210.33, 2.15, 1.03, "Also in Pelosi portfolio"),
            similar("ZS", "Zscaler", 225.60, 2.40, 1.08, "Cybersecurity peer"),
        ],
    );
    add(
        "AAPL",
        "Apple Inc.",
        "Consumer electronics giant. Nancy Pelosi sold 31,600 shares on 12/31/2024 for $5M-$25M, possibly taking profits.",
        195.25, 260.10, -1.85, -0.73,
        vec![
            similar("MSFT", "Microsoft", 445.20, 3.25, 0.74, "Big Tech peer"),
            similar("GOOGL", "Alphabet", 189.50, 1.85, 0.99, "Also in Pelosi portfolio"),
        ],
    );
    add(
        "MSFT",
        "Microsoft Corporation",
        "Software and cloud computing leader. Nancy Pelosi purchased call options on 7/1/2024 for $1M-$5M.",
        385.50, 468.35, 3.25, 0.74,
        vec![
            similar("GOOGL", "Alphabet", 189.50, 1.85, 0.99, "Also in Pelosi portfolio"),
            similar("AMZN", "Amazon", 230.75, 2.10, 0.92, "Cloud competitor"),
        ],
    );
    add(
        "TSLA",
        "Tesla, Inc.",
        "Electric vehicle and clean energy company. Part of Nancy Pelosi's portfolio with 3% allocation.",
        315.20, 488.50, -5.40, -1.29,
        vec![similar("RIVN", "Rivian", 12.45, -0.25, -1.97, "EV competitor")],
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_shape() {
        let data = ReferenceData::load();
        assert_eq!(data.holdings().len(), 11);
        assert_eq!(data.trades().len(), 60);
        assert_eq!(data.historical().len(), 33);
        assert_eq!(data.sp500().len(), 33);
        assert_eq!(data.quotes().len(), 8);
    }

    #[test]
    fn snapshot_carries_every_component() {
        let snapshot = ReferenceData::load().portfolio_snapshot();
        assert_eq!(snapshot.holdings.len(), 11);
        assert_eq!(snapshot.performance.performance_percent, Some(38.0));
        assert_eq!(snapshot.stats.copiers, Some(15234));
        assert_eq!(snapshot.filing_statistics.avg_filing_frequency, Some(55));
        assert_eq!(snapshot.historical_performance.len(), 33);
        assert_eq!(snapshot.sector_allocation.len(), 3);
    }

    #[test]
    fn trades_keep_their_dates() {
        let data = ReferenceData::load();
        let first = &data.trades()[0];
        assert_eq!(first.ticker, "GOOGL");
        assert_eq!(first.traded_date, NaiveDate::from_ymd_opt(2025, 1, 14));
        assert_eq!(first.filed_date, NaiveDate::from_ymd_opt(2025, 1, 16));
        assert_eq!(first.instrument, Instrument::CallOptions);
    }

    #[test]
    fn detail_filters_trades_to_ticker() {
        let detail = ReferenceData::load().stock_detail("nvda");
        assert_eq!(detail.ticker, "NVDA");
        assert_eq!(detail.company_name, "NVIDIA Corporation");
        assert_eq!(detail.current_price, 145.89);
        assert!(!detail.trades.is_empty());
        assert!(detail.trades.iter().all(|t| t.ticker == "NVDA"));
        assert_eq!(detail.price_history.len(), 30);
    }

    #[test]
    fn detail_for_unknown_ticker_is_a_stub() {
        let detail = ReferenceData::load().stock_detail("ZZZ");
        assert_eq!(detail.company_name, "ZZZ Corporation");
        assert_eq!(detail.current_price, 0.0);
        assert!(detail.trades.is_empty());
        assert!(detail.similar_stocks.is_empty());
    }

    #[test]
    fn synthetic_history_is_deterministic_per_day() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let a = synthetic_history(145.89, today);
        let b = synthetic_history(145.89, today);
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert_eq!(a[0].date, "2024-12-21");
        assert_eq!(a[29].date, "2025-01-19");
        // Older points sit below the current price.
        assert!(a[0].price < 145.89);
    }

    #[test]
    fn profile_lookup_is_case_insensitive() {
        let data = ReferenceData::load();
        assert!(data.profile("Rick-Scott").is_ok());
        assert!(data.profile("dan-crenshaw").is_ok());
        assert!(matches!(
            data.profile("unknown-person"),
            Err(TrackerError::UnknownProfile(id)) if id == "unknown-person"
        ));
    }
}
