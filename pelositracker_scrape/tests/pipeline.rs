//! End-to-end extraction over static rendered documents.
//!
//! The pipeline is exercised through stub `PageSource` implementations
//! so no browser is involved; the fixtures mirror the markup shapes
//! the tracker site has been observed to render.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use pelositracker_scrape::{
    Extraction, FetchError, PageKind, PageSource, Pipeline, RenderedPage, ScrapeConfig,
    TradeAction,
};

/// Serves one fixed document for every URL and counts fetches.
struct StaticSource {
    html: String,
    fetches: Arc<AtomicUsize>,
}

impl StaticSource {
    fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, url: &str, _kind: PageKind) -> Result<RenderedPage, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(RenderedPage {
            url: url.to_string(),
            html: self.html.clone(),
        })
    }
}

/// Always fails, as a crashed or unreachable browser would.
struct FailingSource;

impl PageSource for FailingSource {
    fn fetch(&self, url: &str, _kind: PageKind) -> Result<RenderedPage, FetchError> {
        Err(FetchError::Navigate {
            url: url.to_string(),
            message: "net::ERR_CONNECTION_REFUSED".to_string(),
        })
    }
}

const PORTFOLIO_PAGE: &str = r#"
<html><body>
  <h1>Nancy Pelosi Portfolio</h1>
  <div>+38.2% performance</div>
  <div>Total Value US$168M</div>
  <div>11 holdings</div>
  <div>15,234 copiers</div>
  <div>Avg. Reporting Time: 23 days</div>
  <div>Avg. Filing Frequency: 45 days</div>
  <div>Time Since Last Filing: 38 days</div>
  <table>
    <tr><th>Ticker</th><th>Last Price</th><th>Weight</th></tr>
    <tr><td>NVDA</td><td>$145.89</td><td>19.02%</td></tr>
    <tr><td>AVGO</td><td>$228.27</td><td>14.93%</td></tr>
    <tr><td>not-a-ticker</td><td>$1.00</td><td>1%</td></tr>
    <tr><td>GOOGL</td><td>$178.33</td><td>12.11%</td></tr>
  </table>
  <ul>
    <li>Technology 85%</li>
    <li>Communication Services 10%</li>
    <li>Consumer Cyclical 5%</li>
  </ul>
  <div><a href="/stock/nvda">NVDA</a> Purchase 1/14/2025 $250,001 - $500,000 Call Options</div>
  <div><a href="/stock/nvda">NVDA</a> duplicate row</div>
  <div><a href="/stock/avgo">AVGO</a> Sale 12/31/2024 $1,000,001 - $5,000,000 Stock</div>
  <div><a href="/stock/123">bad ticker path</a></div>
</body></html>
"#;

const DETAIL_PAGE: &str = r#"
<html><body>
  <h1>NVIDIA Corporation (NVDA)</h1>
  <div>Nasdaq · Current Price $145.89 · 24h Change: +2.45 (+1.71%)</div>
  <div>52 Week Range: $86.62 - $153.13</div>
  <p>NVIDIA Corporation designs graphics processing units and systems on
     a chip for gaming, professional visualization, and data centers.</p>
  <h2>Congressional Trading Activity</h2>
  <table>
    <tr><th>Politician</th><th>Traded</th><th>Filed</th><th>Action</th>
        <th>Type</th><th>Amount</th></tr>
    <tr><td>Dan Crenshaw</td><td>1/02/2025</td><td>1/20/2025</td><td>Purchase</td>
        <td>Stock</td><td>$1,001 - $15,000</td></tr>
    <tr><td>Nancy Pelosi</td><td>1/14/2025</td><td>1/17/2025</td><td>Purchase</td>
        <td>Call Options</td><td>$250,001 - $500,000</td></tr>
    <tr><td>Rick Scott</td><td>12/20/2024</td><td>1/05/2025</td><td>Sale</td>
        <td>Stock</td><td>$15,001 - $50,000</td></tr>
    <tr><td>Pelosi</td><td>12/31/2024</td><td>1/03/2025</td><td>Sale</td>
        <td>Stock</td><td>$5,000,001 - $25,000,000</td></tr>
  </table>
</body></html>
"#;

#[test]
fn portfolio_snapshot_extracts_every_component() {
    let pipeline = Pipeline::new(StaticSource::new(PORTFOLIO_PAGE), ScrapeConfig::default());
    let snapshot = match pipeline.portfolio_snapshot() {
        Extraction::Available(s) => s,
        Extraction::Unavailable => panic!("fixture snapshot should be available"),
    };

    let tickers: Vec<&str> = snapshot.holdings.iter().map(|h| h.ticker.as_str()).collect();
    assert_eq!(tickers, vec!["NVDA", "AVGO", "GOOGL"]);
    assert_eq!(snapshot.holdings[0].last_price, 145.89);
    assert_eq!(snapshot.holdings[0].weight, 19.02);
    assert_eq!(snapshot.holdings[0].price_display, "$145.89");

    assert_eq!(snapshot.sector_allocation.len(), 3);
    assert_eq!(snapshot.sector_allocation[0].name, "Technology");

    assert_eq!(snapshot.performance.performance_percent, Some(38.2));
    assert_eq!(snapshot.performance.total_invested, Some(168_000_000.0));
    assert_eq!(snapshot.stats.holdings_count, Some(11));
    assert_eq!(snapshot.stats.copiers, Some(15234));
    assert_eq!(snapshot.filing_statistics.avg_reporting_time, Some(23));
    assert_eq!(snapshot.filing_statistics.avg_filing_frequency, Some(45));
    assert_eq!(snapshot.filing_statistics.time_since_last_filing, Some(38));
}

#[test]
fn recent_trades_dedupe_by_ticker_first_wins() {
    let pipeline = Pipeline::new(StaticSource::new(PORTFOLIO_PAGE), ScrapeConfig::default());
    let snapshot = pipeline.portfolio_snapshot().available().unwrap();

    let tickers: Vec<&str> = snapshot
        .recent_trades
        .iter()
        .map(|t| t.ticker.as_str())
        .collect();
    assert_eq!(tickers, vec!["NVDA", "AVGO"]);

    let nvda = &snapshot.recent_trades[0];
    assert_eq!(nvda.action, TradeAction::Purchase);
    assert_eq!(nvda.traded_date, NaiveDate::from_ymd_opt(2025, 1, 14));
    assert_eq!(nvda.filed_date, None);
    assert_eq!(nvda.amount_range, "$250,001 - $500,000");
}

#[test]
fn fetch_failure_is_unavailable_not_partial() {
    let pipeline = Pipeline::new(FailingSource, ScrapeConfig::default());
    assert!(!pipeline.portfolio_snapshot().is_available());
    assert!(!pipeline.stock_detail("NVDA").is_available());
}

#[test]
fn partial_page_degrades_instead_of_failing() {
    // Holdings render, everything else missing: the snapshot stays
    // available with the absent components empty.
    let html = r#"<html><body>
      <table><tr><th>Ticker</th><th>Price</th><th>Weight</th></tr>
      <tr><td>AAPL</td><td>$232.80</td><td>2.9%</td></tr></table>
    </body></html>"#;
    let pipeline = Pipeline::new(StaticSource::new(html), ScrapeConfig::default());
    let snapshot = pipeline.portfolio_snapshot().available().unwrap();

    assert_eq!(snapshot.holdings.len(), 1);
    assert!(snapshot.recent_trades.is_empty());
    assert!(snapshot.sector_allocation.is_empty());
    assert_eq!(snapshot.performance.performance_percent, None);
    assert_eq!(snapshot.filing_statistics.avg_reporting_time, None);
}

#[test]
fn extraction_is_deterministic_modulo_timestamp() {
    let pipeline = Pipeline::new(StaticSource::new(PORTFOLIO_PAGE), ScrapeConfig::default());
    let mut first = pipeline.portfolio_snapshot().available().unwrap();
    let second = pipeline.portfolio_snapshot().available().unwrap();

    first.last_updated = second.last_updated;
    assert_eq!(first, second);
}

#[test]
fn detail_page_keeps_only_the_tracked_entity() {
    let pipeline = Pipeline::new(StaticSource::new(DETAIL_PAGE), ScrapeConfig::default());
    let detail = pipeline.stock_detail("nvda").available().unwrap();

    assert_eq!(detail.ticker, "NVDA");
    assert_eq!(detail.trades.len(), 2);
    assert_eq!(detail.trades[0].traded_date, NaiveDate::from_ymd_opt(2025, 1, 14));
    assert_eq!(detail.trades[0].amount_range, "$250,001 - $500,000");
    assert_eq!(detail.trades[1].action, TradeAction::Sale);
    assert!(detail.trades.iter().all(|t| t.ticker == "NVDA"));
}

#[test]
fn detail_page_scalar_fields() {
    let pipeline = Pipeline::new(StaticSource::new(DETAIL_PAGE), ScrapeConfig::default());
    let detail = pipeline.stock_detail("NVDA").available().unwrap();

    assert_eq!(detail.company_name, "NVIDIA Corporation");
    assert_eq!(detail.exchange, "Nasdaq");
    assert_eq!(detail.current_price, 145.89);
    assert_eq!(detail.price_change, 2.45);
    assert_eq!(detail.price_change_percent, 1.71);
    assert_eq!(detail.week_range_low, 86.62);
    assert_eq!(detail.week_range_high, 153.13);
    assert!(detail.description.starts_with("NVIDIA Corporation designs"));
}

#[test]
fn zero_entity_matches_is_a_valid_empty_result() {
    let html = r#"<html><body><h1>TSLA</h1>
      <table>
        <tr><th>Politician</th><th>Traded</th><th>Filed</th><th>Action</th>
            <th>Type</th><th>Amount</th></tr>
        <tr><td>Dan Crenshaw</td><td>1/02/2025</td><td>1/20/2025</td><td>Purchase</td>
            <td>Stock</td><td>$1,001 - $15,000</td></tr>
      </table>
    </body></html>"#;
    let pipeline = Pipeline::new(StaticSource::new(html), ScrapeConfig::default());
    let detail = pipeline.stock_detail("TSLA").available().unwrap();
    assert!(detail.trades.is_empty());
}

#[test]
fn implausible_ticker_never_reaches_the_browser() {
    let source = StaticSource::new(DETAIL_PAGE);
    let fetches = source.fetches.clone();
    let pipeline = Pipeline::new(source, ScrapeConfig::default());

    assert!(!pipeline.stock_detail("TOOLONG").is_available());
    assert!(!pipeline.stock_detail("nv-da").is_available());
    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}
