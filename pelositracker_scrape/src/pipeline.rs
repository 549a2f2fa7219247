//! Extraction orchestrator.
//!
//! One call runs one full page extraction: fetch the rendered
//! document, run every sub-extractor independently, assemble the
//! result. A sub-extractor coming back empty degrades the snapshot; a
//! fetch failure makes the whole result [`Extraction::Unavailable`].
//! Nothing in between: callers never see a half-built object presented
//! as whole.

use chrono::Utc;
use scraper::Html;
use tracing::{info, warn};

use crate::config::ScrapeConfig;
use crate::extract;
use crate::fetch::{ChromeFetcher, PageKind, PageSource, RenderedPage};
use crate::model::{Extraction, PortfolioSnapshot, StockDetail};
use crate::parse;

/// Drives fetches through a [`PageSource`] and maps rendered documents
/// into typed snapshots. Generic over the source so tests can feed
/// static documents or injected failures.
pub struct Pipeline<S: PageSource = ChromeFetcher> {
    source: S,
    config: ScrapeConfig,
}

impl Default for Pipeline<ChromeFetcher> {
    fn default() -> Self {
        let config = ScrapeConfig::default();
        Self {
            source: ChromeFetcher::new(config.clone()),
            config,
        }
    }
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, config: ScrapeConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Extracts one portfolio snapshot. Every component is attempted
    /// even when earlier ones found nothing; only a failed fetch makes
    /// the snapshot unavailable.
    pub fn portfolio_snapshot(&self) -> Extraction<PortfolioSnapshot> {
        let url = self.config.portfolio_url();
        let page = match self.source.fetch(&url, PageKind::Portfolio) {
            Ok(page) => page,
            Err(e) => {
                warn!("portfolio fetch failed: {e}");
                return Extraction::Unavailable;
            }
        };

        let doc = Html::parse_document(&page.html);
        let text = extract::visible_text(&doc);

        let snapshot = PortfolioSnapshot {
            holdings: extract::holdings(&doc, &self.config.entity),
            recent_trades: extract::recent_trades(&doc),
            sector_allocation: extract::sectors(&doc),
            performance: extract::performance(&text),
            stats: extract::portfolio_stats(&text),
            filing_statistics: extract::filing_stats(&text),
            historical_performance: extract::historical_performance(&doc),
            last_updated: Utc::now(),
        };
        info!(
            "portfolio snapshot: {} holding(s), {} trade(s), {} sector(s)",
            snapshot.holdings.len(),
            snapshot.recent_trades.len(),
            snapshot.sector_allocation.len()
        );
        Extraction::Available(snapshot)
    }

    /// Extracts one stock detail page for `ticker`. The trade list is
    /// already filtered to the configured entity; an empty trade list
    /// on a successful fetch is a valid result.
    pub fn stock_detail(&self, ticker: &str) -> Extraction<StockDetail> {
        let ticker = ticker.to_uppercase();
        if !parse::is_ticker(&ticker) {
            warn!("'{ticker}' does not look like a ticker symbol");
            return Extraction::Unavailable;
        }

        let url = self.config.stock_url(&ticker);
        let page = match self.source.fetch(&url, PageKind::StockDetail) {
            Ok(page) => page,
            Err(e) => {
                warn!("detail fetch for {ticker} failed: {e}");
                return Extraction::Unavailable;
            }
        };
        self.check_landing(&ticker, &page);

        let doc = Html::parse_document(&page.html);
        let text = extract::visible_text(&doc);
        let (week_range_low, week_range_high) = extract::week_range(&text);

        let detail = StockDetail {
            company_name: extract::company_name(&doc, &ticker),
            exchange: extract::exchange(&text),
            current_price: extract::current_price(&text),
            price_change: extract::price_change(&text),
            price_change_percent: extract::price_change_percent(&text),
            week_range_low,
            week_range_high,
            status: extract::status_line(&text),
            description: extract::description(&doc, &ticker),
            trades: extract::stock_trades(&doc, &ticker, &self.config.entity),
            similar_stocks: extract::similar_stocks(&doc),
            price_history: extract::price_history(&doc),
            ticker,
        };
        info!(
            "stock detail for {}: {} trade(s), price {}",
            detail.ticker,
            detail.trades.len(),
            detail.current_price
        );
        Extraction::Available(detail)
    }

    // A redirect away from the requested ticker page means the site
    // does not know the symbol; the extraction still runs on whatever
    // rendered, but the mismatch is worth a trace line. The realized
    // URL and the rendered text are checked separately: a redirect can
    // keep the symbol in the URL while serving an unrelated page.
    fn check_landing(&self, ticker: &str, page: &RenderedPage) {
        if !page.url.to_lowercase().contains(&ticker.to_lowercase()) {
            warn!("requested {ticker} but landed on {}", page.url);
        }
        if !page_mentions_ticker(&page.html, ticker) {
            warn!("page at {} never mentions {ticker}", page.url);
        }
    }
}

fn page_mentions_ticker(html: &str, ticker: &str) -> bool {
    html.contains(&ticker.to_uppercase()) || html.contains(&ticker.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_mention_accepts_either_case() {
        assert!(page_mentions_ticker(r#"<a href="/stock/nvda">chart</a>"#, "NVDA"));
        assert!(page_mentions_ticker("<h1>NVDA Trading Activity</h1>", "NVDA"));
    }

    #[test]
    fn page_without_the_symbol_is_flagged() {
        assert!(!page_mentions_ticker(
            "<h1>Something went wrong</h1><p>Try again later.</p>",
            "NVDA"
        ));
    }
}
