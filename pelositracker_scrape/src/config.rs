//! Externally-supplied scraping configuration.
//!
//! Everything here is injected, never computed: target base URL,
//! browser identification, wait durations, and the entity-matching
//! policy. Defaults reproduce the constants the tracker site has been
//! observed to need.

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://pelositracker.app";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Policy for deciding whether a table row belongs to the tracked
/// person.
///
/// A row matches when its name cell contains `full_name`
/// case-insensitively, or equals `short_name` outright while staying
/// under `short_max_len` characters. The ceiling guards against a
/// short surname accidentally matching inside an unrelated longer
/// token; it is policy data rather than a hardcoded constant because
/// the right threshold depends on the tracked name.
#[derive(Debug, Clone)]
pub struct EntityMatcher {
    pub full_name: String,
    pub short_name: String,
    pub short_max_len: usize,
}

impl EntityMatcher {
    /// Builds a matcher for a full name, using the last word as the
    /// short form.
    pub fn new(full_name: &str) -> Self {
        let short_name = full_name
            .split_whitespace()
            .last()
            .unwrap_or(full_name)
            .to_string();
        Self {
            full_name: full_name.to_string(),
            short_name,
            short_max_len: 20,
        }
    }

    /// True when `cell` identifies the tracked person.
    pub fn matches(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        if trimmed.to_lowercase().contains(&self.full_name.to_lowercase()) {
            return true;
        }
        trimmed.len() < self.short_max_len && trimmed.eq_ignore_ascii_case(&self.short_name)
    }
}

impl Default for EntityMatcher {
    fn default() -> Self {
        Self::new("Nancy Pelosi")
    }
}

/// Knobs for one extraction run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Tracker site root, no trailing slash.
    pub base_url: String,
    /// Path slug under `/portfolios/`.
    pub portfolio_slug: String,
    pub user_agent: String,
    pub headless: bool,
    /// Fixed settle delay after navigating to the portfolio page.
    pub settle: Duration,
    /// Fixed settle delay on stock detail pages, which render later.
    pub detail_settle: Duration,
    /// Bounded wait for a heading marker element.
    pub marker_timeout: Duration,
    /// Bounded wait for the trades table on detail pages.
    pub table_timeout: Duration,
    pub entity: EntityMatcher,
}

impl ScrapeConfig {
    pub fn portfolio_url(&self) -> String {
        format!("{}/portfolios/{}", self.base_url, self.portfolio_slug)
    }

    pub fn stock_url(&self, ticker: &str) -> String {
        format!("{}/stock/{}", self.base_url, ticker.to_lowercase())
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            portfolio_slug: "nancy-pelosi".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headless: true,
            settle: Duration::from_secs(8),
            detail_settle: Duration::from_secs(10),
            marker_timeout: Duration::from_secs(10),
            table_timeout: Duration::from_secs(15),
            entity: EntityMatcher::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_accepts_full_and_short_forms() {
        let matcher = EntityMatcher::default();
        assert!(matcher.matches("Nancy Pelosi"));
        assert!(matcher.matches("nancy pelosi (D-CA)"));
        assert!(matcher.matches("Pelosi"));
        assert!(matcher.matches("pelosi"));
    }

    #[test]
    fn matcher_rejects_other_entities() {
        let matcher = EntityMatcher::default();
        assert!(!matcher.matches("Dan Crenshaw"));
        assert!(!matcher.matches("Rick Scott"));
        assert!(!matcher.matches("Paul Pelosium Holdings LLC"));
    }

    #[test]
    fn short_form_ceiling_is_configurable() {
        let mut matcher = EntityMatcher::new("Rick Scott");
        assert!(matcher.matches("Scott"));
        matcher.short_max_len = 3;
        assert!(!matcher.matches("Scott"));
    }

    #[test]
    fn urls() {
        let config = ScrapeConfig::default().with_base_url("http://localhost:9000/");
        assert_eq!(
            config.portfolio_url(),
            "http://localhost:9000/portfolios/nancy-pelosi"
        );
        assert_eq!(config.stock_url("NVDA"), "http://localhost:9000/stock/nvda");
    }
}
