//! The provider's live-first, reference-fallback contract.

use std::time::Duration;

use pelositracker_lib::{DataOrigin, ReferenceData, SnapshotProvider};
use pelositracker_scrape::{
    FetchError, PageKind, PageSource, Pipeline, RenderedPage, ScrapeConfig,
};

struct StaticSource(&'static str);

impl PageSource for StaticSource {
    fn fetch(&self, url: &str, _kind: PageKind) -> Result<RenderedPage, FetchError> {
        Ok(RenderedPage {
            url: url.to_string(),
            html: self.0.to_string(),
        })
    }
}

struct FailingSource;

impl PageSource for FailingSource {
    fn fetch(&self, url: &str, _kind: PageKind) -> Result<RenderedPage, FetchError> {
        Err(FetchError::Navigate {
            url: url.to_string(),
            message: "connection refused".to_string(),
        })
    }
}

const HOLDINGS_PAGE: &str = r#"<html><body>
  <table><tr><th>Ticker</th><th>Price</th><th>Weight</th></tr>
  <tr><td>NVDA</td><td>$145.89</td><td>19%</td></tr></table>
</body></html>"#;

fn provider<S: PageSource>(source: S, live: bool) -> SnapshotProvider<S> {
    SnapshotProvider::new(
        Pipeline::new(source, ScrapeConfig::default()),
        ReferenceData::load(),
        Duration::from_secs(60),
        live,
    )
}

#[test]
fn live_extraction_is_served_and_then_cached() {
    let provider = provider(StaticSource(HOLDINGS_PAGE), true);

    let (snapshot, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Live);
    assert_eq!(snapshot.holdings.len(), 1);
    assert_eq!(snapshot.holdings[0].ticker, "NVDA");

    let (_, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Cached);
}

#[test]
fn failed_extraction_falls_back_to_reference_data() {
    let provider = provider(FailingSource, true);

    let (snapshot, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Reference);
    assert_eq!(snapshot.holdings.len(), 11);

    let (detail, origin) = provider.stock("NVDA");
    assert_eq!(origin, DataOrigin::Reference);
    assert_eq!(detail.company_name, "NVIDIA Corporation");
}

#[test]
fn live_disabled_never_touches_the_source() {
    let provider = provider(FailingSource, false);
    let (snapshot, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Reference);
    assert!(!snapshot.holdings.is_empty());
}

#[test]
fn invalidate_forces_a_fresh_extraction() {
    let provider = provider(StaticSource(HOLDINGS_PAGE), true);

    let (_, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Live);
    provider.invalidate();
    let (_, origin) = provider.portfolio();
    assert_eq!(origin, DataOrigin::Live);
}
