//! Snapshot provider: live extraction with reference fallback.
//!
//! One provider serves all readers. Lookups go cache first, then live
//! extraction, then the reference dataset — a reader always gets a
//! complete snapshot, annotated with where it came from. Live
//! extraction being unavailable is an expected state, not an error.

use std::time::Duration;

use tracing::{info, warn};

use pelositracker_scrape::{
    ChromeFetcher, Extraction, PageSource, Pipeline, PortfolioSnapshot, StockDetail,
};

use crate::cache::TtlCache;
use crate::fixture::ReferenceData;

const SNAPSHOT_KEY: &str = "portfolio";

/// Where a served snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Cached,
    Reference,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DataOrigin::Live => "live",
                DataOrigin::Cached => "cached",
                DataOrigin::Reference => "reference",
            }
        )
    }
}

/// Serves portfolio and stock snapshots with a live-first, fall-back
/// policy.
pub struct SnapshotProvider<S: PageSource = ChromeFetcher> {
    pipeline: Pipeline<S>,
    reference: ReferenceData,
    snapshots: TtlCache<PortfolioSnapshot>,
    details: TtlCache<StockDetail>,
    live: bool,
}

impl<S: PageSource> SnapshotProvider<S> {
    /// `live: false` skips extraction entirely and serves the
    /// reference dataset, for running without a browser installed.
    pub fn new(pipeline: Pipeline<S>, reference: ReferenceData, ttl: Duration, live: bool) -> Self {
        Self {
            pipeline,
            reference,
            snapshots: TtlCache::new(ttl),
            details: TtlCache::new(ttl),
            live,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Drops all cached snapshots so the next read re-extracts.
    pub fn invalidate(&self) {
        self.snapshots.clear();
        self.details.clear();
        info!("snapshot caches invalidated");
    }

    pub fn portfolio(&self) -> (PortfolioSnapshot, DataOrigin) {
        if !self.live {
            return (self.reference.portfolio_snapshot(), DataOrigin::Reference);
        }
        if let Some(snapshot) = self.snapshots.get(SNAPSHOT_KEY) {
            return (snapshot, DataOrigin::Cached);
        }
        match self.pipeline.portfolio_snapshot() {
            Extraction::Available(snapshot) => {
                self.snapshots.set(SNAPSHOT_KEY, snapshot.clone());
                (snapshot, DataOrigin::Live)
            }
            Extraction::Unavailable => {
                warn!("live portfolio extraction unavailable, serving reference data");
                (self.reference.portfolio_snapshot(), DataOrigin::Reference)
            }
        }
    }

    pub fn stock(&self, ticker: &str) -> (StockDetail, DataOrigin) {
        let key = ticker.to_uppercase();
        if !self.live {
            return (self.reference.stock_detail(&key), DataOrigin::Reference);
        }
        if let Some(detail) = self.details.get(&key) {
            return (detail, DataOrigin::Cached);
        }
        match self.pipeline.stock_detail(&key) {
            Extraction::Available(detail) => {
                self.details.set(&key, detail.clone());
                (detail, DataOrigin::Live)
            }
            Extraction::Unavailable => {
                warn!("live extraction for {key} unavailable, serving reference data");
                (self.reference.stock_detail(&key), DataOrigin::Reference)
            }
        }
    }
}
