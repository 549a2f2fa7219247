//! Browser-driven extraction of congressional portfolio data.
//!
//! Fetches JavaScript-rendered tracker pages through a headless
//! browser, locates datasets in unstable markup by layered heuristics,
//! and maps them into typed records. Partial results are the normal
//! case: every sub-extraction degrades independently and only a failed
//! page fetch makes a whole snapshot unavailable.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod model;
pub mod parse;
pub mod pipeline;

pub use config::{EntityMatcher, ScrapeConfig};
pub use error::FetchError;
pub use fetch::{ChromeFetcher, PageKind, PageSource, RenderedPage};
pub use model::{
    Extraction, FilingStats, Holding, Instrument, PortfolioPerformance, PortfolioSnapshot,
    PortfolioStats, PricePoint, SectorAllocation, SimilarStock, StockDetail, Trade, TradeAction,
};
pub use pipeline::Pipeline;
