//! Library layer for the Pelosi portfolio tracker: reference data,
//! snapshot caching, and analysis helpers.
//!
//! Wraps the `pelositracker_scrape` extraction pipeline with an
//! in-memory TTL cache, a reference dataset for fallback, index
//! comparison maths, and trade-prediction heuristics.

pub mod cache;
pub mod compare;
pub mod error;
pub mod fixture;
pub mod predict;
pub mod provider;

pub use pelositracker_scrape;

pub use cache::TtlCache;
pub use compare::{index_comparison, IndexComparison};
pub use error::TrackerError;
pub use fixture::{MonthlyValue, ProfilePortfolio, Quote, ReferenceData};
pub use predict::{predictions, PatternAnalysis, Prediction, PredictionReport};
pub use provider::{DataOrigin, SnapshotProvider};
