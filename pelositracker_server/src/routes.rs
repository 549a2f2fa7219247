//! JSON API surface.
//!
//! Handlers are read-only over shared state. Extraction is blocking
//! (it drives a browser), so anything that may touch the pipeline runs
//! under `spawn_blocking`; if that task fails the handler degrades to
//! the reference dataset rather than erroring.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rand::seq::SliceRandom;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{error, info};

use pelositracker_lib::{
    compare, predict, DataOrigin, PredictionReport, Quote, SnapshotProvider,
};
use pelositracker_scrape::{ChromeFetcher, PortfolioSnapshot, StockDetail};

pub struct AppState {
    pub provider: SnapshotProvider<ChromeFetcher>,
}

/// Headline comparison figures embedded in the portfolio payload.
#[derive(Serialize)]
struct ComparisonSummary {
    pelosi_return: f64,
    sp500_return: f64,
    outperformance: f64,
}

#[derive(Serialize)]
struct PortfolioResponse {
    #[serde(flatten)]
    snapshot: PortfolioSnapshot,
    sp500_comparison: Option<ComparisonSummary>,
}

fn portfolio_payload(state: &AppState, snapshot: PortfolioSnapshot) -> PortfolioResponse {
    let reference = state.provider.reference();
    let summary = compare::index_comparison(reference.historical(), reference.sp500()).map(|c| {
        ComparisonSummary {
            pelosi_return: c.pelosi_return,
            sp500_return: c.sp500_return,
            outperformance: c.outperformance,
        }
    });
    PortfolioResponse {
        snapshot,
        sp500_comparison: summary,
    }
}

// Runs a provider call on the blocking pool; a panicked task degrades
// to reference data instead of a 500.
async fn blocking<R, F, T>(state: Arc<AppState>, fallback: F, task: T) -> (R, DataOrigin)
where
    R: Send + 'static,
    T: FnOnce(Arc<AppState>) -> (R, DataOrigin) + Send + 'static,
    F: FnOnce(&AppState) -> R,
{
    let handle = tokio::task::spawn_blocking({
        let state = state.clone();
        move || task(state)
    });
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            error!("extraction task failed: {e}");
            (fallback(&state), DataOrigin::Reference)
        }
    }
}

async fn portfolio(State(state): State<Arc<AppState>>) -> Json<PortfolioResponse> {
    let (snapshot, origin) = blocking(
        state.clone(),
        |s| s.provider.reference().portfolio_snapshot(),
        |s| s.provider.portfolio(),
    )
    .await;
    info!("serving portfolio ({origin})");
    Json(portfolio_payload(&state, snapshot))
}

async fn profile_portfolio(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if profile_id.eq_ignore_ascii_case("nancy") {
        let payload = portfolio_payload(&state, state.provider.reference().portfolio_snapshot());
        return Ok(Json(json!(payload)));
    }
    match state.provider.reference().profile(&profile_id) {
        Ok(profile) => Ok(Json(json!(profile))),
        Err(e) => {
            info!("no reference profile for '{profile_id}'");
            Err((StatusCode::NOT_FOUND, Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn stock(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Json<StockDetail> {
    let (detail, origin) = blocking(
        state,
        |s| s.provider.reference().stock_detail(&ticker),
        {
            let ticker = ticker.clone();
            move |s| s.provider.stock(&ticker)
        },
    )
    .await;
    info!("serving stock detail for {} ({origin})", detail.ticker);
    Json(detail)
}

async fn update(State(state): State<Arc<AppState>>) -> Json<Value> {
    state.provider.invalidate();
    let (snapshot, origin) = blocking(
        state.clone(),
        |s| s.provider.reference().portfolio_snapshot(),
        |s| s.provider.portfolio(),
    )
    .await;
    info!("forced update served ({origin})");
    Json(json!({
        "success": true,
        "data": portfolio_payload(&state, snapshot),
    }))
}

async fn quote(State(state): State<Arc<AppState>>) -> Result<Json<Quote>, StatusCode> {
    state
        .provider
        .reference()
        .quotes()
        .choose(&mut rand::thread_rng())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn trade_predictions(State(state): State<Arc<AppState>>) -> Json<PredictionReport> {
    Json(predict::predictions(state.provider.reference().holdings()))
}

async fn sp500_comparison(
    State(state): State<Arc<AppState>>,
) -> Result<Json<compare::IndexComparison>, StatusCode> {
    let reference = state.provider.reference();
    compare::index_comparison(reference.historical(), reference.sp500())
        .map(Json)
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/portfolio", get(portfolio))
        .route("/api/portfolio/{profile_id}", get(profile_portfolio))
        .route("/api/stock/{ticker}", get(stock))
        .route("/api/update", get(update))
        .route("/api/quote", get(quote))
        .route("/api/trade-predictions", get(trade_predictions))
        .route("/api/sp500-comparison", get(sp500_comparison))
        .route("/health", get(health))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
