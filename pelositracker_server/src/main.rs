mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use pelositracker_lib::{ReferenceData, SnapshotProvider};
use pelositracker_scrape::{ChromeFetcher, Pipeline, ScrapeConfig};

use crate::routes::AppState;

#[derive(Parser)]
#[command(name = "pelositracker")]
#[command(about = "JSON API for tracked congressional portfolio data")]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:8080", env = "TRACKER_BIND")]
    bind: String,

    /// Tracker site root to extract from
    #[arg(long, env = "TRACKER_BASE_URL")]
    base_url: Option<String>,

    /// Enable live extraction (otherwise serve reference data only)
    #[arg(long, env = "TRACKER_LIVE")]
    live: bool,

    /// Run the browser with a visible window
    #[arg(long, env = "TRACKER_HEADFUL")]
    headful: bool,

    /// Seconds a live snapshot stays cached
    #[arg(long, default_value_t = 300, env = "TRACKER_CACHE_TTL")]
    cache_ttl: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pelositracker=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ScrapeConfig::default();
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    config.headless = !cli.headful;

    let pipeline = Pipeline::new(ChromeFetcher::new(config.clone()), config);
    let provider = SnapshotProvider::new(
        pipeline,
        ReferenceData::load(),
        Duration::from_secs(cli.cache_ttl),
        cli.live,
    );
    let state = Arc::new(AppState { provider });

    let router = routes::router(state);
    tracing::info!("listening on {} (live extraction: {})", cli.bind, cli.live);
    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
