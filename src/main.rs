mod config;
mod extractor;
mod feed;
mod geocoder;
mod model;
mod pipeline;
mod reconciler;
mod render;
mod storage;
mod utils;

use chrono::Local;
use config::{load_config, AppConfig};
use extractor::Extractor;
use feed::RssFeed;
use geocoder::NominatimGeocoder;
use model::RunError;
use reconciler::Reconciler;
use render::{write_map, MapSettings};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use storage::JsonFileStore;
use tracing::{error, info};

const CONFIG_PATH: &str = "sietsemap.json";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    match run_job().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load, scrape, reconcile, persist, render. The dataset file is written
/// once, after the whole feed has been processed.
async fn run_job() -> Result<(), RunError> {
    let config: AppConfig = load_config(CONFIG_PATH)?;

    let store = JsonFileStore::new(&config.dataset_path);
    let dataset = store.load()?;
    if dataset.is_empty() {
        info!("No stored restaurants at {}, starting fresh", store.path().display());
    } else {
        info!("Loaded {} known restaurants from {}", dataset.len(), store.path().display());
    }

    let feed = RssFeed::new(&config.feed_url, &config.user_agent, config.feed_timeout())?;
    let geocoder = NominatimGeocoder::new(&config.geocoder_url, &config.user_agent, config.geocode_timeout())?;
    let extractor = Extractor::new(config.max_body_bytes);
    let mut reconciler = Reconciler::new(
        Arc::new(geocoder),
        config.geocode_timeout(),
        config.politeness_delay(),
        Local::now().date_naive(),
    );

    info!("Fetching feed {}...", config.feed_url);
    let (dataset, summary) = pipeline::run(&feed, &extractor, &mut reconciler, dataset).await?;
    info!(
        articles = summary.articles,
        skipped_articles = summary.extraction_faults,
        candidates = summary.candidates,
        added = summary.reconcile.added,
        known = summary.reconcile.known,
        unresolved = summary.reconcile.unresolved,
        failed = summary.reconcile.faulted,
        "Run finished"
    );

    store.save(&dataset)?;
    info!("Saved {} restaurants to {}", dataset.len(), store.path().display());

    let output = Path::new(&config.map_output_path);
    write_map(dataset.records(), &MapSettings::from(&config), output)?;
    info!("Map rebuilt -> {}", output.display());

    Ok(())
}
