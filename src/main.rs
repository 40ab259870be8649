use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

use quote_recorder::batch::Batch;
use quote_recorder::config::{AppConfig, Backend, StoreConfig};
use quote_recorder::market_data::adapters::dydx::DydxClient;
use quote_recorder::market_data::adapters::ExchangeApi;
use quote_recorder::market_data::fetcher::OrderBookFetcher;
use quote_recorder::market_data::params::load_market_params;
use quote_recorder::persist::local::LocalStore;
use quote_recorder::persist::s3::S3Store;
use quote_recorder::persist::{CsvPersister, ObjectStore};
use quote_recorder::quote::validator::QuoteValidator;
use quote_recorder::router::{BatchReport, Dispatcher};
use quote_recorder::telemetry;

/// Records one best bid/ask row per configured market into day-partitioned CSV objects.
/// Meant to be run once per minute by an external scheduler; every flag is optional.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Settings file (TOML). Defaults to ./quote-recorder.toml when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated markets, overriding the configured list (e.g. BTC-USD,ETH-USD)
    #[arg(short, long, value_delimiter = ',')]
    markets: Vec<String>,

    /// Storage backend override
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// Root directory for the local backend
    #[arg(long)]
    root: Option<PathBuf>,
}

async fn open_store(cfg: &StoreConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match cfg.backend {
        Backend::S3 => Arc::new(S3Store::connect(&cfg.bucket, &cfg.region).await),
        Backend::Local => {
            info!(root = %cfg.root.display(), "using local store");
            Arc::new(LocalStore::new(&cfg.root))
        }
    };
    Ok(store)
}

fn print_summary(report: &BatchReport) {
    println!("batch {} ({} markets)", report.batch.timestamp, report.markets.len());
    for m in &report.markets {
        match m.write {
            Some(kind) => println!("  {:<12} {} ({:?})", m.market, m.outcome, kind),
            None => println!("  {:<12} {}", m.market, m.outcome),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // load .env
    telemetry::init_tracing(telemetry::DEFAULT_FILTER);

    let cli = Cli::parse();
    let mut cfg = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    if !cli.markets.is_empty() {
        cfg.markets = cli.markets;
    }
    if let Some(backend) = cli.backend {
        cfg.store.backend = backend;
    }
    if let Some(root) = cli.root {
        cfg.store.root = root;
    }
    cfg.validate().context("validating configuration")?;

    // Clock values are fixed before any request goes out
    let batch = Batch::now(cfg.batch.bucket_secs);
    info!(timestamp = %batch.timestamp, today = %batch.today, markets = ?cfg.markets, "starting batch");

    let api: Arc<dyn ExchangeApi> = Arc::new(
        DydxClient::new(&cfg.exchange.base_url, cfg.request_timeout()).context("building exchange client")?,
    );
    let params = load_market_params(api.as_ref(), &cfg.markets)
        .await
        .context("loading market parameters")?;

    let store = open_store(&cfg.store).await.context("opening object store")?;

    let dispatcher = Dispatcher::new(
        OrderBookFetcher::new(api, cfg.retry_policy()),
        QuoteValidator::new(cfg.validation.max_spread_ticks),
        CsvPersister::new(store),
        params,
        cfg.dispatch.max_concurrency,
    );
    let report = dispatcher.run(&cfg.markets, &batch).await;
    print_summary(&report);

    if !report.is_success() {
        bail!("{} of {} market(s) failed to persist", report.persist_failures(), report.markets.len());
    }
    Ok(())
}
