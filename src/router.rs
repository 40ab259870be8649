// Router orchestrates one batch: parallel fetch, then sequential validate -> mid -> persist
use std::collections::HashMap;
use std::fmt;

use futures::stream::{self, StreamExt};
use tracing::{error, info, instrument, warn};

use crate::batch::Batch;
use crate::market_data::fetcher::OrderBookFetcher;
use crate::persist::{CsvPersister, WriteKind};
use crate::quote::enrich::with_mid;
use crate::quote::validator::QuoteValidator;
use crate::quote::{MarketParams, Quote};

pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Valid quote written.
    Recorded,
    /// Spread check failed; sentinel row written.
    Rejected,
    /// Fetch retries exhausted; sentinel row written.
    Missing,
    /// Row could not be written.
    PersistFailed(String),
}

impl Outcome {
    fn label(&self) -> &'static str {
        match self {
            Outcome::Recorded => "recorded",
            Outcome::Rejected => "rejected",
            Outcome::Missing => "missing",
            Outcome::PersistFailed(_) => "persist_failed",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PersistFailed(reason) => write!(f, "persist failed: {}", reason),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketReport {
    pub market: String,
    pub outcome: Outcome,
    pub write: Option<WriteKind>,
    pub quote: Quote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub batch: Batch,
    pub markets: Vec<MarketReport>,
}

impl BatchReport {
    pub fn count(&self, label: &str) -> usize {
        self.markets.iter().filter(|m| m.outcome.label() == label).count()
    }

    pub fn persist_failures(&self) -> usize {
        self.count("persist_failed")
    }

    /// Every market got a row, sentinel or not.
    pub fn is_success(&self) -> bool {
        self.persist_failures() == 0
    }
}

pub struct Dispatcher {
    fetcher: OrderBookFetcher,
    validator: QuoteValidator,
    persister: CsvPersister,
    params: HashMap<String, MarketParams>,
    max_concurrency: usize,
}

impl Dispatcher {
    pub fn new(
        fetcher: OrderBookFetcher,
        validator: QuoteValidator,
        persister: CsvPersister,
        params: HashMap<String, MarketParams>,
        max_concurrency: usize,
    ) -> Self {
        Self { fetcher, validator, persister, params, max_concurrency }
    }

    /// Fetch every market concurrently, at most `max_concurrency` in flight.
    /// Results come back in `markets` order regardless of completion order.
    pub async fn fetch_all(&self, markets: &[String], batch: &Batch) -> Vec<Quote> {
        let pool = self.max_concurrency.clamp(1, markets.len().max(1));
        stream::iter(markets)
            .map(|market| self.fetcher.fetch(market, &batch.timestamp))
            .buffered(pool)
            .collect()
            .await
    }

    fn process(&self, quote: Quote) -> (Quote, Outcome) {
        if quote.is_missing() {
            return (with_mid(quote), Outcome::Missing);
        }
        let validated = match self.params.get(&quote.market) {
            Some(params) => self.validator.validate(params, quote),
            None => {
                warn!(market = %quote.market, stage = "validate", "no market params, recording as missing");
                Quote::missing(&quote.market)
            }
        };
        let outcome = if validated.is_missing() { Outcome::Rejected } else { Outcome::Recorded };
        (with_mid(validated), outcome)
    }

    #[instrument(skip_all, fields(timestamp = %batch.timestamp, markets = markets.len()))]
    pub async fn run(&self, markets: &[String], batch: &Batch) -> BatchReport {
        let quotes = self.fetch_all(markets, batch).await;

        let mut reports = Vec::with_capacity(quotes.len());
        for quote in quotes {
            let market = quote.market.clone();
            let (quote, mut outcome) = self.process(quote);

            let write = match self.persister.persist(&quote, batch).await {
                Ok(kind) => Some(kind),
                Err(e) => {
                    error!(%market, stage = "persist", error = %e, "failed to save row");
                    metrics::counter!("quote_recorder_persist_failures_total", "market" => market.clone()).increment(1);
                    outcome = Outcome::PersistFailed(e.to_string());
                    None
                }
            };

            metrics::counter!(
                "quote_recorder_quotes_total",
                "market" => market.clone(),
                "outcome" => outcome.label()
            )
            .increment(1);
            reports.push(MarketReport { market, outcome, write, quote });
        }

        let report = BatchReport { batch: batch.clone(), markets: reports };
        info!(
            recorded = report.count("recorded"),
            rejected = report.count("rejected"),
            missing = report.count("missing"),
            persist_failed = report.persist_failures(),
            "batch complete"
        );
        report
    }
}
