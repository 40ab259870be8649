use std::sync::Arc;
use std::time::Duration;

use crate::market_data::adapters::ExchangeApi;
use crate::market_data::external_book::extract_top_of_book;
use crate::market_data::types::FetchError;
use crate::quote::Quote;
use tracing::{debug, instrument, warn};

pub const DEFAULT_ATTEMPTS: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { attempts: DEFAULT_ATTEMPTS, delay: DEFAULT_RETRY_DELAY }
    }
}

/// Pulls one order book per market and reduces it to a top-of-book `Quote`.
pub struct OrderBookFetcher {
    api: Arc<dyn ExchangeApi>,
    retry: RetryPolicy,
}

impl OrderBookFetcher {
    pub fn new(api: Arc<dyn ExchangeApi>, retry: RetryPolicy) -> Self {
        Self { api, retry }
    }

    /// One attempt: request, parse, pick best levels.
    pub async fn try_fetch(&self, market: &str, timestamp: &str) -> Result<Quote, FetchError> {
        let book = self.api.orderbook(market).await?;
        let (bid, ask) = extract_top_of_book(&book)?;
        Ok(Quote::new(market, timestamp, bid, ask))
    }

    /// Retry `try_fetch` up to `retry.attempts` times with a fixed delay between
    /// attempts. Never fails: exhaustion yields `Quote::missing(market)`.
    #[instrument(skip(self))]
    pub async fn fetch(&self, market: &str, timestamp: &str) -> Quote {
        let attempts = self.retry.attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            match self.try_fetch(market, timestamp).await {
                Ok(quote) => {
                    if attempt > 1 {
                        debug!(%market, attempt, "order book fetched after retry");
                    }
                    return quote;
                }
                Err(e) => {
                    debug!(%market, stage = "fetch", attempt, error = %e, "order book fetch failed");
                    metrics::counter!("quote_recorder_fetch_failures_total", "market" => market.to_string())
                        .increment(1);
                    last_err = Some(e);
                    if attempt < attempts && !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }

        warn!(
            %market,
            stage = "fetch",
            attempts,
            error = %last_err.map(|e| e.to_string()).unwrap_or_default(),
            "giving up on order book, recording as missing"
        );
        Quote::missing(market)
    }
}
