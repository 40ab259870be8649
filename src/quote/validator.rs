use crate::quote::missing::tick_diff;
use crate::quote::types::{MarketParams, Quote};
use tracing::{debug, warn};

pub const DEFAULT_MAX_SPREAD_TICKS: f64 = 10.0;

/// Data-quality gate on bid/ask distance.
///
/// A quote whose spread is `max_spread_ticks` ticks or more is treated as an
/// exchange glitch (crossed or illiquid book) and replaced by the sentinel.
#[derive(Debug, Clone, Copy)]
pub struct QuoteValidator {
    pub max_spread_ticks: f64,
}

impl Default for QuoteValidator {
    fn default() -> Self {
        Self { max_spread_ticks: DEFAULT_MAX_SPREAD_TICKS }
    }
}

impl QuoteValidator {
    pub fn new(max_spread_ticks: f64) -> Self {
        Self { max_spread_ticks }
    }

    pub fn validate(&self, params: &MarketParams, quote: Quote) -> Quote {
        if quote.is_missing() {
            return quote;
        }

        match tick_diff(quote.bid_price, quote.ask_price, params.price_rounder) {
            Some(ticks) if ticks < self.max_spread_ticks => {
                debug!(market = %quote.market, ticks, "spread within tolerance");
                quote
            }
            ticks => {
                warn!(
                    market = %quote.market,
                    stage = "validate",
                    bid = ?quote.bid_price,
                    ask = ?quote.ask_price,
                    ticks = ?ticks,
                    max_ticks = self.max_spread_ticks,
                    "bid/ask too far apart, recording as missing"
                );
                Quote::missing(&quote.market)
            }
        }
    }
}
