use serde::{Deserialize, Serialize};

// Market symbol as the exchange spells it, e.g. "BTC-USD"
pub type Market = String;

/// Per-market trading parameters pulled from the exchange catalog.
/// Only `price_rounder` feeds the spread check; the rest is carried for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    pub price_rounder: f64, // tickSize
    pub order_size: f64,    // stepSize
    pub min_order: f64,     // minOrderSize
}

/// A single price level after the wire strings have been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: f64,
    pub size: f64,
}

/// Best bid/ask reading for one market.
///
/// Every numeric field is `None` when the reading is "missing" (the sentinel),
/// so a sentinel flows through validation, enrichment and persistence exactly
/// like a real reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub market: Market,
    pub timestamp: Option<String>,
    pub bid_price: Option<f64>,
    pub bid_size: Option<f64>,
    pub ask_price: Option<f64>,
    pub ask_size: Option<f64>,
    pub mid: Option<f64>,
}

impl Quote {
    pub fn new(market: &str, timestamp: &str, best_bid: OrderBookLevel, best_ask: OrderBookLevel) -> Self {
        Self {
            market: market.to_string(),
            timestamp: Some(timestamp.to_string()),
            bid_price: Some(best_bid.price),
            bid_size: Some(best_bid.size),
            ask_price: Some(best_ask.price),
            ask_size: Some(best_ask.size),
            mid: None,
        }
    }

    /// The sentinel reading: no timestamp, every number missing.
    pub fn missing(market: &str) -> Self {
        Self {
            market: market.to_string(),
            timestamp: None,
            bid_price: None,
            bid_size: None,
            ask_price: None,
            ask_size: None,
            mid: None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.bid_price.is_none()
            && self.bid_size.is_none()
            && self.ask_price.is_none()
            && self.ask_size.is_none()
    }
}
