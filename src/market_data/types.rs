use crate::quote::OrderBookLevel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed number {value:?} in field {field}")]
    Malformed { field: &'static str, value: String },

    #[error("order book has no {0}")]
    EmptySide(&'static str),

    #[error("other: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum ParamsError {
    #[error("market catalog request failed: {0}")]
    Request(#[from] FetchError),

    #[error("market {0} is not listed by the exchange")]
    UnknownMarket(String),

    #[error("market {market}: {source}")]
    Malformed {
        market: String,
        #[source]
        source: FetchError,
    },
}

/// One order book, levels already parsed to numbers.
/// Level ordering is whatever the exchange sent; nothing here assumes it is sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBookSnapshot {
    pub market: String,
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}

/// One catalog entry with the numeric-as-string fields still raw.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub market: String,
    pub tick_size: String,
    pub step_size: String,
    pub min_order_size: String,
}
