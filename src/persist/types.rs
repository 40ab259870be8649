use crate::batch::Batch;
use crate::quote::Quote;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("store failure on {key}: {message}")]
    Store { key: String, message: String },

    #[error("object {0} not found")]
    NotFound(String),

    #[error("object {key} has header {found:?}, expected {expected:?}")]
    HeaderMismatch {
        key: String,
        found: Vec<String>,
        expected: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("object is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type PersistResult<T> = Result<T, PersistError>;

pub const CSV_HEADER: [&str; 6] = ["timestamp", "bid_price", "ask_price", "mid", "bid_size", "ask_size"];

/// One CSV row. Field order matches `CSV_HEADER`; `None` is written as an empty field.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuoteRow {
    pub timestamp: String,
    pub bid_price: Option<f64>,
    pub ask_price: Option<f64>,
    pub mid: Option<f64>,
    pub bid_size: Option<f64>,
    pub ask_size: Option<f64>,
}

impl QuoteRow {
    /// Rows are always keyed by the batch timestamp, sentinel quotes included.
    pub fn from_quote(quote: &Quote, batch: &Batch) -> Self {
        Self {
            timestamp: batch.timestamp.clone(),
            bid_price: quote.bid_price,
            ask_price: quote.ask_price,
            mid: quote.mid,
            bid_size: quote.bid_size,
            ask_size: quote.ask_size,
        }
    }
}

/// Day-partitioned object key: `{market}/{market}_{YYYY-MM-DD}.csv`.
pub fn object_key(market: &str, today: &str) -> String {
    format!("{market}/{market}_{today}.csv")
}
