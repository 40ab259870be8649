// Market data module entrypoint
pub mod types;          // wire-independent book + error types
pub mod adapters;       // exchange-specific REST clients (e.g. dYdX)
pub mod normaliser;     // converts wire strings -> numbers
pub mod external_book;  // best bid / best ask extraction
pub mod params;         // per-market tick/step/min-order loader
pub mod fetcher;        // order book fetch with bounded retry

pub use types::{FetchError, OrderBookSnapshot, ParamsError};
