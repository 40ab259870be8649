// Quote model and the per-quote processing stages
pub mod types;      // Quote, MarketParams, OrderBookLevel
pub mod missing;    // Option<f64> arithmetic for the "missing" sentinel
pub mod validator;  // spread sanity check
pub mod enrich;     // mid price

pub use types::*;
