//! Polls an exchange's public order books for a fixed set of markets, keeps
//! the best bid/ask when the spread looks sane, and appends one timestamped
//! row per market to a day-partitioned CSV object.

pub mod batch;
pub mod config;
pub mod market_data;
pub mod persist;
pub mod quote;
pub mod router;
pub mod telemetry;
