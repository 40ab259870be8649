// Shared trait for exchange REST adapters

use crate::market_data::types::{CatalogEntry, FetchError, OrderBookSnapshot};

#[async_trait::async_trait]
pub trait ExchangeApi: Send + Sync {
    /// Full market catalog (every market the exchange lists).
    async fn markets(&self) -> Result<Vec<CatalogEntry>, FetchError>;

    /// Current order book for one market.
    async fn orderbook(&self, market: &str) -> Result<OrderBookSnapshot, FetchError>;
}

pub mod dydx;
pub mod dydx_types;
