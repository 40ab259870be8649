// dYdX public REST adapter: market catalog + order book snapshots

use super::dydx_types::{MarketsResponse, OrderbookResponse, WireLevel};
use super::ExchangeApi;
use crate::market_data::normaliser::parse_level;
use crate::market_data::types::{CatalogEntry, FetchError, OrderBookSnapshot};
use crate::quote::OrderBookLevel;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_BASE_URL: &str = "https://api.dydx.exchange";

pub struct DydxClient {
    pub base_url: String, // "https://api.dydx.exchange"
    http: reqwest::Client,
}

impl DydxClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quote-recorder/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self.http.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), url });
        }

        let body = res.text().await?;
        trace!(%url, bytes = body.len(), "exchange response");
        Ok(serde_json::from_str(&body)?)
    }
}

fn parse_side(side: &[WireLevel]) -> Result<Vec<OrderBookLevel>, FetchError> {
    side.iter().map(|lvl| parse_level(&lvl.price, &lvl.size)).collect()
}

pub fn book_from_wire(market: &str, wire: OrderbookResponse) -> Result<OrderBookSnapshot, FetchError> {
    Ok(OrderBookSnapshot {
        market: market.to_string(),
        bids: parse_side(&wire.bids)?,
        asks: parse_side(&wire.asks)?,
    })
}

pub fn catalog_from_wire(wire: MarketsResponse) -> Vec<CatalogEntry> {
    wire.markets
        .into_iter()
        .map(|(market, info)| CatalogEntry {
            market,
            tick_size: info.tick_size,
            step_size: info.step_size,
            min_order_size: info.min_order_size,
        })
        .collect()
}

#[async_trait::async_trait]
impl ExchangeApi for DydxClient {
    async fn markets(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let wire: MarketsResponse = self.get_json("/v3/markets").await?;
        Ok(catalog_from_wire(wire))
    }

    async fn orderbook(&self, market: &str) -> Result<OrderBookSnapshot, FetchError> {
        let wire: OrderbookResponse = self.get_json(&format!("/v3/orderbook/{}", market)).await?;
        book_from_wire(market, wire)
    }
}
