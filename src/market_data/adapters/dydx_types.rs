use std::collections::BTreeMap;

// Source: GET /v3/markets
#[derive(Debug, serde::Deserialize)]
pub struct MarketsResponse {
    pub markets: BTreeMap<String, MarketInfo>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInfo {
    pub tick_size: String,      // e.g. "1"
    pub step_size: String,      // e.g. "0.0001"
    pub min_order_size: String, // e.g. "0.001"
    // we ignore the other fields for now
}

// Source: GET /v3/orderbook/{market}
#[derive(Debug, serde::Deserialize)]
pub struct OrderbookResponse {
    pub bids: Vec<WireLevel>,
    pub asks: Vec<WireLevel>,
}

#[derive(Debug, serde::Deserialize)]
pub struct WireLevel {
    pub price: String, // price string, e.g. "16643.5"
    pub size: String,  // size string, e.g. "0.01"
}
