use crate::market_data::types::{FetchError, OrderBookSnapshot};
use crate::quote::OrderBookLevel;

// Best bid = highest-priced bid level, best ask = lowest-priced ask level.
// Input order is not trusted; both sides are scanned in full.

pub fn best_bid(bids: &[OrderBookLevel]) -> Option<OrderBookLevel> {
    bids.iter().copied().max_by(|a, b| a.price.total_cmp(&b.price))
}

pub fn best_ask(asks: &[OrderBookLevel]) -> Option<OrderBookLevel> {
    asks.iter().copied().min_by(|a, b| a.price.total_cmp(&b.price))
}

/// Top of book as (best_bid, best_ask). An empty side is a fetch failure.
pub fn extract_top_of_book(book: &OrderBookSnapshot) -> Result<(OrderBookLevel, OrderBookLevel), FetchError> {
    let bid = best_bid(&book.bids).ok_or(FetchError::EmptySide("bids"))?;
    let ask = best_ask(&book.asks).ok_or(FetchError::EmptySide("asks"))?;
    Ok((bid, ask))
}
