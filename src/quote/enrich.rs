use crate::quote::missing::{add_opt, div_opt, round_opt};
use crate::quote::types::Quote;

pub const MID_DECIMALS: i32 = 6;

/// Midpoint of bid/ask rounded to 6 decimals; missing if either side is missing.
pub fn mid_price(bid: Option<f64>, ask: Option<f64>) -> Option<f64> {
    round_opt(div_opt(add_opt(bid, ask), Some(2.0)), MID_DECIMALS)
}

pub fn with_mid(mut quote: Quote) -> Quote {
    quote.mid = mid_price(quote.bid_price, quote.ask_price);
    quote
}
