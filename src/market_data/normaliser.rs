// Convert wire strings into numbers.
// The exchange sends every price/size as a decimal string; a value that does
// not parse is an error, never silently zero.

use crate::market_data::types::FetchError;
use crate::quote::OrderBookLevel;

pub fn parse_decimal(field: &'static str, s: &str) -> Result<f64, FetchError> {
    let trimmed = s.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(FetchError::Malformed { field, value: s.to_string() }),
    }
}

pub fn parse_level(price: &str, size: &str) -> Result<OrderBookLevel, FetchError> {
    Ok(OrderBookLevel {
        price: parse_decimal("price", price)?,
        size: parse_decimal("size", size)?,
    })
}
