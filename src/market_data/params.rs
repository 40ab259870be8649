use std::collections::HashMap;

use crate::market_data::adapters::ExchangeApi;
use crate::market_data::normaliser::parse_decimal;
use crate::market_data::types::{CatalogEntry, ParamsError};
use crate::quote::MarketParams;
use tracing::{info, instrument};

fn params_from_entry(entry: &CatalogEntry) -> Result<MarketParams, ParamsError> {
    let malformed = |source| ParamsError::Malformed { market: entry.market.clone(), source };
    Ok(MarketParams {
        price_rounder: parse_decimal("tickSize", &entry.tick_size).map_err(malformed)?,
        order_size: parse_decimal("stepSize", &entry.step_size).map_err(malformed)?,
        min_order: parse_decimal("minOrderSize", &entry.min_order_size).map_err(malformed)?,
    })
}

/// Load tick/step/min-order parameters for the configured markets.
///
/// One catalog request, no retry: without a tick size no quote can be
/// validated, so any failure here aborts the run.
#[instrument(skip(api))]
pub async fn load_market_params(
    api: &dyn ExchangeApi,
    markets: &[String],
) -> Result<HashMap<String, MarketParams>, ParamsError> {
    let catalog = api.markets().await?;

    let mut out = HashMap::with_capacity(markets.len());
    for market in markets {
        let entry = catalog
            .iter()
            .find(|e| &e.market == market)
            .ok_or_else(|| ParamsError::UnknownMarket(market.clone()))?;
        let params = params_from_entry(entry)?;
        info!(%market, tick = params.price_rounder, step = params.order_size, min = params.min_order, "market params");
        out.insert(market.clone(), params);
    }
    Ok(out)
}
