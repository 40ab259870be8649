// Arithmetic over possibly-missing numbers. `None` in, `None` out.

pub fn add_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? + b?)
}

pub fn sub_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// Division that treats a zero divisor or a non-finite quotient as missing.
pub fn div_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let (a, b) = (a?, b?);
    if b == 0.0 {
        return None;
    }
    let out = a / b;
    out.is_finite().then_some(out)
}

pub fn round_dp(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

pub fn round_opt(x: Option<f64>, decimals: i32) -> Option<f64> {
    x.map(|v| round_dp(v, decimals))
}

/// Round `number` to the nearest multiple of `precision` (e.g. 1.03 @ 0.05 -> 1.05),
/// then to 6 decimals to shed float artifacts.
pub fn round_to_value(number: f64, precision: f64) -> f64 {
    round_dp((number / precision).round() * precision, 6)
}

/// Spread between bid and ask measured in ticks, rounded to 3 decimals.
pub fn tick_diff(bid: Option<f64>, ask: Option<f64>, price_rounder: f64) -> Option<f64> {
    let ticks = div_opt(sub_opt(ask, bid), Some(price_rounder))?;
    Some(round_dp(ticks, 3).abs())
}

/// Absolute difference of two values relative to their mean.
pub fn perc_diff(a: f64, b: f64) -> Option<f64> {
    div_opt(Some((a - b).abs()), Some((a + b) / 2.0))
}
