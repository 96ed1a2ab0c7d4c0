use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::config::normalize_symbol;
use crate::error::QuoteError;
use crate::model::quote::Quote;

/// Finnhub `/api/v1/quote` payload.
///
/// Unknown symbols come back as a well-formed body with `c: 0` and nulls
/// elsewhere, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct FinnhubQuoteResponse {
    #[serde(rename = "c", default)]
    pub current: Option<f64>,
    #[serde(rename = "h", default)]
    pub high: Option<f64>,
    #[serde(rename = "l", default)]
    pub low: Option<f64>,
    #[serde(rename = "d", default)]
    pub change: Option<f64>,
    #[serde(rename = "dp", default)]
    pub percent_change: Option<f64>,
    #[serde(rename = "o", default)]
    pub open: Option<f64>,
    #[serde(rename = "pc", default)]
    pub previous_close: Option<f64>,
    #[serde(rename = "t", default)]
    pub timestamp: Option<i64>,
}

/// Turn a raw payload into a `Quote` for `symbol`.
///
/// A missing or non-positive price means the provider does not know the
/// symbol. The ticker is always the requested symbol, uppercased.
pub fn normalize_quote(
    raw: FinnhubQuoteResponse,
    symbol: &str,
    fetched_at: DateTime<Local>,
) -> Result<Quote, QuoteError> {
    let ticker = normalize_symbol(symbol);
    let price = match raw.current {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => return Err(QuoteError::NotFound { symbol: ticker }),
    };
    Ok(Quote {
        ticker,
        price,
        percent_change: raw.percent_change.unwrap_or(0.0),
        high: raw.high.unwrap_or(0.0),
        low: raw.low.unwrap_or(0.0),
        change: raw.change.unwrap_or(0.0),
        fetched_at,
    })
}
