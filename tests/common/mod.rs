use chrono::Local;

use stock_pulse::model::quote::Quote;

/// Quote stamped with the current local time; high and low equal the price.
pub fn quote(ticker: &str, price: f64, percent_change: f64) -> Quote {
    Quote {
        ticker: ticker.to_ascii_uppercase(),
        price,
        percent_change,
        high: price,
        low: price,
        change: 0.0,
        fetched_at: Local::now(),
    }
}
