pub mod rest;
pub mod types;

pub use rest::FinnhubRestClient;
pub use types::{normalize_quote, FinnhubQuoteResponse};
