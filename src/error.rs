use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Outcome of a single failed quote fetch.
///
/// Both variants are recoverable: the poller keeps its cadence and the next
/// tick is the retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// The provider answered, but reported no price for the symbol.
    #[error("ticker \"{symbol}\" not found")]
    NotFound { symbol: String },

    /// Transport, HTTP status or body decoding failure.
    #[error("network error: {0}")]
    Network(String),
}

impl QuoteError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Network(format!("invalid quote payload: {}", e))
    }
}
