use std::time::Duration;

use chrono::Local;
use url::Url;

use crate::config::normalize_symbol;
use crate::error::{AppError, QuoteError};
use crate::model::quote::Quote;
use crate::poller::QuoteSource;

use super::types::{normalize_quote, FinnhubQuoteResponse};

pub struct FinnhubRestClient {
    http: reqwest::Client,
    quote_url: Url,
    api_key: String,
}

impl FinnhubRestClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        Ok(Self {
            http,
            quote_url: base.join("api/v1/quote")?,
            api_key: api_key.to_string(),
        })
    }

    fn compact_error_body(body: &str) -> String {
        let normalized = body.split_whitespace().collect::<Vec<_>>().join(" ");
        if normalized.chars().count() > 180 {
            format!("{}...", normalized.chars().take(180).collect::<String>())
        } else {
            normalized
        }
    }

    fn quote_request_url(&self, symbol: &str) -> Url {
        let mut url = self.quote_url.clone();
        url.query_pairs_mut()
            .append_pair("symbol", symbol)
            .append_pair("token", &self.api_key);
        url
    }

    /// One GET against `/api/v1/quote`. No retries.
    pub async fn request_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let symbol = normalize_symbol(symbol);
        let url = self.quote_request_url(&symbol);

        // Drop the URL from transport errors, it carries the token.
        let resp = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(symbol = %symbol, error = %e, "Quote request failed");
            QuoteError::from(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(symbol = %symbol, %status, "Quote request returned error status");
            return Err(QuoteError::Network(format!(
                "HTTP {}: {}",
                status,
                Self::compact_error_body(&body)
            )));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| QuoteError::from(e.without_url()))?;
        let raw: FinnhubQuoteResponse = serde_json::from_str(&body)?;
        let quote = normalize_quote(raw, &symbol, Local::now())?;
        tracing::debug!(
            symbol = %quote.ticker,
            price = quote.price,
            percent_change = quote.percent_change,
            "Quote fetched"
        );
        Ok(quote)
    }
}

impl QuoteSource for FinnhubRestClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.request_quote(symbol).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_carries_symbol_and_token() {
        let client =
            FinnhubRestClient::new("https://finnhub.io/", "secret", Duration::from_secs(1))
                .unwrap();
        let url = client.quote_request_url("DIS");
        assert_eq!(url.path(), "/api/v1/quote");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("symbol".to_string(), "DIS".to_string()),
                ("token".to_string(), "secret".to_string()),
            ]
        );
    }

    #[test]
    fn compact_error_body_truncates_long_bodies() {
        let body = "x".repeat(400);
        let compact = FinnhubRestClient::compact_error_body(&body);
        assert_eq!(compact.len(), 183);
        assert!(compact.ends_with("..."));
        assert_eq!(
            FinnhubRestClient::compact_error_body("{\n  \"error\": \"bad\"\n}"),
            "{ \"error\": \"bad\" }"
        );
    }
}
