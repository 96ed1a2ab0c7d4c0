use anyhow::{anyhow, bail, Context, Result};

use stock_pulse::config::Config;
use stock_pulse::error::QuoteError;
use stock_pulse::finnhub::FinnhubRestClient;

/// One-shot fetch for each symbol given on the command line (default symbol
/// when none), printed as a table. Exits non-zero if any fetch failed.
#[tokio::main]
async fn main() -> Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("failed to install rustls crypto provider"))?;

    let config = Config::load()?;
    let client = FinnhubRestClient::new(
        &config.finnhub.rest_base_url,
        &config.finnhub.api_key,
        config.finnhub.request_timeout(),
    )
    .context("failed to build Finnhub client")?;

    let mut symbols: Vec<String> = std::env::args().skip(1).collect();
    if symbols.is_empty() {
        symbols.push(config.finnhub.default_symbol());
    }

    println!("quote probe results");
    println!("===================");

    let mut has_failure = false;
    for symbol in &symbols {
        match client.request_quote(symbol).await {
            Ok(q) => println!(
                "- {:<8} OK        ${:<10.2} {:>+7.2}%  {} at {}",
                q.ticker,
                q.price,
                q.percent_change,
                q.direction().arrow(),
                q.last_updated()
            ),
            Err(QuoteError::NotFound { symbol }) => {
                has_failure = true;
                println!("- {:<8} NOT FOUND", symbol);
            }
            Err(e) => {
                has_failure = true;
                println!("- {:<8} FAILED    {}", symbol.to_ascii_uppercase(), e);
            }
        }
    }

    if has_failure {
        bail!("one or more quote probes failed");
    }

    Ok(())
}
