//! Background quote fetching.
//!
//! Fetch tasks run on the tokio runtime owned by `main` and report back to
//! the UI loop over an unbounded channel. The UI loop is the only writer to
//! the quote store; tasks never touch shared state. Nothing is cancelled: a
//! result arriving after the app has exited hits a closed channel and is
//! dropped.

use std::sync::Arc;

use log::info;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use foliowatch_core::constants::WATCHLIST;
use foliowatch_market_data::{fetch_many_daily, MarketDataError, Quote, QuoteProvider};

/// Message from a fetch task to the UI loop.
#[derive(Debug)]
pub enum FetchMessage {
    /// One symbol's outcome
    Quote {
        symbol: String,
        result: Result<Option<Quote>, MarketDataError>,
    },
    /// The watch-list batch finished (all symbols reported)
    BatchDone,
}

/// Fetch the fixed watch list, one symbol at a time.
pub fn spawn_watchlist(
    handle: &Handle,
    provider: Arc<dyn QuoteProvider>,
    tx: UnboundedSender<FetchMessage>,
) {
    handle.spawn(async move {
        let symbols: Vec<String> = WATCHLIST.iter().map(|s| s.to_string()).collect();
        info!("Refreshing watchlist: {:?}", symbols);

        for (symbol, result) in fetch_many_daily(provider.as_ref(), &symbols).await {
            if tx.send(FetchMessage::Quote { symbol, result }).is_err() {
                return;
            }
        }
        let _ = tx.send(FetchMessage::BatchDone);
    });
}

/// Fetch a single user-entered symbol.
pub fn spawn_single(
    handle: &Handle,
    provider: Arc<dyn QuoteProvider>,
    symbol: String,
    tx: UnboundedSender<FetchMessage>,
) {
    handle.spawn(async move {
        info!("Fetching quote for {}", symbol);
        let result = provider.fetch_daily(&symbol).await;
        let _ = tx.send(FetchMessage::Quote { symbol, result });
    });
}

/// Human-readable status line for a failed fetch.
pub fn status_for_error(symbol: &str, error: &MarketDataError) -> String {
    match error {
        MarketDataError::SymbolNotFound(_) => format!("{}: symbol not found", symbol),
        MarketDataError::RateLimited { .. } => {
            "Rate limit reached, try again in a minute".to_string()
        }
        MarketDataError::Transport { message, .. } => {
            format!("{}: request failed ({})", symbol, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_not_found() {
        let error = MarketDataError::SymbolNotFound("Invalid API call".to_string());
        assert_eq!(status_for_error("BOGUS", &error), "BOGUS: symbol not found");
    }

    #[test]
    fn test_status_for_rate_limit_names_no_symbol() {
        let error = MarketDataError::RateLimited {
            provider: "ALPHA_VANTAGE".to_string(),
        };
        assert_eq!(
            status_for_error("AAPL", &error),
            "Rate limit reached, try again in a minute"
        );
    }

    #[test]
    fn test_status_for_transport_failure() {
        let error = MarketDataError::Transport {
            provider: "ALPHA_VANTAGE".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(
            status_for_error("AAPL", &error),
            "AAPL: request failed (connection reset)"
        );
    }
}
