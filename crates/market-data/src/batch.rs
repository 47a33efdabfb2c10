//! Sequential batch fetching for a fixed watch list.
//!
//! Requests are deliberately issued one at a time with a fixed delay between
//! them to stay under the provider's free-tier quota. This is a throttle,
//! not a concurrent batch; no two requests are ever in flight at once.

use std::time::Duration;

use log::debug;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteProvider;

/// Fixed delay between consecutive request issuances.
pub const INTER_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Fetch the latest daily quote for each symbol, one at a time.
///
/// Each symbol's outcome is reported independently; a failure on one symbol
/// does not abort the remaining fetches. The delay is imposed between
/// consecutive calls, not after the last one.
pub async fn fetch_many_daily<P: QuoteProvider + ?Sized>(
    provider: &P,
    symbols: &[String],
) -> Vec<(String, Result<Option<Quote>, MarketDataError>)> {
    let mut results = Vec::with_capacity(symbols.len());

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(INTER_REQUEST_DELAY).await;
        }

        debug!("Fetching daily quote for {} from {}", symbol, provider.id());
        let outcome = provider.fetch_daily(symbol).await;
        if let Err(ref e) = outcome {
            debug!("Fetch for {} failed: {}", symbol, e);
        }
        results.push((symbol.clone(), outcome));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;
    use tokio::time::Instant;

    /// Fake provider that records issuance times and fails on demand.
    struct FakeProvider {
        issued: Mutex<Vec<(String, Instant)>>,
        fail_symbols: Vec<String>,
    }

    impl FakeProvider {
        fn new(fail_symbols: &[&str]) -> Self {
            Self {
                issued: Mutex::new(Vec::new()),
                fail_symbols: fail_symbols.iter().map(|s| s.to_string()).collect(),
            }
        }

        fn quote(symbol: &str) -> Quote {
            Quote::ohlcv(
                symbol.to_string(),
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                dec!(150.00),
                dec!(152.00),
                dec!(149.50),
                dec!(151.25),
                1_000_000,
            )
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeProvider {
        fn id(&self) -> &'static str {
            "FAKE"
        }

        async fn fetch_daily(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError> {
            self.issued
                .lock()
                .unwrap()
                .push((symbol.to_string(), Instant::now()));

            if self.fail_symbols.iter().any(|s| s == symbol) {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            Ok(Some(Self::quote(symbol)))
        }
    }

    fn symbols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_symbols_issue_sequentially_with_gap() {
        let provider = FakeProvider::new(&[]);
        let results = fetch_many_daily(&provider, &symbols(&["AAPL", "MSFT"])).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|(_, r)| r.is_ok()));

        let issued = provider.issued.lock().unwrap();
        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0].0, "AAPL");
        assert_eq!(issued[1].0, "MSFT");
        assert!(issued[1].1 - issued[0].1 >= INTER_REQUEST_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_abort_remaining_fetches() {
        let provider = FakeProvider::new(&["AAPL"]);
        let results = fetch_many_daily(&provider, &symbols(&["AAPL", "MSFT"])).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "AAPL");
        assert!(matches!(
            results[0].1,
            Err(MarketDataError::SymbolNotFound(_))
        ));
        assert_eq!(results[1].0, "MSFT");
        assert!(results[1].1.is_ok());

        let issued = provider.issued.lock().unwrap();
        assert_eq!(issued.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_delay_before_first_request() {
        let provider = FakeProvider::new(&[]);
        let start = Instant::now();
        fetch_many_daily(&provider, &symbols(&["AAPL"])).await;

        let issued = provider.issued.lock().unwrap();
        assert_eq!(issued[0].1, start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_symbol_list() {
        let provider = FakeProvider::new(&[]);
        let results = fetch_many_daily(&provider, &[]).await;
        assert!(results.is_empty());
        assert!(provider.issued.lock().unwrap().is_empty());
    }
}
