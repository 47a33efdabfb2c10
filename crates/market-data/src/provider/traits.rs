//! Quote provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for daily quote providers.
///
/// The trait is the seam between the dashboard and the external provider:
/// the batch fetcher and the UI are written against it, and tests substitute
/// a fake implementation.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "ALPHA_VANTAGE".
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Fetch the most recent daily quote for a symbol.
    ///
    /// Issues a single request; no retry is performed. Returns `Ok(None)`
    /// when the provider answers without a daily series at all, which is a
    /// non-fatal "no data" outcome distinct from the error kinds.
    async fn fetch_daily(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError>;
}
