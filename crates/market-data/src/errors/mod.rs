//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching market data.
///
/// Exactly three recoverable kinds are distinguished at the client boundary.
/// All of them are surfaced to the caller, which owns user-facing messaging;
/// none are retried inside this crate.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider reported that it does not recognize the symbol.
    /// Retrying the same symbol won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider reported quota exhaustion, either through a rate-limit
    /// notice in the response body or HTTP 429.
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// Any network, timeout, HTTP-status, or parse failure.
    #[error("Transport error: {provider} - {message}")]
    Transport {
        /// The provider the request was addressed to
        provider: String,
        /// What went wrong
        message: String,
    },
}
