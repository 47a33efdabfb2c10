//! FolioWatch Market Data Crate
//!
//! Thin client for the external quote provider. The crate covers the one
//! external contract of the dashboard:
//!
//! - [`QuoteProvider::fetch_daily`] — one request for a symbol's daily
//!   series, normalized to the latest [`Quote`], with provider-reported
//!   failures surfaced as distinguishable [`MarketDataError`] kinds.
//! - [`fetch_many_daily`] — sequential watch-list fetch with a fixed
//!   inter-request delay; never concurrent.
//!
//! There is no retry, no caching, and no persistence here; callers own
//! user-facing messaging and storage of the fetched quotes.

pub mod batch;
pub mod errors;
pub mod models;
pub mod provider;

pub use batch::{fetch_many_daily, INTER_REQUEST_DELAY};
pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::alpha_vantage::{AlphaVantageConfig, AlphaVantageProvider};
pub use provider::QuoteProvider;
