//! Market data providers.

pub mod alpha_vantage;
mod traits;

pub use traits::QuoteProvider;
