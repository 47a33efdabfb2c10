//! Data models for market data operations.

mod quote;

pub use quote::Quote;
