//! Quote cache for the current session.

mod store;

pub use store::QuoteStore;
