//! In-memory quote store.
//!
//! The store holds the latest fetched quote per symbol for the lifetime of
//! one session. There is no eviction and no size bound; in practice it is
//! bounded by the number of symbols the user looks up. The UI event loop is
//! the single writer, and every write is an atomic replacement of one entry.

use std::collections::HashMap;

use log::debug;

use foliowatch_market_data::Quote;

/// Symbol-keyed mapping of the latest quote per symbol.
///
/// `upsert` is the one update operation: insert-or-replace by symbol key,
/// last fetch wins. Keeping the merge semantics in one place means a future
/// parallel fetcher would not change how writes resolve.
#[derive(Debug, Default)]
pub struct QuoteStore {
    quotes: HashMap<String, Quote>,
}

impl QuoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the quote for its symbol.
    ///
    /// Returns the displaced quote, if the symbol was already present.
    pub fn upsert(&mut self, quote: Quote) -> Option<Quote> {
        let displaced = self.quotes.insert(quote.symbol.clone(), quote);
        if let Some(ref old) = displaced {
            debug!("Replaced quote for {} (was {})", old.symbol, old.date);
        }
        displaced
    }

    /// The latest quote for a symbol, if one has been fetched.
    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    /// Number of symbols with a stored quote.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether any quotes have been stored.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Symbols with a stored quote, in no particular order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.quotes.keys().map(String::as_str)
    }
}
