//! Shared constants.

/// The fixed watch list fetched by the summary view's refresh action.
pub const WATCHLIST: [&str; 4] = ["AAPL", "MSFT", "GOOGL", "AMZN"];

/// Decimal places shown for prices and money amounts.
pub const DISPLAY_PRECISION: u32 = 2;
