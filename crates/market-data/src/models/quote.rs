use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single day's OHLCV record for one symbol.
///
/// Prices are `Decimal` so the provider's string-encoded values survive
/// parsing with no rounding loss. Immutable once constructed; the quote
/// store keeps at most one instance per symbol (last fetch wins).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol the quote belongs to
    pub symbol: String,

    /// Trading day of the quote
    pub date: NaiveDate,

    /// Opening price
    pub open: Decimal,

    /// High price
    pub high: Decimal,

    /// Low price
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Trading volume
    pub volume: u64,
}

impl Quote {
    /// Create a full OHLCV quote.
    #[allow(clippy::too_many_arguments)]
    pub fn ohlcv(
        symbol: String,
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            symbol,
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_ohlcv() {
        let quote = Quote::ohlcv(
            "AAPL".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            dec!(148.00),
            dec!(152.00),
            dec!(147.50),
            dec!(150.25),
            1_000_000,
        );
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.open, dec!(148.00));
        assert_eq!(quote.high, dec!(152.00));
        assert_eq!(quote.low, dec!(147.50));
        assert_eq!(quote.close, dec!(150.25));
        assert_eq!(quote.volume, 1_000_000);
    }
}
