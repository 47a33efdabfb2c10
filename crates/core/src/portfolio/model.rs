use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foliowatch_market_data::Quote;

/// A held position in the portfolio.
///
/// `last_price` is the bundled sample price used for display until a live
/// quote for the symbol arrives; a live close always takes precedence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub name: String,
    /// Display category the position's card belongs to
    pub category: String,
    pub shares: Decimal,
    /// Average cost per share
    pub avg_cost: Decimal,
    /// Sample price used when no live quote is available
    pub last_price: Decimal,
}

impl Position {
    /// Price used for valuation: live close when present, sample otherwise.
    pub fn effective_price(&self, live: Option<&Quote>) -> Decimal {
        live.map_or(self.last_price, |q| q.close)
    }

    /// Market value at the effective price.
    pub fn market_value(&self, live: Option<&Quote>) -> Decimal {
        self.shares * self.effective_price(live)
    }

    /// Total cost of the position.
    pub fn cost_basis(&self) -> Decimal {
        self.shares * self.avg_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn position() -> Position {
        Position {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            category: "Technology".to_string(),
            shares: dec!(10),
            avg_cost: dec!(120.00),
            last_price: dec!(150.00),
        }
    }

    #[test]
    fn test_market_value_without_live_quote() {
        let pos = position();
        assert_eq!(pos.market_value(None), dec!(1500.00));
        assert_eq!(pos.cost_basis(), dec!(1200.00));
    }

    #[test]
    fn test_live_close_takes_precedence() {
        let pos = position();
        let quote = Quote::ohlcv(
            "AAPL".to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            dec!(150.00),
            dec!(152.00),
            dec!(149.50),
            dec!(151.25),
            1_000_000,
        );
        assert_eq!(pos.effective_price(Some(&quote)), dec!(151.25));
        assert_eq!(pos.market_value(Some(&quote)), dec!(1512.50));
    }
}
