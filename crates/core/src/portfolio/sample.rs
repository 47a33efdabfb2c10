//! Bundled sample data.
//!
//! The dashboard ships with a static sample portfolio and a static screener
//! universe; live quotes are layered on top at display time.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::portfolio::Position;
use crate::screener::ScreenerRow;

fn position(
    symbol: &str,
    name: &str,
    category: &str,
    shares: Decimal,
    avg_cost: Decimal,
    last_price: Decimal,
) -> Position {
    Position {
        symbol: symbol.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        shares,
        avg_cost,
        last_price,
    }
}

/// The static sample portfolio, grouped into display categories.
pub fn sample_positions() -> Vec<Position> {
    vec![
        position("AAPL", "Apple Inc.", "Technology", dec!(12), dec!(132.40), dec!(151.25)),
        position("MSFT", "Microsoft Corp.", "Technology", dec!(6), dec!(305.10), dec!(394.80)),
        position("GOOGL", "Alphabet Inc.", "Technology", dec!(8), dec!(118.75), dec!(141.30)),
        position("AMZN", "Amazon.com Inc.", "Consumer", dec!(10), dec!(128.60), dec!(155.20)),
        position("COST", "Costco Wholesale", "Consumer", dec!(3), dec!(498.00), dec!(612.45)),
        position("JNJ", "Johnson & Johnson", "Healthcare", dec!(9), dec!(162.30), dec!(156.70)),
        position("UNH", "UnitedHealth Group", "Healthcare", dec!(2), dec!(465.90), dec!(527.30)),
        position("JPM", "JPMorgan Chase", "Financials", dec!(7), dec!(142.15), dec!(172.60)),
        position("V", "Visa Inc.", "Financials", dec!(5), dec!(218.40), dec!(262.10)),
    ]
}

#[allow(clippy::too_many_arguments)]
fn row(
    symbol: &str,
    name: &str,
    sector: &str,
    price: Decimal,
    dividend_yield: Decimal,
    pe_ratio: Option<Decimal>,
    pb_ratio: Option<Decimal>,
    market_cap: Decimal,
) -> ScreenerRow {
    ScreenerRow {
        symbol: symbol.to_string(),
        name: name.to_string(),
        sector: sector.to_string(),
        price,
        dividend_yield,
        pe_ratio,
        pb_ratio,
        market_cap,
    }
}

/// The static universe the screener form filters.
pub fn screener_universe() -> Vec<ScreenerRow> {
    vec![
        row("AAPL", "Apple Inc.", "Technology", dec!(151.25), dec!(0.55), Some(dec!(28.4)), Some(dec!(35.1)), dec!(2400)),
        row("MSFT", "Microsoft Corp.", "Technology", dec!(394.80), dec!(0.76), Some(dec!(34.2)), Some(dec!(12.8)), dec!(2930)),
        row("GOOGL", "Alphabet Inc.", "Technology", dec!(141.30), dec!(0.00), Some(dec!(24.1)), Some(dec!(6.2)), dec!(1780)),
        row("AMZN", "Amazon.com Inc.", "Consumer", dec!(155.20), dec!(0.00), Some(dec!(59.7)), Some(dec!(8.3)), dec!(1600)),
        row("COST", "Costco Wholesale", "Consumer", dec!(612.45), dec!(0.67), Some(dec!(43.5)), Some(dec!(10.9)), dec!(272)),
        row("KO", "Coca-Cola Co.", "Consumer", dec!(59.80), dec!(3.08), Some(dec!(23.6)), Some(dec!(9.9)), dec!(258)),
        row("JNJ", "Johnson & Johnson", "Healthcare", dec!(156.70), dec!(3.04), Some(dec!(15.2)), Some(dec!(5.3)), dec!(377)),
        row("UNH", "UnitedHealth Group", "Healthcare", dec!(527.30), dec!(1.41), Some(dec!(20.8)), Some(dec!(5.6)), dec!(487)),
        row("JPM", "JPMorgan Chase", "Financials", dec!(172.60), dec!(2.43), Some(dec!(11.2)), Some(dec!(1.7)), dec!(497)),
        row("V", "Visa Inc.", "Financials", dec!(262.10), dec!(0.79), Some(dec!(30.5)), Some(dec!(13.4)), dec!(538)),
        row("XOM", "Exxon Mobil", "Energy", dec!(104.20), dec!(3.65), Some(dec!(10.3)), Some(dec!(2.1)), dec!(416)),
        row("NEE", "NextEra Energy", "Utilities", dec!(58.90), dec!(3.48), None, Some(dec!(2.6)), dec!(121)),
    ]
}
