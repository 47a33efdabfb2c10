//! Portfolio summary computation.
//!
//! Merges the static sample positions with whatever live quotes have been
//! fetched this session and rolls them up into the totals shown by the
//! summary view and the per-category cards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::Position;
use crate::quotes::QuoteStore;

/// Roll-up for one display category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub gain: Decimal,
    pub positions: usize,
}

/// Portfolio-wide totals plus per-category breakdowns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub market_value: Decimal,
    pub cost_basis: Decimal,
    pub gain: Decimal,
    /// Gain as a percentage of cost; `None` when cost is zero
    pub gain_pct: Option<Decimal>,
    /// Breakdowns in first-seen category order
    pub categories: Vec<CategoryBreakdown>,
}

impl PortfolioSummary {
    /// Compute totals over the positions, using live closes where available.
    pub fn compute(positions: &[Position], quotes: &QuoteStore) -> Self {
        let mut categories: Vec<CategoryBreakdown> = Vec::new();

        for pos in positions {
            let live = quotes.get(&pos.symbol);
            let value = pos.market_value(live);
            let cost = pos.cost_basis();

            let entry = match categories.iter_mut().find(|c| c.category == pos.category) {
                Some(entry) => entry,
                None => {
                    categories.push(CategoryBreakdown {
                        category: pos.category.clone(),
                        market_value: Decimal::ZERO,
                        cost_basis: Decimal::ZERO,
                        gain: Decimal::ZERO,
                        positions: 0,
                    });
                    categories.last_mut().unwrap()
                }
            };
            entry.market_value += value;
            entry.cost_basis += cost;
            entry.gain = entry.market_value - entry.cost_basis;
            entry.positions += 1;
        }

        let market_value: Decimal = categories.iter().map(|c| c.market_value).sum();
        let cost_basis: Decimal = categories.iter().map(|c| c.cost_basis).sum();
        let gain = market_value - cost_basis;
        let gain_pct = if cost_basis.is_zero() {
            None
        } else {
            Some(gain / cost_basis * Decimal::ONE_HUNDRED)
        };

        Self {
            market_value,
            cost_basis,
            gain,
            gain_pct,
            categories,
        }
    }
}
