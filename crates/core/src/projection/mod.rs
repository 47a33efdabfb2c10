//! Savings projection series for the projection chart.
//!
//! Monthly-compounded growth with a fixed monthly contribution, sampled at
//! year boundaries. All math in `Decimal`; the chart converts to `f64` only
//! at render time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Assumptions behind a projection run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Starting balance
    pub initial: Decimal,
    /// Contribution added at the end of each month
    pub monthly_contribution: Decimal,
    /// Assumed annual return, in percent
    pub annual_return_pct: Decimal,
    /// Projection horizon in years
    pub years: u32,
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            initial: Decimal::new(10_000, 0),
            monthly_contribution: Decimal::new(500, 0),
            annual_return_pct: Decimal::new(7, 0),
            years: 20,
        }
    }
}

/// Projected balance at the end of one year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: Decimal,
}

/// Compute the projection series, one point per year.
///
/// Year 0 carries the starting balance; each month the balance grows by the
/// monthly rate and receives the contribution.
pub fn project(inputs: &ProjectionInputs) -> Vec<ProjectionPoint> {
    let monthly_rate =
        inputs.annual_return_pct / Decimal::ONE_HUNDRED / Decimal::from(12u32);

    let mut points = Vec::with_capacity(inputs.years as usize + 1);
    points.push(ProjectionPoint {
        year: 0,
        value: inputs.initial,
    });

    let mut balance = inputs.initial;
    for year in 1..=inputs.years {
        for _ in 0..12 {
            balance += balance * monthly_rate;
            balance += inputs.monthly_contribution;
        }
        points.push(ProjectionPoint {
            year,
            value: balance.round_dp(2),
        });
        balance = balance.round_dp(8);
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_return_accumulates_contributions() {
        let inputs = ProjectionInputs {
            initial: dec!(1000),
            monthly_contribution: dec!(100),
            annual_return_pct: dec!(0),
            years: 2,
        };
        let points = project(&inputs);

        assert_eq!(points.len(), 3);
        assert_eq!(points[0], ProjectionPoint { year: 0, value: dec!(1000) });
        assert_eq!(points[1].value, dec!(2200));
        assert_eq!(points[2].value, dec!(3400));
    }

    #[test]
    fn test_compounding_without_contributions() {
        let inputs = ProjectionInputs {
            initial: dec!(10000),
            monthly_contribution: dec!(0),
            annual_return_pct: dec!(12),
            years: 1,
        };
        let points = project(&inputs);

        // 1% monthly over 12 months: 10000 * 1.01^12 = 11268.25
        assert_eq!(points[1].value, dec!(11268.25));
    }

    #[test]
    fn test_series_is_monotonic_for_positive_inputs() {
        let points = project(&ProjectionInputs::default());
        assert_eq!(points.len(), 21);
        for window in points.windows(2) {
            assert!(window[1].value > window[0].value);
        }
    }

    #[test]
    fn test_zero_years() {
        let inputs = ProjectionInputs {
            years: 0,
            ..ProjectionInputs::default()
        };
        let points = project(&inputs);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].year, 0);
    }
}
