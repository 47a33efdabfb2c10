//! Screening filters.
//!
//! A record of optional bounds edited by the screener form. The filter set
//! is purely local: it is matched against the bundled screener universe and
//! is never sent anywhere or validated against live data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Raised when a form field doesn't parse as a number.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("Not a number: {0}")]
    InvalidNumber(String),
}

/// Parse a bound from form text. Blank input clears the bound.
pub fn parse_bound(raw: &str) -> Result<Option<Decimal>, FilterParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .map(Some)
        .map_err(|_| FilterParseError::InvalidNumber(trimmed.to_string()))
}

/// An optional inclusive numeric range.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl Range {
    /// Whether the value satisfies both bounds. An unset bound always passes.
    pub fn contains(&self, value: Decimal) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// One row of the screener universe.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScreenerRow {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: Decimal,
    /// Dividend yield in percent
    pub dividend_yield: Decimal,
    pub pe_ratio: Option<Decimal>,
    pub pb_ratio: Option<Decimal>,
    /// Market capitalization in billions
    pub market_cap: Decimal,
}

/// The user-edited filter record.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ScreeningFilters {
    /// Case-insensitive sector match; `None` matches every sector
    pub sector: Option<String>,
    pub price: Range,
    pub dividend_yield: Range,
    pub pe_ratio: Range,
    pub pb_ratio: Range,
    pub market_cap: Range,
}

impl ScreeningFilters {
    /// Clear every bound.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.sector.is_none()
            && self.price.is_unbounded()
            && self.dividend_yield.is_unbounded()
            && self.pe_ratio.is_unbounded()
            && self.pb_ratio.is_unbounded()
            && self.market_cap.is_unbounded()
    }

    /// Whether a row passes every active filter.
    ///
    /// A ratio filter excludes rows that don't report that ratio.
    pub fn matches(&self, row: &ScreenerRow) -> bool {
        if let Some(ref sector) = self.sector {
            if !row.sector.eq_ignore_ascii_case(sector.trim()) {
                return false;
            }
        }
        if !self.price.contains(row.price) {
            return false;
        }
        if !self.dividend_yield.contains(row.dividend_yield) {
            return false;
        }
        if !self.pe_ratio.is_unbounded() {
            match row.pe_ratio {
                Some(pe) if self.pe_ratio.contains(pe) => {}
                _ => return false,
            }
        }
        if !self.pb_ratio.is_unbounded() {
            match row.pb_ratio {
                Some(pb) if self.pb_ratio.contains(pb) => {}
                _ => return false,
            }
        }
        self.market_cap.contains(row.market_cap)
    }
}
