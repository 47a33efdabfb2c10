//! FolioWatch Core Crate
//!
//! Domain layer for the dashboard: the session quote store, the sample
//! portfolio with its summary roll-ups, the screening filter record, and
//! the projection series. Everything here is in-memory and dies with the
//! process; fetching lives in `foliowatch-market-data` and rendering in the
//! terminal app.

pub mod constants;
pub mod portfolio;
pub mod projection;
pub mod quotes;
pub mod screener;

pub use portfolio::{sample_positions, screener_universe, PortfolioSummary, Position};
pub use projection::{project, ProjectionInputs, ProjectionPoint};
pub use quotes::QuoteStore;
pub use screener::{ScreenerRow, ScreeningFilters};
