//! Portfolio positions and summary roll-ups.

mod model;
mod sample;
mod summary;

pub use model::Position;
pub use sample::{sample_positions, screener_universe};
pub use summary::{CategoryBreakdown, PortfolioSummary};
