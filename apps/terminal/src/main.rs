//! FolioWatch terminal dashboard.
//!
//! A session-local portfolio dashboard: summary totals with a live
//! watchlist, per-category holdings cards, a screening filter form, and a
//! savings projection chart. Quotes come from Alpha Vantage via
//! `foliowatch-market-data`; nothing is persisted across runs.

mod app;
mod fetch;
mod logging;
mod views;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::warn;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use foliowatch_market_data::{AlphaVantageConfig, AlphaVantageProvider, QuoteProvider};

use app::App;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let api_key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        // not fatal: the request is attempted and fails at the provider
        warn!("ALPHA_VANTAGE_API_KEY is not set; quote fetches will fail");
    }
    let provider: Arc<dyn QuoteProvider> = Arc::new(AlphaVantageProvider::new(
        AlphaVantageConfig::with_api_key(api_key),
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(runtime.handle().clone(), provider);
    let result = app.run(&mut terminal);

    // restore the terminal even when the loop errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
