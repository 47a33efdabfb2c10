//! Application state and event loop.
//!
//! All UI state here is ephemeral: the active tab, which holdings cards are
//! expanded, the display density, the screener form, the symbol prompt, and
//! the transient status line. Everything is discarded when the process
//! exits. The loop is the single writer to the quote store; fetch results
//! arrive over a channel and are merged one entry at a time.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use rust_decimal::Decimal;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use foliowatch_core::screener::{parse_bound, FilterParseError, ScreeningFilters};
use foliowatch_core::{
    sample_positions, screener_universe, ProjectionInputs, Position, QuoteStore, ScreenerRow,
};
use foliowatch_market_data::QuoteProvider;

use crate::fetch::{self, FetchMessage};
use crate::views;

const STATUS_TTL: Duration = Duration::from_secs(5);
const TICK: Duration = Duration::from_millis(100);

/// Top-level views of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Summary,
    Holdings,
    Screener,
    Projection,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Summary => "Summary",
            Tab::Holdings => "Holdings",
            Tab::Screener => "Screener",
            Tab::Projection => "Projection",
        }
    }

    pub fn all() -> &'static [Tab] {
        &[Tab::Summary, Tab::Holdings, Tab::Screener, Tab::Projection]
    }

    pub fn index(self) -> usize {
        Self::all().iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    fn prev(self) -> Tab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Row density of the holdings tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Density {
    Comfortable,
    Compact,
}

impl Density {
    fn toggle(self) -> Density {
        match self {
            Density::Comfortable => Density::Compact,
            Density::Compact => Density::Comfortable,
        }
    }
}

/// Editable fields of the screener form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Sector,
    PriceMin,
    PriceMax,
    YieldMin,
    YieldMax,
    PeMin,
    PeMax,
    PbMin,
    PbMax,
    CapMin,
    CapMax,
}

impl FilterField {
    pub const ALL: [FilterField; 11] = [
        FilterField::Sector,
        FilterField::PriceMin,
        FilterField::PriceMax,
        FilterField::YieldMin,
        FilterField::YieldMax,
        FilterField::PeMin,
        FilterField::PeMax,
        FilterField::PbMin,
        FilterField::PbMax,
        FilterField::CapMin,
        FilterField::CapMax,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Sector => "Sector",
            FilterField::PriceMin => "Price min",
            FilterField::PriceMax => "Price max",
            FilterField::YieldMin => "Yield % min",
            FilterField::YieldMax => "Yield % max",
            FilterField::PeMin => "P/E min",
            FilterField::PeMax => "P/E max",
            FilterField::PbMin => "P/B min",
            FilterField::PbMax => "P/B max",
            FilterField::CapMin => "Mkt cap min (B)",
            FilterField::CapMax => "Mkt cap max (B)",
        }
    }

    /// Current value rendered as form text.
    pub fn get(self, filters: &ScreeningFilters) -> String {
        fn bound(b: Option<Decimal>) -> String {
            b.map(|d| d.to_string()).unwrap_or_default()
        }
        match self {
            FilterField::Sector => filters.sector.clone().unwrap_or_default(),
            FilterField::PriceMin => bound(filters.price.min),
            FilterField::PriceMax => bound(filters.price.max),
            FilterField::YieldMin => bound(filters.dividend_yield.min),
            FilterField::YieldMax => bound(filters.dividend_yield.max),
            FilterField::PeMin => bound(filters.pe_ratio.min),
            FilterField::PeMax => bound(filters.pe_ratio.max),
            FilterField::PbMin => bound(filters.pb_ratio.min),
            FilterField::PbMax => bound(filters.pb_ratio.max),
            FilterField::CapMin => bound(filters.market_cap.min),
            FilterField::CapMax => bound(filters.market_cap.max),
        }
    }

    /// Commit form text into the filter record.
    pub fn set(self, filters: &mut ScreeningFilters, raw: &str) -> Result<(), FilterParseError> {
        if self == FilterField::Sector {
            let trimmed = raw.trim();
            filters.sector = (!trimmed.is_empty()).then(|| trimmed.to_string());
            return Ok(());
        }
        let value = parse_bound(raw)?;
        match self {
            FilterField::Sector => unreachable!(),
            FilterField::PriceMin => filters.price.min = value,
            FilterField::PriceMax => filters.price.max = value,
            FilterField::YieldMin => filters.dividend_yield.min = value,
            FilterField::YieldMax => filters.dividend_yield.max = value,
            FilterField::PeMin => filters.pe_ratio.min = value,
            FilterField::PeMax => filters.pe_ratio.max = value,
            FilterField::PbMin => filters.pb_ratio.min = value,
            FilterField::PbMax => filters.pb_ratio.max = value,
            FilterField::CapMin => filters.market_cap.min = value,
            FilterField::CapMax => filters.market_cap.max = value,
        }
        Ok(())
    }
}

/// Screener form state.
#[derive(Debug)]
pub struct ScreenerForm {
    pub visible: bool,
    pub selected: usize,
    pub editing: bool,
    pub buffer: String,
}

impl Default for ScreenerForm {
    fn default() -> Self {
        Self {
            visible: true,
            selected: 0,
            editing: false,
            buffer: String::new(),
        }
    }
}

/// Transient status line shown at the bottom of the screen.
#[derive(Debug)]
pub struct StatusLine {
    pub message: String,
    set_at: Instant,
}

impl StatusLine {
    fn new(message: String) -> Self {
        Self {
            message,
            set_at: Instant::now(),
        }
    }
}

pub struct App {
    pub tab: Tab,
    pub positions: Vec<Position>,
    pub universe: Vec<ScreenerRow>,
    pub quotes: QuoteStore,
    pub expanded: HashSet<String>,
    pub selected_category: usize,
    pub density: Density,
    pub filters: ScreeningFilters,
    pub form: ScreenerForm,
    pub projection: ProjectionInputs,
    /// `Some` while the symbol prompt is open; holds the typed symbol
    pub symbol_prompt: Option<String>,
    pub status: Option<StatusLine>,
    pub batch_in_flight: bool,
    pub should_quit: bool,
    runtime: Handle,
    provider: Arc<dyn QuoteProvider>,
    tx: UnboundedSender<FetchMessage>,
    rx: UnboundedReceiver<FetchMessage>,
}

impl App {
    pub fn new(runtime: Handle, provider: Arc<dyn QuoteProvider>) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            tab: Tab::Summary,
            positions: sample_positions(),
            universe: screener_universe(),
            quotes: QuoteStore::new(),
            expanded: HashSet::new(),
            selected_category: 0,
            density: Density::Comfortable,
            filters: ScreeningFilters::default(),
            form: ScreenerForm::default(),
            projection: ProjectionInputs::default(),
            symbol_prompt: None,
            status: None,
            batch_in_flight: false,
            should_quit: false,
            runtime,
            provider,
            tx,
            rx,
        }
    }

    /// Display categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for pos in &self.positions {
            if !seen.contains(&pos.category) {
                seen.push(pos.category.clone());
            }
        }
        seen
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.drain_messages();
            self.expire_status();
            terminal.draw(|frame| views::render(frame, self))?;
            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Merge pending fetch results into the quote store.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                FetchMessage::Quote { symbol, result } => match result {
                    Ok(Some(quote)) => {
                        self.set_status(format!(
                            "{}: {} ({})",
                            quote.symbol, quote.close, quote.date
                        ));
                        self.quotes.upsert(quote);
                    }
                    // no daily series at all: silent no-op
                    Ok(None) => {}
                    Err(error) => self.set_status(fetch::status_for_error(&symbol, &error)),
                },
                FetchMessage::BatchDone => {
                    self.batch_in_flight = false;
                }
            }
        }
    }

    fn expire_status(&mut self) {
        if let Some(ref status) = self.status {
            if status.set_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(StatusLine::new(message));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.symbol_prompt.is_some() {
            self.handle_prompt_key(key.code);
            return;
        }
        if self.tab == Tab::Screener && self.form.editing {
            self.handle_form_edit_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char('1') => self.tab = Tab::Summary,
            KeyCode::Char('2') => self.tab = Tab::Holdings,
            KeyCode::Char('3') => self.tab = Tab::Screener,
            KeyCode::Char('4') => self.tab = Tab::Projection,
            KeyCode::Char('/') => self.symbol_prompt = Some(String::new()),
            KeyCode::Char('r') => self.refresh_watchlist(),
            _ => match self.tab {
                Tab::Summary => {}
                Tab::Holdings => self.handle_holdings_key(key.code),
                Tab::Screener => self.handle_screener_key(key.code),
                Tab::Projection => self.handle_projection_key(key.code),
            },
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Some(buffer) = self.symbol_prompt.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.symbol_prompt = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == '.' || c == '-' => {
                buffer.push(c.to_ascii_uppercase());
            }
            KeyCode::Enter => {
                let symbol = buffer.trim().to_string();
                self.symbol_prompt = None;
                if !symbol.is_empty() {
                    self.fetch_symbol(symbol);
                }
            }
            _ => {}
        }
    }

    fn handle_holdings_key(&mut self, code: KeyCode) {
        let categories = self.categories();
        match code {
            KeyCode::Up => {
                self.selected_category = self.selected_category.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_category + 1 < categories.len() {
                    self.selected_category += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(category) = categories.get(self.selected_category) {
                    if !self.expanded.remove(category) {
                        self.expanded.insert(category.clone());
                    }
                }
            }
            KeyCode::Char('d') => self.density = self.density.toggle(),
            _ => {}
        }
    }

    fn handle_screener_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('f') => self.form.visible = !self.form.visible,
            KeyCode::Char('c') => {
                self.filters.reset();
                self.set_status("Filters cleared".to_string());
            }
            KeyCode::Up if self.form.visible => {
                self.form.selected = self.form.selected.saturating_sub(1);
            }
            KeyCode::Down if self.form.visible => {
                if self.form.selected + 1 < FilterField::ALL.len() {
                    self.form.selected += 1;
                }
            }
            KeyCode::Enter if self.form.visible => {
                let field = FilterField::ALL[self.form.selected];
                self.form.buffer = field.get(&self.filters);
                self.form.editing = true;
            }
            _ => {}
        }
    }

    fn handle_form_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form.editing = false;
                self.form.buffer.clear();
            }
            KeyCode::Backspace => {
                self.form.buffer.pop();
            }
            KeyCode::Char(c) => self.form.buffer.push(c),
            KeyCode::Enter => {
                let field = FilterField::ALL[self.form.selected];
                match field.set(&mut self.filters, &self.form.buffer) {
                    Ok(()) => {
                        self.form.editing = false;
                        self.form.buffer.clear();
                    }
                    Err(error) => self.set_status(error.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_projection_key(&mut self, code: KeyCode) {
        let inputs = &mut self.projection;
        match code {
            KeyCode::Left => inputs.years = inputs.years.saturating_sub(1).max(1),
            KeyCode::Right => inputs.years = (inputs.years + 1).min(40),
            KeyCode::Up => {
                inputs.annual_return_pct =
                    (inputs.annual_return_pct + Decimal::new(5, 1)).min(Decimal::new(15, 0));
            }
            KeyCode::Down => {
                inputs.annual_return_pct = (inputs.annual_return_pct - Decimal::new(5, 1))
                    .max(Decimal::ZERO);
            }
            KeyCode::Char('+') => {
                inputs.monthly_contribution += Decimal::new(50, 0);
            }
            KeyCode::Char('-') => {
                inputs.monthly_contribution = (inputs.monthly_contribution
                    - Decimal::new(50, 0))
                .max(Decimal::ZERO);
            }
            _ => {}
        }
    }

    fn refresh_watchlist(&mut self) {
        if self.batch_in_flight {
            return;
        }
        self.batch_in_flight = true;
        self.set_status("Refreshing watchlist...".to_string());
        fetch::spawn_watchlist(&self.runtime, self.provider.clone(), self.tx.clone());
    }

    fn fetch_symbol(&mut self, symbol: String) {
        self.set_status(format!("Fetching {}...", symbol));
        fetch::spawn_single(&self.runtime, self.provider.clone(), symbol, self.tx.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use foliowatch_market_data::{MarketDataError, Quote};
    use rust_decimal_macros::dec;

    struct NoopProvider;

    #[async_trait]
    impl QuoteProvider for NoopProvider {
        fn id(&self) -> &'static str {
            "NOOP"
        }

        async fn fetch_daily(&self, _symbol: &str) -> Result<Option<Quote>, MarketDataError> {
            Ok(None)
        }
    }

    fn app(runtime: &tokio::runtime::Runtime) -> App {
        App::new(runtime.handle().clone(), Arc::new(NoopProvider))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn quote(symbol: &str) -> Quote {
        Quote::ohlcv(
            symbol.to_string(),
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            dec!(150.00),
            dec!(152.00),
            dec!(149.50),
            dec!(151.25),
            1_000_000,
        )
    }

    #[test]
    fn test_tab_cycling() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        assert_eq!(app.tab, Tab::Summary);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Holdings);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Summary);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Projection);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Screener);
    }

    #[test]
    fn test_symbol_prompt_uppercases_and_fetches() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.symbol_prompt.as_deref(), Some(""));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Char('!'));
        assert_eq!(app.symbol_prompt.as_deref(), Some("AB"));
        press(&mut app, KeyCode::Enter);
        assert!(app.symbol_prompt.is_none());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_holdings_expand_and_density() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Char('2'));

        let first = app.categories()[0].clone();
        press(&mut app, KeyCode::Enter);
        assert!(app.expanded.contains(&first));
        press(&mut app, KeyCode::Enter);
        assert!(!app.expanded.contains(&first));

        assert_eq!(app.density, Density::Comfortable);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.density, Density::Compact);
    }

    #[test]
    fn test_screener_form_commit_and_invalid_input() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Char('3'));

        // select "Price min" and commit a value
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.form.editing);
        for c in "120".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(!app.form.editing);
        assert_eq!(app.filters.price.min, Some(dec!(120)));

        // invalid input keeps the form in edit mode and reports an error
        press(&mut app, KeyCode::Enter);
        for c in "xx".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.form.editing);
        assert!(app.status.is_some());
    }

    #[test]
    fn test_drain_merges_quotes_and_skips_no_data() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);

        app.tx
            .send(FetchMessage::Quote {
                symbol: "AAPL".to_string(),
                result: Ok(Some(quote("AAPL"))),
            })
            .unwrap();
        app.tx
            .send(FetchMessage::Quote {
                symbol: "MSFT".to_string(),
                result: Ok(None),
            })
            .unwrap();
        app.tx
            .send(FetchMessage::Quote {
                symbol: "BOGUS".to_string(),
                result: Err(MarketDataError::SymbolNotFound("BOGUS".to_string())),
            })
            .unwrap();
        app.tx.send(FetchMessage::BatchDone).unwrap();
        app.batch_in_flight = true;

        app.drain_messages();

        assert_eq!(app.quotes.len(), 1);
        assert_eq!(app.quotes.get("AAPL").unwrap().close, dec!(151.25));
        assert!(app.quotes.get("MSFT").is_none());
        assert!(!app.batch_in_flight);
        assert_eq!(
            app.status.unwrap().message,
            "BOGUS: symbol not found"
        );
    }

    #[test]
    fn test_projection_key_bounds() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut app = app(&rt);
        press(&mut app, KeyCode::Char('4'));

        app.projection.years = 1;
        press(&mut app, KeyCode::Left);
        assert_eq!(app.projection.years, 1);

        app.projection.annual_return_pct = dec!(0);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.projection.annual_return_pct, dec!(0));

        press(&mut app, KeyCode::Up);
        assert_eq!(app.projection.annual_return_pct, dec!(0.5));
    }
}
