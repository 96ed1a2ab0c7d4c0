pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::alert;
use crate::config::normalize_symbol;
use crate::error::QuoteError;
use crate::event::{AppEvent, LogLevel, LogRecord};
use crate::model::history::{HistoryEntry, HistoryWindow};
use crate::model::quote::{PriceDirection, Quote};
use crate::notify::Notification;

use chart::PriceChart;
use dashboard::{
    AlertPanel, ErrorPanel, HistoryTable, KeybindBar, LogPanel, PriceCard, StatusBar, TickerInput,
};

const MAX_LOG_MESSAGES: usize = 200;

/// What the price card area shows. A quote and an error never coexist.
#[derive(Debug, Clone, PartialEq)]
pub enum Display {
    Empty,
    Quote(Quote),
    Error(QuoteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditTicker,
    EditAlert,
}

pub struct AppState {
    pub default_symbol: String,
    pub tracked_symbol: String,
    /// Poll cadence whose results are accepted.
    pub generation: Option<u64>,
    pub polling: bool,
    pub in_flight: usize,
    pub display: Display,
    pub history: HistoryWindow,
    pub alert_target: Option<String>,
    pub fetch_ok_count: u64,
    pub fetch_fail_count: u64,
    pub last_notification: Option<Notification>,
    pub log_messages: Vec<LogRecord>,
    pub input_mode: InputMode,
    pub ticker_input: String,
}

impl AppState {
    pub fn new(default_symbol: &str) -> Self {
        let default_symbol = normalize_symbol(default_symbol);
        Self {
            tracked_symbol: default_symbol.clone(),
            default_symbol,
            generation: None,
            polling: false,
            in_flight: 0,
            display: Display::Empty,
            history: HistoryWindow::default(),
            alert_target: None,
            fetch_ok_count: 0,
            fetch_fail_count: 0,
            last_notification: None,
            log_messages: Vec::new(),
            input_mode: InputMode::Normal,
            ticker_input: String::new(),
        }
    }

    pub fn push_log(&mut self, record: LogRecord) {
        self.log_messages.push(record);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_loading() {
            "Syncing..."
        } else {
            "Live"
        }
    }

    pub fn quote(&self) -> Option<&Quote> {
        match &self.display {
            Display::Quote(q) => Some(q),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&QuoteError> {
        match &self.display {
            Display::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Direction of the displayed quote; defaults to up before the first one.
    pub fn direction(&self) -> PriceDirection {
        self.quote()
            .map(Quote::direction)
            .unwrap_or(PriceDirection::Up)
    }

    /// Results are applied only for the current cadence and the symbol the
    /// user currently tracks.
    fn is_current(&self, symbol: &str, generation: u64) -> bool {
        self.generation == Some(generation) && symbol == self.tracked_symbol
    }

    /// A start for a symbol the user has since moved away from is ignored;
    /// the poller reports the newer symbol next.
    pub fn on_polling_started(&mut self, symbol: &str, generation: u64) {
        let symbol = normalize_symbol(symbol);
        if symbol != self.tracked_symbol {
            tracing::debug!(symbol = %symbol, generation, "Ignoring superseded polling start");
            return;
        }
        self.generation = Some(generation);
        self.polling = true;
        self.in_flight = 0;
        self.push_log(LogRecord::new(
            LogLevel::Info,
            "poll.start",
            format!("Tracking {}", self.tracked_symbol),
        ));
    }

    pub fn on_polling_stopped(&mut self) {
        self.polling = false;
        self.generation = None;
        self.in_flight = 0;
        self.push_log(LogRecord::new(LogLevel::Info, "poll.stop", "Polling stopped"));
    }

    pub fn on_fetch_started(&mut self, symbol: &str, generation: u64) {
        if self.is_current(symbol, generation) {
            self.in_flight += 1;
        }
    }

    fn settle(&mut self, symbol: &str, generation: u64) -> bool {
        if !self.is_current(symbol, generation) {
            tracing::debug!(symbol, generation, "Discarding stale fetch result");
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        true
    }

    /// Applies a fresh quote and returns the alert notification to dispatch,
    /// if the target was reached.
    pub fn on_fetch_succeeded(&mut self, quote: Quote, generation: u64) -> Option<Notification> {
        if !self.settle(&quote.ticker, generation) {
            return None;
        }
        self.fetch_ok_count += 1;
        self.history.push(HistoryEntry::from(&quote));

        let decision = alert::evaluate(&quote, self.alert_target.as_deref());
        let notification = match (decision.should_notify, self.alert_target.as_deref()) {
            (true, Some(target)) => Some(alert::alert_notification(
                &quote.ticker,
                target,
                quote.price,
            )),
            _ => None,
        };
        self.alert_target = decision.cleared_target;
        if let Some(n) = &notification {
            self.push_log(LogRecord::new(LogLevel::Info, "alert.fired", n.body.clone()));
        }

        self.display = Display::Quote(quote);
        notification
    }

    pub fn on_fetch_failed(&mut self, symbol: &str, error: QuoteError, generation: u64) {
        if !self.settle(symbol, generation) {
            return;
        }
        self.fetch_fail_count += 1;
        let level = if error.is_not_found() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        };
        self.push_log(LogRecord::new(level, "quote.fetch.fail", error.to_string()));
        self.display = Display::Error(error);
    }

    /// Request a new tracked symbol. Returns the normalized symbol when it
    /// differs from the current one; the caller hands it to the poller.
    pub fn set_tracked_symbol(&mut self, raw: &str) -> Option<String> {
        let symbol = normalize_symbol(raw);
        if symbol.is_empty() || symbol == self.tracked_symbol {
            return None;
        }
        self.tracked_symbol = symbol.clone();
        // In-flight fetches for the old symbol will be discarded on arrival.
        self.in_flight = 0;
        Some(symbol)
    }

    /// Live update from the alert field. Blank text clears the target.
    pub fn set_alert_target(&mut self, text: &str) {
        self.alert_target = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
    }

    /// Recovery for a not-found ticker: back to the default symbol, error
    /// cleared. Returns the symbol to track, or `None` if nothing to recover.
    pub fn recover_from_not_found(&mut self) -> Option<String> {
        if !self.error().is_some_and(QuoteError::is_not_found) {
            return None;
        }
        self.display = Display::Empty;
        let default_symbol = self.default_symbol.clone();
        self.set_tracked_symbol(&default_symbol);
        self.push_log(LogRecord::new(
            LogLevel::Info,
            "symbol.reset",
            format!("Reset to {}", default_symbol),
        ));
        Some(default_symbol)
    }

    pub fn record_notification(&mut self, notification: Notification) {
        self.last_notification = Some(notification);
    }

    pub fn apply(&mut self, event: AppEvent) -> Option<Notification> {
        match event {
            AppEvent::PollingStarted { symbol, generation } => {
                self.on_polling_started(&symbol, generation);
            }
            AppEvent::PollingStopped => {
                self.on_polling_stopped();
            }
            AppEvent::FetchStarted { symbol, generation } => {
                self.on_fetch_started(&symbol, generation);
            }
            AppEvent::QuoteFetched {
                symbol,
                generation,
                result,
            } => match result {
                Ok(quote) => return self.on_fetch_succeeded(quote, generation),
                Err(e) => self.on_fetch_failed(&symbol, e, generation),
            },
        }
        None
    }
}

/// User-facing text for a failed fetch, plus the recovery hint if any.
pub fn error_message(error: &QuoteError, default_symbol: &str) -> (String, Option<String>) {
    match error {
        QuoteError::NotFound { symbol } => (
            format!("Ticker \"{}\" not found.", symbol),
            Some(format!("Press [R] to reset to {}", default_symbol)),
        ),
        QuoteError::Network(_) => (
            "Unable to reach quote service. Retrying on next poll.".to_string(),
            None,
        ),
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // card + chart | history
            Constraint::Length(4), // alert
            Constraint::Length(3), // ticker input
            Constraint::Length(5), // log
            Constraint::Length(1), // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            symbol: &state.tracked_symbol,
            status: state.status_label(),
            loading: state.is_loading(),
            polling: state.polling,
            fetch_ok: state.fetch_ok_count,
            fetch_fail: state.fetch_fail_count,
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(36)])
        .split(outer[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(4)])
        .split(main_area[0]);

    match &state.display {
        Display::Error(error) => {
            let (message, hint) = error_message(error, &state.default_symbol);
            frame.render_widget(ErrorPanel::new(&message, hint.as_deref()), left[0]);
        }
        Display::Quote(quote) => {
            frame.render_widget(PriceCard::new(Some(quote)), left[0]);
        }
        Display::Empty => {
            frame.render_widget(PriceCard::new(None), left[0]);
        }
    }

    let prices = state.history.prices();
    frame.render_widget(
        PriceChart::new(&prices, &state.tracked_symbol).direction(state.direction()),
        left[1],
    );

    frame.render_widget(
        HistoryTable::new(&state.history, state.direction()),
        main_area[1],
    );

    frame.render_widget(
        AlertPanel {
            target: state.alert_target.as_deref(),
            editing: state.input_mode == InputMode::EditAlert,
            last_notification: state.last_notification.as_ref(),
        },
        outer[2],
    );

    frame.render_widget(
        TickerInput {
            value: &state.ticker_input,
            editing: state.input_mode == InputMode::EditTicker,
        },
        outer[3],
    );

    frame.render_widget(LogPanel::new(&state.log_messages), outer[4]);

    frame.render_widget(KeybindBar { mode: state.input_mode }, outer[5]);
}
