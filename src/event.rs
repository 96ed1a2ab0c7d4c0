use crate::error::QuoteError;
use crate::model::quote::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    /// Stable dotted key, e.g. `quote.fetch.fail`.
    pub event: &'static str,
    pub msg: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, event: &'static str, msg: impl Into<String>) -> Self {
        Self {
            level,
            event,
            msg: msg.into(),
        }
    }
}

/// Everything the poller and its fetch tasks report to the UI loop.
///
/// `generation` identifies the poll cadence a fetch was issued under; it
/// changes every time the tracked symbol changes.
#[derive(Debug, Clone)]
pub enum AppEvent {
    PollingStarted {
        symbol: String,
        generation: u64,
    },
    PollingStopped,
    FetchStarted {
        symbol: String,
        generation: u64,
    },
    QuoteFetched {
        symbol: String,
        generation: u64,
        result: Result<Quote, QuoteError>,
    },
}
