use chrono::{DateTime, Local};

/// Display format for `Quote::last_updated` and history timestamps.
pub const TIME_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceDirection {
    Up,
    Down,
}

impl PriceDirection {
    /// Zero change counts as up.
    pub fn from_percent_change(percent_change: f64) -> Self {
        if percent_change >= 0.0 {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑",
            Self::Down => "↓",
        }
    }
}

/// One point-in-time observation for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub ticker: String,
    pub price: f64,
    pub percent_change: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    /// Client wall clock at fetch time.
    pub fetched_at: DateTime<Local>,
}

impl Quote {
    pub fn direction(&self) -> PriceDirection {
        PriceDirection::from_percent_change(self.percent_change)
    }

    pub fn last_updated(&self) -> String {
        self.fetched_at.format(TIME_FORMAT).to_string()
    }
}
