use std::collections::VecDeque;

use chrono::{DateTime, Local};

use super::quote::{Quote, TIME_FORMAT};

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub time: DateTime<Local>,
    pub price: f64,
    pub symbol: String,
}

impl HistoryEntry {
    pub fn time_label(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl From<&Quote> for HistoryEntry {
    fn from(quote: &Quote) -> Self {
        Self {
            time: quote.fetched_at,
            price: quote.price,
            symbol: quote.ticker.clone(),
        }
    }
}

/// Bounded FIFO of recent observations, oldest first.
///
/// Entries for different symbols intermix by arrival order; nothing is
/// deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryWindow {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryWindow {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Returns a new window holding the prior entries plus `entry`, trimmed to
    /// the most recent `capacity` entries.
    pub fn append(&self, entry: HistoryEntry) -> Self {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Chronological prices for charting.
    pub fn prices(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.price).collect()
    }
}
