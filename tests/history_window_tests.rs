mod common;

use chrono::{Duration, Local, TimeZone};

use stock_pulse::model::history::{HistoryEntry, HistoryWindow, HISTORY_CAPACITY};

fn entry(symbol: &str, price: f64, offset_secs: i64) -> HistoryEntry {
    let base = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
    HistoryEntry {
        time: base + Duration::seconds(offset_secs),
        price,
        symbol: symbol.to_string(),
    }
}

#[test]
fn length_never_exceeds_capacity() {
    let mut window = HistoryWindow::default();
    assert_eq!(window.capacity(), HISTORY_CAPACITY);
    for i in 0..37 {
        window.push(entry("DIS", 100.0 + i as f64, i * 30));
        assert!(window.len() <= HISTORY_CAPACITY);
        assert_eq!(window.len(), (i as usize + 1).min(HISTORY_CAPACITY));
    }
}

/// Eleven appends leave exactly the last ten, oldest first.
#[test]
fn eleventh_append_drops_oldest() {
    let mut window = HistoryWindow::default();
    for i in 0..11 {
        window = window.append(entry("DIS", i as f64, i * 30));
    }
    let prices: Vec<f64> = window.iter().map(|e| e.price).collect();
    assert_eq!(prices, (1..11).map(|i| i as f64).collect::<Vec<_>>());
    assert_eq!(window.latest().map(|e| e.price), Some(10.0));
}

#[test]
fn append_leaves_source_window_untouched() {
    let window = HistoryWindow::default().append(entry("DIS", 1.0, 0));
    let next = window.append(entry("DIS", 2.0, 30));
    assert_eq!(window.len(), 1);
    assert_eq!(next.len(), 2);
}

#[test]
fn symbols_intermix_without_dedup() {
    let mut window = HistoryWindow::default();
    window.push(entry("DIS", 100.0, 0));
    window.push(entry("AAPL", 190.0, 30));
    window.push(entry("DIS", 100.0, 60));
    let symbols: Vec<&str> = window.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["DIS", "AAPL", "DIS"]);
}

#[test]
fn recent_first_reverses_arrival_order() {
    let mut window = HistoryWindow::with_capacity(3);
    for i in 0..5 {
        window.push(entry("DIS", i as f64, i * 30));
    }
    let prices: Vec<f64> = window.recent_first().map(|e| e.price).collect();
    assert_eq!(prices, vec![4.0, 3.0, 2.0]);
    assert_eq!(window.prices(), vec![2.0, 3.0, 4.0]);
}

#[test]
fn entry_projects_quote() {
    let quote = common::quote("dis", 100.5, 1.2);
    let entry = HistoryEntry::from(&quote);
    assert_eq!(entry.symbol, "DIS");
    assert!((entry.price - 100.5).abs() < f64::EPSILON);
    assert_eq!(entry.time, quote.fetched_at);
    assert_eq!(entry.time_label(), quote.last_updated());
}
