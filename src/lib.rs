pub mod alert;
pub mod config;
pub mod error;
pub mod event;
pub mod finnhub;
pub mod input;
pub mod model;
pub mod notify;
pub mod poller;
pub mod ui;
pub mod ui_handlers;
