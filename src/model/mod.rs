pub mod history;
pub mod quote;
