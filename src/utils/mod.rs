pub mod format;

pub use format::{format_currency, format_win_rate, rounded_win_rate};
