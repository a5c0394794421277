use rust_decimal::{Decimal, RoundingStrategy};

/// Format a dollar amount for the card: `$X.XXM`, `$X.XXK` or `$X.XX`,
/// always two decimals, `-` in front of losses and never a `+`.
pub fn format_currency(value: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);
    let magnitude = value.abs();

    let (scaled, suffix) = if magnitude >= million {
        (magnitude / million, "M")
    } else if magnitude >= thousand {
        (magnitude / thousand, "K")
    } else {
        (magnitude, "")
    };

    let rounded = scaled.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if value.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    format!("{}${:.2}{}", sign, rounded, suffix)
}

/// `round(win_trades / num_trades * 100)` in integer arithmetic, halves
/// rounding up. 0 when there were no trades.
pub fn rounded_win_rate(win_trades: u64, num_trades: u64) -> u64 {
    if num_trades == 0 {
        return 0;
    }
    let wins = win_trades.min(num_trades) as u128;
    let trades = num_trades as u128;
    ((wins * 200 + trades) / (trades * 2)) as u64
}

/// Whole-number win percentage, `0%` when there were no trades.
pub fn format_win_rate(win_trades: u64, num_trades: u64) -> String {
    format!("{}%", rounded_win_rate(win_trades, num_trades))
}
