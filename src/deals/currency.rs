use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Fixed USD to EUR rate applied to every listed price.
pub const USD_TO_EUR: Decimal = dec!(0.85);

pub const DISPLAY_CURRENCY_SYMBOL: &str = "€";

/// Converts a source-currency (USD) amount into display currency. The result
/// is not rounded.
pub fn to_display(amount_usd: Decimal) -> Decimal {
    amount_usd * USD_TO_EUR
}

/// Renders a display-currency amount with two decimals.
pub fn format_display(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}{DISPLAY_CURRENCY_SYMBOL}")
}
