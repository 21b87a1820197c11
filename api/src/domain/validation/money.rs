//! Price parsing
//!
//! Prices arrive as display strings ("100,00", "1.250,90") and are stored
//! as integer cents.

use super::contact::only_digits_string;

/// Parse a price string into cents.
///
/// Every non-digit is dropped, so the value is expected to carry exactly two
/// decimal places. Returns `None` when no digits remain or the value does not
/// fit in an `i64`.
pub fn parse_price(value: &str) -> Option<i64> {
    let digits = only_digits_string(value);
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Render cents the way prices are typed in: `125090` -> `"1250,90"`
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}{},{:02}", sign, cents / 100, cents % 100)
}
