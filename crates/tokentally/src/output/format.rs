//! Pure formatting helpers for counts, headers, and the remaining budget.

use owo_colors::OwoColorize;

/// Format a number with thousands separators (commas).
#[must_use]
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let digits: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let len = digits.len();
    for (i, &c) in digits.iter().enumerate() {
        if i > 0 && (len - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// [`format_number`] for signed values; negatives keep their sign.
#[must_use]
pub fn format_signed(n: i64) -> String {
    let digits = format_number(usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX));
    if n < 0 { format!("-{digits}") } else { digits }
}

/// `"<ext> tokens:"`, bold when colored.
pub(super) fn format_header(extension: &str, color: bool) -> String {
    let header = format!("{extension} tokens:");
    if color {
        header.bold().to_string()
    } else {
        header
    }
}

/// The remaining budget, red when it has gone negative.
pub(super) fn format_remaining(remaining: i64, color: bool) -> String {
    let s = format_signed(remaining);
    if color && remaining < 0 {
        s.red().to_string()
    } else {
        s
    }
}
