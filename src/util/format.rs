//! Display formatting for product links.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::config::PRODUCT_ID_PLACEHOLDER;
use crate::net::types::ProductId;

/// Round half up to a whole unit and group thousands with `separator`.
///
/// Non-finite prices render as `0`.
pub fn format_price(price: f64, separator: char) -> String {
    let rounded = if price.is_finite() { (price + 0.5).floor() } else { 0.0 };
    #[allow(clippy::cast_possible_truncation)]
    let whole = rounded as i64;

    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Link label: `"{name} — ${price}"`.
pub fn product_label(name: &str, price: f64, separator: char) -> String {
    format!("{name} — ${}", format_price(price, separator))
}

/// Detail page path for `id` from a template containing `{id}`.
pub fn product_href(template: &str, id: &ProductId) -> String {
    template.replace(PRODUCT_ID_PLACEHOLDER, &id.to_string())
}
