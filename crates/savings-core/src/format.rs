use chrono::NaiveDate;

use savings_domain::{parse_iso_date, MonthKey};

/// Short month names matching the twelve-bucket series order.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const DEFAULT_DATE_PATTERN: &str = "%b %-d, %Y";
const MONTH_PATTERN: &str = "%B %Y";

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64, currency: &str) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;
}

/// `en-US` style formatting used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFormatter;

impl CurrencyFormatter for StandardFormatter {
    fn format_amount(&self, amount: f64, currency: &str) -> String {
        format_currency(amount, currency)
    }
}

impl DateFormatter for StandardFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(DEFAULT_DATE_PATTERN).to_string()
    }
}

/// Renders `amount` with a currency symbol, thousands separators, and up to two
/// fraction digits (trailing zeros dropped).
pub fn format_currency(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{} {}", currency, amount);
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut body = group_thousands(whole);
    if fraction != 0 {
        let digits = format!("{:02}", fraction);
        body.push('.');
        body.push_str(digits.trim_end_matches('0'));
    }

    let sign = if amount < 0.0 && cents != 0 { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{} {body}", currency.to_uppercase()),
    }
}

/// Formats an ISO date with a chrono pattern, returning the input when it does not parse.
pub fn format_date(iso_date: &str, pattern: &str) -> String {
    match parse_iso_date(iso_date) {
        Some(date) => date.format(pattern).to_string(),
        None => iso_date.to_string(),
    }
}

/// Renders a `YYYY-MM` key as e.g. `March 2024`, returning the input on failure.
pub fn format_month(month_key: &str) -> String {
    MonthKey::parse(month_key)
        .and_then(|key| key.first_day())
        .map(|day| day.format(MONTH_PATTERN).to_string())
        .unwrap_or_else(|| month_key.to_string())
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands_and_trims_fraction() {
        assert_eq!(format_currency(1000.0, "USD"), "$1,000");
        assert_eq!(format_currency(1234.5, "USD"), "$1,234.5");
        assert_eq!(format_currency(1234567.891, "USD"), "$1,234,567.89");
        assert_eq!(format_currency(0.0, "USD"), "$0");
        assert_eq!(format_currency(12.05, "EUR"), "€12.05");
    }

    #[test]
    fn currency_handles_negatives_and_unknown_codes() {
        assert_eq!(format_currency(-42.0, "USD"), "-$42");
        assert_eq!(format_currency(999.0, "chf"), "CHF 999");
    }

    #[test]
    fn dates_use_pattern_or_fall_back() {
        assert_eq!(format_date("2024-03-05", DEFAULT_DATE_PATTERN), "Mar 5, 2024");
        assert_eq!(format_date("soon", DEFAULT_DATE_PATTERN), "soon");
        assert_eq!(
            StandardFormatter.format_date(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
            "Dec 25, 2024"
        );
    }

    #[test]
    fn month_keys_render_long_names() {
        assert_eq!(format_month("2024-03"), "March 2024");
        assert_eq!(format_month("2024-3"), "2024-3");
    }

    #[test]
    fn month_labels_cover_the_year() {
        assert_eq!(MONTH_LABELS.len(), 12);
        assert_eq!(MONTH_LABELS[2], "Mar");
    }
}
