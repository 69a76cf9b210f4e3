/// Currencies offered in settings: (code, display name, symbol)
pub const SUPPORTED_CURRENCIES: &[(&str, &str, &str)] = &[
    ("USD", "US Dollar", "$"),
    ("PHP", "Philippine Peso", "₱"),
    ("EUR", "Euro", "€"),
    ("GBP", "British Pound", "£"),
    ("JPY", "Japanese Yen", "¥"),
    ("CAD", "Canadian Dollar", "CA$"),
    ("AUD", "Australian Dollar", "A$"),
    ("NZD", "New Zealand Dollar", "NZ$"),
    ("SGD", "Singapore Dollar", "S$"),
    ("HKD", "Hong Kong Dollar", "HK$"),
    ("CNY", "Chinese Yuan", "CN¥"),
    ("INR", "Indian Rupee", "₹"),
    ("AED", "UAE Dirham", "AED "),
    ("SAR", "Saudi Riyal", "SAR "),
];

pub fn is_supported_currency(code: &str) -> bool {
    SUPPORTED_CURRENCIES.iter().any(|(c, _, _)| c.eq_ignore_ascii_case(code))
}

fn currency_symbol(code: &str) -> String {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|(c, _, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, _, symbol)| symbol.to_string())
        .unwrap_or_else(|| format!("{} ", code.to_uppercase()))
}

/// Whole-unit amount with thousands separators, e.g. `-$1,235`
pub fn format_currency(value: f64, currency: &str) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}",
        if negative { "-" } else { "" },
        currency_symbol(currency),
        grouped
    )
}

/// Percentage with one decimal, e.g. `19.9%`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Text progress bar, `width` cells wide, for a ratio in `0.0..=1.0`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "USD"), "$0");
        assert_eq!(format_currency(1500.0, "USD"), "$1,500");
        assert_eq!(format_currency(1234567.4, "EUR"), "€1,234,567");
        assert_eq!(format_currency(-999.6, "USD"), "-$1,000");
        assert_eq!(format_currency(250.0, "xyz"), "XYZ 250");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.5), "12.5%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_supported_currencies() {
        assert!(is_supported_currency("PHP"));
        assert!(is_supported_currency("sar"));
        assert!(!is_supported_currency("BTC"));
    }

    #[test]
    fn test_progress_bar_clamps() {
        assert_eq!(progress_bar(0.5, 4), "[██░░]");
        assert_eq!(progress_bar(3.0, 2), "[██]");
        assert_eq!(progress_bar(-1.0, 2), "[░░]");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Groceries", 20), "Groceries");
        assert_eq!(truncate_string("Emergency fund for the car", 10), "Emergen...");
    }
}
