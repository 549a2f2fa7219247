//! Text-to-value field parsers.
//!
//! These are the leaf converters the extractors lean on. Currency and
//! percentage parsing return `0.0` on unparseable input rather than an
//! error; callers must treat `0.0` as "unknown" and prefer skipping a
//! record over accepting a spurious zero where zero is implausible.

use chrono::NaiveDate;
use regex::Regex;

/// Parses a currency string like `"$1,234.56"` into `1234.56`.
/// Returns `0.0` when nothing numeric survives.
pub fn currency(text: &str) -> f64 {
    text.trim()
        .trim_start_matches("US$")
        .trim_start_matches('$')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

/// Parses a percentage string like `"17%"` into `17.0`.
/// Returns `0.0` when malformed.
pub fn percentage(text: &str) -> f64 {
    text.trim()
        .trim_end_matches('%')
        .replace(',', "")
        .parse()
        .unwrap_or(0.0)
}

/// True for a plausible exchange ticker: one to five ASCII uppercase
/// letters, nothing else. Records failing this are rejected, never
/// coerced.
pub fn is_ticker(text: &str) -> bool {
    !text.is_empty() && text.len() <= 5 && text.chars().all(|c| c.is_ascii_uppercase())
}

const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y", "%m/%d/%y", "%b %d, %Y", "%b %d %Y", "%B %d, %Y", "%m-%d-%Y", "%m-%d-%y",
];

/// Parses a date in any of the loose formats the site uses
/// (`1/14/2025`, `Jan 14, 2025`, `1-14-25`). `None` means "unknown
/// date" and must propagate as such, never default to today.
pub fn loose_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

/// Scans free text for the first recognizable date substring.
pub fn find_loose_date(text: &str) -> Option<NaiveDate> {
    let patterns = [
        r"\d{1,2}/\d{1,2}/\d{2,4}",
        r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4}",
        r"\d{1,2}-\d{1,2}-\d{2,4}",
    ];
    for pattern in patterns {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        if let Some(m) = re.find(text) {
            if let Some(date) = loose_date(m.as_str()) {
                return Some(date);
            }
        }
    }
    None
}

/// Captures a disclosure amount bracket like `"$250,001 - $500,000"`
/// (or a single `"$50,000"`) from surrounding text.
pub fn amount_range(text: &str) -> Option<String> {
    let re = Regex::new(r"\$[\d,]+(?:\s*-\s*\$[\d,]+)?").ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// Parses compact dollar figures like `"US$168M"` or `"$450K"` into an
/// absolute value. Returns `None` when no multiplier-style figure is
/// present.
pub fn compact_dollars(text: &str) -> Option<f64> {
    let re = Regex::new(r"(?:US)?\$([\d,]+\.?\d*)\s*([MK])?").ok()?;
    let caps = re.captures(text)?;
    let mut amount: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        Some("M") => amount *= 1_000_000.0,
        Some("K") => amount *= 1_000.0,
        _ => {}
    }
    Some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_valid() {
        assert_eq!(currency("$1,234.56"), 1234.56);
        assert_eq!(currency("145.89"), 145.89);
        assert_eq!(currency("US$227.15"), 227.15);
        assert_eq!(currency("  $9.99  "), 9.99);
    }

    #[test]
    fn currency_garbage_is_zero() {
        assert_eq!(currency(""), 0.0);
        assert_eq!(currency("N/A"), 0.0);
        assert_eq!(currency("$-"), 0.0);
    }

    #[test]
    fn percentage_valid() {
        assert_eq!(percentage("17%"), 17.0);
        assert_eq!(percentage("3.5%"), 3.5);
        assert_eq!(percentage("19"), 19.0);
    }

    #[test]
    fn percentage_garbage_is_zero() {
        assert_eq!(percentage("n/a"), 0.0);
        assert_eq!(percentage("%"), 0.0);
    }

    #[test]
    fn ticker_validation() {
        assert!(is_ticker("NVDA"));
        assert!(is_ticker("A"));
        assert!(is_ticker("GOOGL"));
        assert!(!is_ticker("nvda"));
        assert!(!is_ticker("TOOLONG"));
        assert!(!is_ticker("12AB"));
        assert!(!is_ticker("BRK-B"));
        assert!(!is_ticker(""));
    }

    #[test]
    fn loose_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        assert_eq!(loose_date("1/14/2025"), Some(expected));
        assert_eq!(loose_date("Jan 14, 2025"), Some(expected));
        assert_eq!(loose_date("1-14-25"), Some(expected));
        assert_eq!(loose_date("not a date"), None);
    }

    #[test]
    fn find_date_in_noise() {
        let text = "NVDA Purchase 12/20/2024 $500,001 - $1,000,000";
        assert_eq!(
            find_loose_date(text),
            NaiveDate::from_ymd_opt(2024, 12, 20)
        );
        assert_eq!(find_loose_date("no dates here"), None);
    }

    #[test]
    fn amount_brackets() {
        assert_eq!(
            amount_range("bought $250,001 - $500,000 of calls"),
            Some("$250,001 - $500,000".to_string())
        );
        assert_eq!(amount_range("roughly $50,000"), Some("$50,000".to_string()));
        assert_eq!(amount_range("no money mentioned"), None);
    }

    #[test]
    fn compact_figures() {
        assert_eq!(compact_dollars("Total Value US$168M"), Some(168_000_000.0));
        assert_eq!(compact_dollars("$450K invested"), Some(450_000.0));
        assert_eq!(compact_dollars("$1,250"), Some(1250.0));
        assert_eq!(compact_dollars("nothing"), None);
    }
}
