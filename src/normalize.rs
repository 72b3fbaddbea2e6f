//! Value canonicalization.
//!
//! OCR output mixes Turkish number formatting ("1.234,56 TL"), several
//! date separators and ragged whitespace. Everything stored in a field
//! map goes through these functions first, and all of them are
//! idempotent: normalizing an already-canonical value is a no-op.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CANONICAL_AMOUNT: Regex = Regex::new(r"^\d+\.\d{2}$").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref DATE_SEPARATOR_RUN: Regex = Regex::new(r"[./\-\s]+").unwrap();
}

/// Normalize a monetary amount to canonical `1234.56` form.
///
/// Turkish convention on input: `.` separates thousands, `,` separates
/// decimals. Currency markers and any other non-numeric characters are
/// stripped. Returns `None` when no parseable number remains.
///
/// # Examples
///
/// ```
/// use invoice_oxide::normalize::normalize_amount;
///
/// assert_eq!(normalize_amount("1.234,56 TL").as_deref(), Some("1234.56"));
/// assert_eq!(normalize_amount("150,50").as_deref(), Some("150.50"));
/// assert_eq!(normalize_amount("1234.56").as_deref(), Some("1234.56"));
/// assert_eq!(normalize_amount("n/a"), None);
/// ```
pub fn normalize_amount(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',').collect();
    if digits.is_empty() {
        return None;
    }
    // Already canonical: leave untouched so the function is idempotent.
    if CANONICAL_AMOUNT.is_match(&digits) {
        return Some(digits);
    }
    let value: f64 = digits.replace('.', "").replace(',', ".").parse().ok()?;
    Some(format!("{:.2}", value))
}

/// Parse a monetary string (in any accepted form) to a float.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    normalize_amount(raw)?.parse().ok()
}

/// Normalize a date to digit groups joined by single dashes.
///
/// Keeps digits, canonicalizes any run of `.`, `/`, `-` or spaces to one
/// dash, and drops everything else. Returns `None` when no digits remain.
///
/// # Examples
///
/// ```
/// use invoice_oxide::normalize::normalize_date;
///
/// assert_eq!(normalize_date("01.02.2024").as_deref(), Some("01-02-2024"));
/// assert_eq!(normalize_date("01/02/2024").as_deref(), Some("01-02-2024"));
/// assert_eq!(normalize_date("01-02-2024").as_deref(), Some("01-02-2024"));
/// ```
pub fn normalize_date(raw: &str) -> Option<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '/' | '-' | ' '))
        .collect();
    let dashed = DATE_SEPARATOR_RUN.replace_all(&kept, "-");
    let trimmed = dashed.trim_matches('-');
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        Some(trimmed.to_string())
    } else {
        None
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_text(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw.trim(), " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turkish_amount_with_currency() {
        assert_eq!(normalize_amount("1.234,56 TL").as_deref(), Some("1234.56"));
        assert_eq!(normalize_amount("₺2.500,00").as_deref(), Some("2500.00"));
    }

    #[test]
    fn test_plain_decimal_comma() {
        assert_eq!(normalize_amount("150,50").as_deref(), Some("150.50"));
    }

    #[test]
    fn test_amount_without_decimals() {
        assert_eq!(normalize_amount("1.234").as_deref(), Some("1234.00"));
        assert_eq!(normalize_amount("42").as_deref(), Some("42.00"));
    }

    #[test]
    fn test_amount_idempotence() {
        for raw in ["1.234,56 TL", "150,50", "3", "1234.56"] {
            let once = normalize_amount(raw).unwrap();
            let twice = normalize_amount(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_amount_garbage_is_none() {
        assert_eq!(normalize_amount(""), None);
        assert_eq!(normalize_amount("yok"), None);
        assert_eq!(normalize_amount(",,."), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("10,00"), Some(10.0));
        assert_eq!(parse_amount("x"), None);
    }

    #[test]
    fn test_date_separators() {
        assert_eq!(normalize_date("01.02.2024").as_deref(), Some("01-02-2024"));
        assert_eq!(normalize_date("01 / 02 / 2024").as_deref(), Some("01-02-2024"));
        assert_eq!(normalize_date("tarih yok"), None);
    }

    #[test]
    fn test_date_idempotence() {
        let once = normalize_date("01.02.2024").unwrap();
        assert_eq!(normalize_date(&once).unwrap(), once);
    }

    #[test]
    fn test_text_whitespace_collapse() {
        assert_eq!(normalize_text("  ABC   Tekstil \t A.Ş. "), "ABC Tekstil A.Ş.");
    }
}
