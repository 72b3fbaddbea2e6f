//! Value validators applied after extraction.
//!
//! A candidate that fails validation is discarded silently and the
//! extraction chain moves on to the next strategy.

/// Validate an 11-digit national identity number.
///
/// The number carries two check digits. With digits `d1..d11`:
///
/// - `(7·(d1+d3+d5+d7+d9) − (d2+d4+d6+d8)) mod 10` must equal `d10`
/// - `(d1+…+d10) mod 10` must equal `d11`
///
/// The first digit may not be zero. Both checks must pass.
///
/// # Examples
///
/// ```
/// use invoice_oxide::validate::is_valid_national_id;
///
/// assert!(is_valid_national_id("10000000146"));
/// assert!(!is_valid_national_id("10000000147"));
/// assert!(!is_valid_national_id("12345"));
/// ```
pub fn is_valid_national_id(candidate: &str) -> bool {
    if candidate.len() != 11 || !candidate.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let d: Vec<i64> = candidate.bytes().map(|b| i64::from(b - b'0')).collect();
    if d[0] == 0 {
        return false;
    }

    let odd_sum = d[0] + d[2] + d[4] + d[6] + d[8];
    let even_sum = d[1] + d[3] + d[5] + d[7];
    // The difference can go negative; the check digit is the euclidean remainder.
    let check1 = (7 * odd_sum - even_sum).rem_euclid(10);
    if check1 != d[9] {
        return false;
    }

    let check2 = d[..10].iter().sum::<i64>() % 10;
    check2 == d[10]
}
