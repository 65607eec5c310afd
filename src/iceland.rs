//! Icelandic identification numbers (kennitala).
//!
//! Ten digits, customarily written with a hyphen after the first six:
//! `DDMMYY-RRCK`. `RR` is a running number, `C` a weighted modulus-11 check
//! digit over the eight digits before it, and `K` a century digit (0 for the
//! 2000s, otherwise the century's hundreds digit).

use std::sync::OnceLock;

use regex::Regex;

use crate::Date;

const CONTROL_WEIGHTS: [u32; 8] = [3, 2, 7, 6, 5, 4, 3, 2];

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| Regex::new(r"^\d{6}-?\d{4}$").expect("kennitala pattern compiles"))
}

fn digits(token: &str) -> Option<[u8; 10]> {
    if !pattern().is_match(token) {
        return None;
    }
    let mut values = [0u8; 10];
    for (value, byte) in values
        .iter_mut()
        .zip(token.bytes().filter(u8::is_ascii_digit))
    {
        *value = byte - b'0';
    }
    Some(values)
}

/// Checks shape, the check digit and date existence.
pub fn is_valid(token: &str) -> bool {
    let Some(d) = digits(token) else {
        return false;
    };
    check_digit(&d) == Some(d[8]) && birthdate_of(&d).is_some()
}

/// Date of birth from the six date digits and the trailing century digit.
/// The check digit is not consulted.
pub fn birthdate(token: &str) -> Option<Date> {
    birthdate_of(&digits(token)?)
}

fn birthdate_of(d: &[u8; 10]) -> Option<Date> {
    let day = d[0] * 10 + d[1];
    let month = d[2] * 10 + d[3];
    let short_year = u16::from(d[4]) * 10 + u16::from(d[5]);
    let century = if d[9] == 0 {
        2000
    } else {
        1000 + 100 * u16::from(d[9])
    };
    Date::new(century + short_year, month, day).ok()
}

fn check_digit(d: &[u8; 10]) -> Option<u8> {
    let sum: u32 = CONTROL_WEIGHTS
        .iter()
        .zip(d)
        .map(|(weight, digit)| weight * u32::from(*digit))
        .sum();
    // remainders 0 and 1 leave no digit to write
    u8::try_from(11 - sum % 11).ok().filter(|check| *check <= 9)
}
