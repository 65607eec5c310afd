//! Norwegian national identity numbers (fødselsnummer).
//!
//! Eleven digits: `DDMMYY` + a three-digit individual number + two control
//! digits, each a weighted modulus-11 sum over the digits before it. Offsets
//! on the day or month field mark special issue kinds, see [`Kind`]; the
//! individual number range combined with the short year resolves the century.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{Date, Sex, digit_values};

const CONTROL_WEIGHTS_1: [u32; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];
const CONTROL_WEIGHTS_2: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Issue kind of a Norwegian identity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    /// Ordinary birth number.
    #[display(fmt = "F-number")]
    FNumber,
    /// Temporary number for people without a Norwegian birth number; the day
    /// field is offset by 40.
    #[display(fmt = "D-number")]
    DNumber,
    /// Number issued by the health sector; the month field is offset by 40.
    #[display(fmt = "H-number")]
    HNumber,
    /// Shared help number, an opaque identifier: the digits past the offset
    /// carry no birthdate or sex.
    #[display(fmt = "FH-number")]
    FhNumber,
}

enum Reading {
    /// FH-number: only the control digits say anything about it.
    Opaque { control_ok: bool },
    Person {
        control_ok: bool,
        kind: Kind,
        birthdate: Date,
        sex: Sex,
    },
}

/// Checks both modulus-11 control digits on a well-shaped token.
///
/// Tokens that are not eleven digits, or whose date fields do not form a real
/// date after removing any kind offset, are invalid outright.
pub fn is_valid(token: &str) -> bool {
    match read(token) {
        Some(Reading::Opaque { control_ok } | Reading::Person { control_ok, .. }) => control_ok,
        None => false,
    }
}

/// Classifies the issue kind. Classification needs only the shape and a
/// plausible date, not the control digits.
pub fn classify(token: &str) -> Option<Kind> {
    match read(token)? {
        Reading::Opaque { .. } => Some(Kind::FhNumber),
        Reading::Person { kind, .. } => Some(kind),
    }
}

/// Date of birth; `None` for malformed tokens and FH-numbers.
pub fn birthdate(token: &str) -> Option<Date> {
    match read(token)? {
        Reading::Opaque { .. } => None,
        Reading::Person { birthdate, .. } => Some(birthdate),
    }
}

/// Sex from the parity of the last individual-number digit; `None` for
/// malformed tokens and FH-numbers.
pub fn sex(token: &str) -> Option<Sex> {
    match read(token)? {
        Reading::Opaque { .. } => None,
        Reading::Person { sex, .. } => Some(sex),
    }
}

fn read(token: &str) -> Option<Reading> {
    let digits = digit_values::<11>(token)?;
    let control_ok = control_digit(&CONTROL_WEIGHTS_1, &digits[..9]) == u32::from(digits[9])
        && control_digit(&CONTROL_WEIGHTS_2, &digits[..10]) == u32::from(digits[10]);

    let raw_day = digits[0] * 10 + digits[1];
    let raw_month = digits[2] * 10 + digits[3];
    if raw_day > 80 {
        return Some(Reading::Opaque { control_ok });
    }

    let (kind, day, month) = if raw_day > 40 {
        (Kind::DNumber, raw_day - 40, raw_month)
    } else if raw_month > 40 {
        (Kind::HNumber, raw_day, raw_month - 40)
    } else {
        (Kind::FNumber, raw_day, raw_month)
    };

    let short_year = digits[4] * 10 + digits[5];
    let individual =
        u16::from(digits[6]) * 100 + u16::from(digits[7]) * 10 + u16::from(digits[8]);
    let birthdate = Date::new(full_year(short_year, individual), month, day).ok()?;
    let sex = if digits[8] % 2 == 0 {
        Sex::Female
    } else {
        Sex::Male
    };

    Some(Reading::Person {
        control_ok,
        kind,
        birthdate,
        sex,
    })
}

fn control_digit(weights: &[u32], digits: &[u8]) -> u32 {
    let sum: u32 = weights
        .iter()
        .zip(digits)
        .map(|(weight, digit)| weight * u32::from(*digit))
        .sum();
    // a result of 11 normalizes to 0; 10 can never match a digit
    match 11 - sum % 11 {
        11 => 0,
        control => control,
    }
}

fn full_year(short_year: u8, individual: u16) -> u16 {
    let short = u16::from(short_year);
    if individual < 500 {
        1900 + short
    } else if individual < 750 && short >= 54 {
        1800 + short
    } else if short < 40 {
        2000 + short
    } else {
        1900 + short
    }
}
