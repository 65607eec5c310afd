//! Danish CPR numbers.
//!
//! A CPR number is ten digits, `DDMMYYCXXG`: birth day, month and short year,
//! a century indicator `C`, a two-digit serial `XX` and a final digit `G`
//! carrying both the sex discriminator and the modulus-11 control.

use crate::{Date, Sex, digit_values};

const MOD11_WEIGHTS: [u32; 10] = [4, 3, 2, 7, 6, 5, 4, 3, 2, 1];

const SEX_BIT: usize = 9;

fn digits(token: &str) -> Option<[u8; 10]> {
    digit_values(token)
}

/// Checks that the token is ten digits encoding an existing date.
///
/// This is the everyday validity level: numbers issued after the 2007 policy
/// change no longer reserve modulus-11-clean serials, so the control sum is
/// not part of it. Use [`is_valid_mod11`] for the stricter historical check.
pub fn is_valid(token: &str) -> bool {
    birthdate(token).is_some()
}

/// Checks [`is_valid`] plus the historical modulus-11 control sum.
pub fn is_valid_mod11(token: &str) -> bool {
    let Some(digits) = digits(token) else {
        return false;
    };
    let sum: u32 = MOD11_WEIGHTS
        .iter()
        .zip(digits)
        .map(|(weight, digit)| weight * u32::from(digit))
        .sum();
    sum % 11 == 0 && is_valid(token)
}

/// Date of birth, reconstructed from the first six digits and the century
/// indicator. `None` when the shape is wrong or the date does not exist.
pub fn birthdate(token: &str) -> Option<Date> {
    let d = digits(token)?;
    let day = d[0] * 10 + d[1];
    let month = d[2] * 10 + d[3];
    let short_year = d[4] * 10 + d[5];
    Date::new(full_year(short_year, d[6]), month, day).ok()
}

/// Sex from the final digit: even is female, odd is male.
pub fn sex(token: &str) -> Option<Sex> {
    let d = digits(token)?;
    Some(if d[SEX_BIT] % 2 == 0 {
        Sex::Female
    } else {
        Sex::Male
    })
}

fn full_year(short_year: u8, indicator: u8) -> u16 {
    let century = match indicator {
        0..=3 => 1900,
        4 | 9 => {
            if short_year <= 36 {
                2000
            } else {
                1900
            }
        }
        _ => {
            if short_year >= 58 {
                1800
            } else {
                2000
            }
        }
    };
    century + u16::from(short_year)
}
