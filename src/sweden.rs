//! Swedish personal identity numbers (personnummer).
//!
//! Three shapes are accepted: `yymmdd-pppc`, `yymmddpppc` and the full-year
//! forms `yyyymmddpppc` / `yyyymmdd-pppc`, where `ppp` is the running number
//! and `c` the Luhn check digit. Coordination numbers (samordningsnummer) for
//! people without a registered day of birth add 60 to the day field.
//!
//! A two-digit year says nothing about the century, so resolving it needs a
//! reference date: the year lands in the most recent century that does not
//! put the birthdate in the future, and the `+` separator (which replaces
//! `-` once the holder turns one hundred) pushes it back another hundred
//! years. [`birthdate_on`] and [`is_valid_on`] take that reference date
//! explicitly; [`birthdate`] and [`is_valid`] use today.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Date, Sex};

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d{6}|\d{8})([-+]?)(\d{4})$").expect("identity number pattern compiles")
    })
}

struct Token<'t> {
    /// Six or eight leading date digits.
    date_part: &'t str,
    plus: bool,
    /// Three running digits.
    running: &'t str,
    check: u8,
}

fn split(token: &str) -> Option<Token<'_>> {
    let caps = pattern().captures(token)?;
    let tail = caps.get(3)?.as_str();
    Some(Token {
        date_part: caps.get(1)?.as_str(),
        plus: &caps[2] == "+",
        running: &tail[..3],
        check: tail.as_bytes()[3] - b'0',
    })
}

/// Checks shape, Luhn control digit and date existence against today.
pub fn is_valid(token: &str) -> bool {
    is_valid_on(token, Date::today())
}

/// Checks shape, Luhn control digit and date existence against a given
/// reference date.
pub fn is_valid_on(token: &str, on: Date) -> bool {
    let Some(parts) = split(token) else {
        return false;
    };
    control_ok(&parts) && resolve_birthdate(&parts, on).is_some()
}

/// Date of birth with the century resolved against today.
pub fn birthdate(token: &str) -> Option<Date> {
    birthdate_on(token, Date::today())
}

/// Date of birth with the century resolved against a given reference date.
/// The control digit is not consulted.
pub fn birthdate_on(token: &str, on: Date) -> Option<Date> {
    resolve_birthdate(&split(token)?, on)
}

/// Sex from the parity of the running number (even female, odd male).
pub fn sex(token: &str) -> Option<Sex> {
    let running: u16 = split(token)?.running.parse().ok()?;
    Some(if running % 2 == 0 {
        Sex::Female
    } else {
        Sex::Male
    })
}

/// Luhn over the short date digits and the running number. The century
/// digits of a full-year token never participate.
fn control_ok(parts: &Token<'_>) -> bool {
    let short_date = &parts.date_part[parts.date_part.len() - 6..];
    let mut sum = 0;
    for (i, digit) in short_date
        .bytes()
        .chain(parts.running.bytes())
        .map(|byte| u32::from(byte - b'0'))
        .enumerate()
    {
        let product = digit * if i % 2 == 0 { 2 } else { 1 };
        sum += product / 10 + product % 10;
    }
    (10 - sum % 10) % 10 == u32::from(parts.check)
}

fn resolve_birthdate(parts: &Token<'_>, on: Date) -> Option<Date> {
    let date_part = parts.date_part;
    let month: u8 = date_part[date_part.len() - 4..date_part.len() - 2]
        .parse()
        .ok()?;
    let raw_day: u8 = date_part[date_part.len() - 2..].parse().ok()?;
    let day = if raw_day > 31 {
        // coordination number: day of month plus 60
        raw_day.checked_sub(60)?
    } else {
        raw_day
    };

    let year = if date_part.len() == 8 {
        date_part[..4].parse().ok()?
    } else {
        let short: u16 = date_part[..2].parse().ok()?;
        let mut year = on.year() - on.year() % 100 + short;
        if (year, month, day) > (on.year(), on.month(), on.day()) {
            year = year.saturating_sub(100);
        }
        if parts.plus {
            year = year.saturating_sub(100);
        }
        year
    };

    Date::new(year, month, day).ok()
}
