//! Interpreters for national personal identity numbers.
//!
//! Six countries are supported, each behind its own module: [`denmark`],
//! [`finland`], [`iceland`], [`ireland`], [`norway`] and [`sweden`]. Every
//! module exposes the same kind of contract over a raw token string — a
//! validity check plus extraction of whichever facts the number actually
//! encodes (date of birth, sex, and for Norway a sub-type classification).
//! The facts are independent: a token that fails its checksum can still yield
//! a birthdate, and a malformed token simply yields `None`, never a panic.
//!
//! [`interpret`] routes a token to the right interpreter by [`Country`] and
//! collects all derivable facts into one [`Interpretation`].
//!
//! The Swedish interpreter is the only one whose result depends on anything
//! besides the token: resolving a two-digit year needs a reference date. The
//! `sweden` module therefore offers `*_on` variants taking an explicit
//! [`Date`], and the plain variants read the system clock.

mod country;
mod date;

pub mod denmark;
pub mod finland;
pub mod iceland;
pub mod ireland;
pub mod norway;
pub mod sweden;

pub use country::{BlankToken, Country, Interpretation, UnknownCountry, interpret};
pub use date::{Date, DateError, MAX_YEAR};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Sex as encoded in an identity number.
///
/// Tokens that do not carry a readable sex discriminator yield
/// `Option::<Sex>::None` from the interpreters rather than a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[display(fmt = "female")]
    Female,
    #[display(fmt = "male")]
    Male,
}

/// Decimal values of an all-digit token of exactly `N` characters.
pub(crate) fn digit_values<const N: usize>(token: &str) -> Option<[u8; N]> {
    let bytes = token.as_bytes();
    if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut values = [0u8; N];
    for (value, byte) in values.iter_mut().zip(bytes) {
        *value = byte - b'0';
    }
    Some(values)
}
