//! Dispatch of raw tokens to the per-country interpreters.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::norway::Kind;
use crate::{Date, Sex, denmark, finland, iceland, ireland, norway, sweden};

/// A country with a registered identity-number interpreter, tagged by its
/// ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Country {
    #[display(fmt = "DK")]
    Denmark,
    #[display(fmt = "FI")]
    Finland,
    #[display(fmt = "IS")]
    Iceland,
    #[display(fmt = "IE")]
    Ireland,
    #[display(fmt = "NO")]
    Norway,
    #[display(fmt = "SE")]
    Sweden,
}

impl Country {
    pub const ALL: [Self; 6] = [
        Self::Denmark,
        Self::Finland,
        Self::Iceland,
        Self::Ireland,
        Self::Norway,
        Self::Sweden,
    ];

    /// The ISO 3166-1 alpha-2 code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Denmark => "DK",
            Self::Finland => "FI",
            Self::Iceland => "IS",
            Self::Ireland => "IE",
            Self::Norway => "NO",
            Self::Sweden => "SE",
        }
    }
}

/// No interpreter is registered for the requested country code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no identity-number interpreter for country code {0:?}")]
pub struct UnknownCountry(pub String);

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|country| country.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownCountry(code.to_owned()))
    }
}

impl Serialize for Country {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Country {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything a country's interpreter could derive from one token.
///
/// Fields the country does not encode (sex in Iceland, anything beyond
/// validity in Ireland, the kind outside Norway) are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub valid: bool,
    pub birthdate: Option<Date>,
    pub sex: Option<Sex>,
    pub kind: Option<Kind>,
}

/// The raw token was empty or whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("id token is empty or blank")]
pub struct BlankToken;

/// Trims the raw token, rejects blank input, and collects every fact the
/// country's interpreter can derive.
///
/// # Errors
/// [`BlankToken`] when the trimmed token is empty; the interpreters
/// themselves never error, they only withhold facts.
pub fn interpret(country: Country, token: &str) -> Result<Interpretation, BlankToken> {
    let token = token.trim();
    if token.is_empty() {
        return Err(BlankToken);
    }
    Ok(match country {
        Country::Denmark => Interpretation {
            valid: denmark::is_valid(token),
            birthdate: denmark::birthdate(token),
            sex: denmark::sex(token),
            kind: None,
        },
        Country::Finland => Interpretation {
            valid: finland::is_valid(token),
            birthdate: finland::birthdate(token),
            sex: finland::sex(token),
            kind: None,
        },
        Country::Iceland => Interpretation {
            valid: iceland::is_valid(token),
            birthdate: iceland::birthdate(token),
            sex: None,
            kind: None,
        },
        Country::Ireland => Interpretation {
            valid: ireland::is_valid(token),
            birthdate: None,
            sex: None,
            kind: None,
        },
        Country::Norway => Interpretation {
            valid: norway::is_valid(token),
            birthdate: norway::birthdate(token),
            sex: norway::sex(token),
            kind: norway::classify(token),
        },
        Country::Sweden => Interpretation {
            valid: sweden::is_valid(token),
            birthdate: sweden::birthdate(token),
            sex: sweden::sex(token),
            kind: None,
        },
    })
}
