//! Finnish personal identity codes (henkilötunnus).
//!
//! The token is `DDMMYY` + a century separator (`+` 1800s, `-` 1900s, `A`
//! 2000s) + a three-digit running number + one control character. The control
//! character is looked up by taking the nine date and running digits as one
//! number modulo 31; the alphabet skips letters that are easily confused with
//! digits.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Date, Sex};

const CONTROL_CHARS: &[u8; 31] = b"0123456789ABCDEFHJKLMNPRSTUVWXZ";

/// Index of the digit whose parity encodes sex (first running digit).
const SEX_BIT: usize = 7;

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-3]\d)([01]\d)(\d{2})([-+A])(\d{3})([0-9A-Z])$")
            .expect("identity code pattern compiles")
    })
}

/// Checks shape, date existence and the control character.
pub fn is_valid(token: &str) -> bool {
    let Some(caps) = pattern().captures(token) else {
        return false;
    };
    birthdate_of(&caps).is_some() && control_char(&caps) == Some(caps[6].as_bytes()[0])
}

/// Date of birth from the six date digits and the century separator.
pub fn birthdate(token: &str) -> Option<Date> {
    birthdate_of(&pattern().captures(token)?)
}

/// Sex from the parity of the first running digit (even female, odd male).
///
/// Reads the digit positionally without validating the rest of the token, so
/// a code with a mistyped date can still report its sex.
pub fn sex(token: &str) -> Option<Sex> {
    let bit = *token.as_bytes().get(SEX_BIT)?;
    if !bit.is_ascii_digit() {
        return None;
    }
    Some(if (bit - b'0') % 2 == 0 {
        Sex::Female
    } else {
        Sex::Male
    })
}

fn birthdate_of(caps: &regex::Captures<'_>) -> Option<Date> {
    let century: u16 = match &caps[4] {
        "+" => 1800,
        "-" => 1900,
        _ => 2000,
    };
    let short_year: u16 = caps[3].parse().ok()?;
    let month: u8 = caps[2].parse().ok()?;
    let day: u8 = caps[1].parse().ok()?;
    Date::new(century + short_year, month, day).ok()
}

fn control_char(caps: &regex::Captures<'_>) -> Option<u8> {
    let number: u32 = format!("{}{}{}{}", &caps[1], &caps[2], &caps[3], &caps[5])
        .parse()
        .ok()?;
    Some(CONTROL_CHARS[(number % 31) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEMALE_1974: &str = "270274-885N";
    const MALE_1890: &str = "010290+3581";
    const MALE_2011: &str = "231211A5182";

    #[test]
    fn test_valid_codes() {
        assert!(is_valid(FEMALE_1974));
        assert!(is_valid(MALE_1890));
        assert!(is_valid(MALE_2011));
        assert!(is_valid("050314A200P"));
        assert!(is_valid("120857-1004"));
    }

    #[test]
    fn test_century_from_separator() {
        struct TestCase {
            token: &'static str,
            expected: (u16, u8, u8),
        }

        let cases = [
            TestCase {
                token: FEMALE_1974,
                expected: (1974, 2, 27),
            },
            TestCase {
                token: MALE_1890,
                expected: (1890, 2, 1),
            },
            TestCase {
                token: MALE_2011,
                expected: (2011, 12, 23),
            },
        ];

        for case in &cases {
            let (year, month, day) = case.expected;
            assert_eq!(
                birthdate(case.token),
                Some(Date::new(year, month, day).expect("valid date")),
                "token {}",
                case.token
            );
        }
    }

    #[test]
    fn test_nonexistent_date_is_invalid() {
        // February 30th, control character recomputed to match
        assert!(birthdate("300274-885N").is_none());
        assert!(!is_valid("300274-885N"));
    }

    #[test]
    fn test_wrong_control_char_is_invalid() {
        assert!(!is_valid("270274-885M"));
        assert!(!is_valid("270274-8850"));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(!is_valid("X70274-885N"));
        assert!(!is_valid("270274885N"));
        assert!(!is_valid("270274-85N"));
        assert!(!is_valid("270274*885N"));
        assert!(birthdate("X70274-885N").is_none());
    }

    #[test]
    fn test_sex_from_running_digit() {
        assert_eq!(sex(FEMALE_1974), Some(Sex::Female));
        assert_eq!(sex(MALE_1890), Some(Sex::Male));
        assert_eq!(sex(MALE_2011), Some(Sex::Male));
    }

    #[test]
    fn test_sex_reads_positionally_without_validation() {
        // mistyped date digit, the running block is untouched
        assert_eq!(sex("X70274-885N"), Some(Sex::Female));
        // too short to have a running block at all
        assert_eq!(sex("27027"), None);
        // non-digit where the discriminator should be
        assert_eq!(sex("270274-X85N"), None);
    }

    #[test]
    fn test_single_digit_mutations_break_validity() {
        for token in [FEMALE_1974, MALE_1890, MALE_2011] {
            for (position, original) in token.char_indices() {
                if !original.is_ascii_digit() {
                    continue;
                }
                for replacement in '0'..='9' {
                    if replacement == original {
                        continue;
                    }
                    let mut mutated = String::from(token);
                    mutated.replace_range(position..=position, &replacement.to_string());
                    assert!(
                        !is_valid(&mutated),
                        "mutation {mutated} of {token} must be invalid"
                    );
                }
            }
        }
    }
}
