//! Irish Personal Public Service numbers.
//!
//! Seven digits, one control letter, and optionally a second letter. The
//! control letter is a weighted sum of the digits modulo 23 into an alphabet
//! of `W` followed by `A`-`V`; since January 2013 the second letter, when
//! present, contributes `9 × (1 + its alphabet index)` to the sum. Nothing
//! but validity can be read out of a PPS number.

use std::sync::OnceLock;

use regex::Regex;

const CONTROL_CHARS: &[u8; 23] = b"WABCDEFGHIJKLMNOPQRSTUV";

const DIGIT_WEIGHTS: [u32; 7] = [8, 7, 6, 5, 4, 3, 2];

static PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    PATTERN.get_or_init(|| Regex::new(r"^(\d{7})([A-Z])([A-Z]?)$").expect("PPS pattern compiles"))
}

/// Checks the shape and the mod-23 control letter. Lowercase input is
/// accepted and uppercased first.
pub fn is_valid(token: &str) -> bool {
    let token = token.to_ascii_uppercase();
    let Some(caps) = pattern().captures(&token) else {
        return false;
    };
    let mut sum: u32 = caps[1]
        .bytes()
        .zip(DIGIT_WEIGHTS)
        .map(|(byte, weight)| weight * u32::from(byte - b'0'))
        .sum();
    if let Some(second) = caps[3].as_bytes().first() {
        sum += 9 * (u32::from(second - b'A') + 1);
    }
    CONTROL_CHARS[(sum % 23) as usize] == caps[2].as_bytes()[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(is_valid("1234567TW"));
        assert!(is_valid("1234567T"));
        assert!(is_valid("7654321GW"));
        assert!(is_valid("7654321G"));
    }

    #[test]
    fn test_lowercase_is_accepted() {
        assert!(is_valid("1234567tw"));
        assert!(is_valid("1234567t"));
    }

    #[test]
    fn test_second_letter_shifts_the_control() {
        // with second letter A the same digits demand control F, not T
        assert!(is_valid("1234567FA"));
        assert!(!is_valid("1234567TA"));
        assert!(!is_valid("7654321TW"));
    }

    #[test]
    fn test_wrong_control_letter() {
        assert!(!is_valid("1234567W"));
        assert!(!is_valid("1234567AW"));
    }

    #[test]
    fn test_malformed_tokens() {
        for token in [
            "",
            "123456T",
            "12345678T",
            "1234567",
            "1234567TWW",
            "123456aTW",
            "1234567T W",
        ] {
            assert!(!is_valid(token), "{token:?} should be invalid");
        }
    }

    #[test]
    fn test_single_digit_mutations_break_the_control() {
        for token in ["1234567TW", "7654321G"] {
            for (position, original) in token.char_indices().take(7) {
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

    #[test]
    fn test_control_letter_mutations_are_invalid() {
        for replacement in 'A'..='Z' {
            if replacement == 'T' {
                continue;
            }
            let mutated = format!("1234567{replacement}W");
            assert!(!is_valid(&mutated), "{mutated} must be invalid");
        }
    }
}
