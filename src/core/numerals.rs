//! Spoken Numerals
//!
//! Recognizes the longest numeral phrase at a token position:
//! an optional sign, an integer part (digits or magnitude words) and an
//! optional "point ..." fraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DIGIT_LITERAL: Regex =
        Regex::new(r"^\d+(\.\d+)?$").expect("static pattern is valid");
    static ref DIGITS: Regex = Regex::new(r"^\d+$").expect("static pattern is valid");
}

/// Value of a unit or teen word (zero..nineteen)
pub fn unit_value(word: &str) -> Option<u64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        _ => return None,
    };
    Some(value)
}

/// Value of a tens word (twenty..ninety)
pub fn tens_value(word: &str) -> Option<u64> {
    let value = match word {
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

/// A recognized numeral phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeral {
    /// Decimal text, e.g. "-12.5"
    pub text: String,
    /// Number of tokens the phrase spans
    pub consumed: usize,
}

/// Parse the numeral phrase starting at `start`, if there is one
pub fn parse_numeral<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<Numeral> {
    // Each sign word negates the phrase after it: "negative negative five" is "--5"
    let mut signs = 0;
    while let Some(token) = tokens.get(start + signs) {
        if !matches!(token.as_ref(), "negative" | "minus") {
            break;
        }
        signs += 1;
    }

    let inner = parse_unsigned(tokens, start + signs)?;
    Some(Numeral {
        text: format!("{}{}", "-".repeat(signs), inner.text),
        consumed: inner.consumed + signs,
    })
}

fn parse_unsigned<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<Numeral> {
    let first = tokens.get(start)?.as_ref();

    if first == "point" {
        let (fraction, used) = parse_fraction(tokens, start + 1)?;
        return Some(Numeral {
            text: format!("0.{}", fraction),
            consumed: used + 1,
        });
    }

    let (mut text, mut consumed) = if DIGIT_LITERAL.is_match(first) {
        if first.contains('.') {
            return Some(Numeral {
                text: first.to_string(),
                consumed: 1,
            });
        }
        (first.to_string(), 1)
    } else {
        let (value, used) = parse_magnitude(tokens, start)?;
        (value.to_string(), used)
    };

    let next: Option<&str> = tokens.get(start + consumed).map(|t| t.as_ref());
    if next == Some("point") {
        if let Some((fraction, used)) = parse_fraction(tokens, start + consumed + 1) {
            text.push('.');
            text.push_str(&fraction);
            consumed += used + 1;
        }
    }

    Some(Numeral { text, consumed })
}

/// Digits after "point": digit tokens and unit words, concatenated
fn parse_fraction<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<(String, usize)> {
    let mut digits = String::new();
    let mut used = 0;

    while let Some(token) = tokens.get(start + used) {
        let token = token.as_ref();
        if DIGITS.is_match(token) {
            digits.push_str(token);
        } else if let Some(value) = unit_value(token) {
            digits.push_str(&value.to_string());
        } else {
            break;
        }
        used += 1;
    }

    (used > 0).then_some((digits, used))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Word {
    Start,
    Zero,
    Unit,
    Tens,
    Hundred,
    Thousand,
}

/// Accumulate magnitude words ("one hundred twenty three", "two thousand five").
/// Stops at the first word that cannot continue the number.
fn parse_magnitude<S: AsRef<str>>(tokens: &[S], start: usize) -> Option<(u64, usize)> {
    let mut thousands = 0u64;
    let mut group = 0u64;
    let mut last = Word::Start;
    let mut used = 0;

    while let Some(token) = tokens.get(start + used) {
        let word = token.as_ref();

        if let Some(value) = unit_value(word) {
            let fits = match last {
                Word::Start => true,
                Word::Tens | Word::Hundred | Word::Thousand => value > 0,
                _ => false,
            };
            if !fits {
                break;
            }
            group += value;
            last = if value == 0 { Word::Zero } else { Word::Unit };
        } else if let Some(value) = tens_value(word) {
            if !matches!(last, Word::Start | Word::Hundred | Word::Thousand) {
                break;
            }
            group += value;
            last = Word::Tens;
        } else if word == "hundred" {
            // "nineteen hundred" is fine, "one hundred twenty hundred" is not
            if !matches!(last, Word::Unit | Word::Tens) || group >= 100 {
                break;
            }
            group = if group == 0 { 100 } else { group * 100 };
            last = Word::Hundred;
        } else if word == "thousand" {
            if !matches!(last, Word::Unit | Word::Tens | Word::Hundred) || thousands > 0 {
                break;
            }
            thousands = if group == 0 { 1000 } else { group * 1000 };
            group = 0;
            last = Word::Thousand;
        } else if word == "and" && matches!(last, Word::Hundred | Word::Thousand) {
            // "one hundred and five": only when a number word follows
            let follows = tokens
                .get(start + used + 1)
                .map(|t| t.as_ref())
                .is_some_and(|w| tens_value(w).is_some() || unit_value(w).is_some_and(|v| v > 0));
            if !follows {
                break;
            }
        } else {
            break;
        }
        used += 1;
    }

    (used > 0).then_some((thousands + group, used))
}
