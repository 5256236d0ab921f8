//! Text Normalization
//!
//! Turns a raw speech transcript into the token stream the assembler scans.

use crate::error::{CalcError, CalcResult};
use lazy_static::lazy_static;
use regex::{NoExpand, Regex};
use std::collections::HashMap;
use tracing::debug;

/// Phrases that carry no arithmetic meaning ("=" never survives cleaning)
pub const FILLER_PHRASES: &[&str] = &[
    "what is",
    "calculate",
    "compute",
    "equals",
    "answer",
    "please",
    "hey",
    "ok",
];

/// The only symbol filler; cleaning removes it with the other punctuation
const EQUALS_FILLER: char = '=';

lazy_static! {
    static ref DISALLOWED_CHARS: Regex =
        Regex::new(r"[^a-z0-9.%\s]+").expect("static pattern is valid");
    static ref DEFAULT_FILLERS: Regex =
        phrase_regex(FILLER_PHRASES.iter().copied()).expect("static fillers are valid");
}

/// Build a whole-word, whitespace-tolerant alternation of phrases
fn phrase_regex<'a>(phrases: impl Iterator<Item = &'a str>) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = phrases
        .map(phrase_pattern)
        .filter(|p| !p.is_empty())
        .collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
}

fn phrase_pattern(phrase: &str) -> String {
    clean_text(phrase)
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

/// Lower-case, split hyphenated words and blank out anything that is not
/// a letter, digit, '.', '%' or whitespace
fn clean_text(text: &str) -> String {
    let lowered = text.to_lowercase().replace('-', " ");
    DISALLOWED_CHARS.replace_all(&lowered, " ").into_owned()
}

/// Normalizes spoken text into arithmetic-friendly tokens
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    /// Manual corrections from config, longest phrase first
    corrections: Vec<(Regex, String)>,
    fillers: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            corrections: Vec::new(),
            fillers: DEFAULT_FILLERS.clone(),
        }
    }
}

impl TextNormalizer {
    /// Create a normalizer with user corrections and extra filler phrases
    pub fn new(
        corrections: &HashMap<String, String>,
        extra_fillers: &[String],
    ) -> CalcResult<Self> {
        let fillers = if extra_fillers.iter().all(|f| f.trim().is_empty()) {
            DEFAULT_FILLERS.clone()
        } else {
            phrase_regex(
                FILLER_PHRASES
                    .iter()
                    .copied()
                    .chain(extra_fillers.iter().map(String::as_str)),
            )
            .map_err(|e| CalcError::Config(format!("invalid filler phrase: {}", e)))?
        };

        let mut pairs: Vec<(&String, &String)> = corrections.iter().collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

        let mut compiled = Vec::with_capacity(pairs.len());
        for (from, to) in pairs {
            let pattern = phrase_pattern(from);
            if pattern.is_empty() {
                continue;
            }
            let re = Regex::new(&format!(r"\b{}\b", pattern))
                .map_err(|e| CalcError::Config(format!("invalid correction '{}': {}", from, e)))?;
            compiled.push((re, clean_text(to)));
        }

        Ok(Self {
            corrections: compiled,
            fillers,
        })
    }

    /// Lower-case and strip punctuation, keeping every word
    pub fn clean(&self, text: &str) -> String {
        clean_text(text)
    }

    /// True when nothing at all was said: no words, no digits and no "=".
    ///
    /// "=" is blanked by cleaning but still counts as a spoken filler.
    pub fn is_blank(&self, text: &str) -> bool {
        !text.contains(EQUALS_FILLER) && self.clean(text).trim().is_empty()
    }

    /// Normalize a transcript into tokens
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let mut result = self.clean(text);

        for (from, to) in &self.corrections {
            result = from.replace_all(&result, NoExpand(to)).into_owned();
        }

        let result = self.strip_fillers(&result);
        let tokens: Vec<String> = result.split_whitespace().map(str::to_string).collect();
        debug!("Normalized '{}' -> {:?}", text, tokens);
        tokens
    }

    /// Remove filler phrases until none are left
    fn strip_fillers(&self, text: &str) -> String {
        let mut current = text.to_string();
        loop {
            let next = self.fillers.replace_all(&current, " ").into_owned();
            if next == current {
                return current;
            }
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> Vec<String> {
        TextNormalizer::default().normalize(text)
    }

    #[test]
    fn test_normalize_basic() {
        assert_eq!(normalize("FIVE Plus Seven"), vec!["five", "plus", "seven"]);
    }

    #[test]
    fn test_hyphens_split_words() {
        assert_eq!(normalize("twenty-one"), vec!["twenty", "one"]);
    }

    #[test]
    fn test_punctuation_becomes_space() {
        assert_eq!(normalize("five,seven!"), vec!["five", "seven"]);
        assert_eq!(normalize("3.5 + 50%"), vec!["3.5", "50%"]);
    }

    #[test]
    fn test_fillers_removed() {
        assert_eq!(
            normalize("Hey, what is twenty one minus four, please?"),
            vec!["twenty", "one", "minus", "four"]
        );
        assert_eq!(normalize("calculate 2 = ?"), vec!["2"]);
    }

    #[test]
    fn test_fillers_are_whole_words() {
        assert_eq!(normalize("okay token"), vec!["okay", "token"]);
        assert_eq!(normalize("what   is five"), vec!["five"]);
    }

    #[test]
    fn test_only_fillers_gives_no_tokens() {
        assert!(normalize("ok hey please calculate").is_empty());
        assert!(normalize("").is_empty());
    }

    #[test]
    fn test_filler_exposed_by_removal_is_removed() {
        assert!(normalize("what calculate is").is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize("What is ninety-nine divided by 3.5, OK?");
        let second = normalize(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_corrections() {
        let mut corrections = HashMap::new();
        corrections.insert("for".to_string(), "four".to_string());
        corrections.insert("to".to_string(), "two".to_string());
        let normalizer = TextNormalizer::new(&corrections, &[]).expect("valid corrections");
        assert_eq!(
            normalizer.normalize("for plus to total"),
            vec!["four", "plus", "two", "total"]
        );
    }

    #[test]
    fn test_extra_fillers() {
        let extra = vec!["Tell me".to_string()];
        let normalizer = TextNormalizer::new(&HashMap::new(), &extra).expect("valid fillers");
        assert_eq!(normalizer.normalize("tell   me five"), vec!["five"]);
        assert_eq!(normalizer.normalize("ok five"), vec!["five"]);
    }

    #[test]
    fn test_clean_keeps_fillers() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.clean("OK!").trim(), "ok");
        assert!(normalizer.clean("?!").trim().is_empty());
    }

    #[test]
    fn test_is_blank() {
        let normalizer = TextNormalizer::default();
        assert!(normalizer.is_blank(""));
        assert!(normalizer.is_blank("  ?!, "));
        assert!(!normalizer.is_blank("="));
        assert!(!normalizer.is_blank("= ="));
        assert!(!normalizer.is_blank("ok"));
    }
}
