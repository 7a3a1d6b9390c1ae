//! Rule-based sentence segmentation.
//!
//! Scans for `.`, `!`, and `?` and decides from the surrounding context
//! whether each one ends a sentence. Abbreviations, initials, decimal
//! numbers, ellipses, URLs, and email addresses do not.

use regex::Regex;
use std::sync::LazyLock;

use super::SentenceSegmenter;
use crate::dictionaries::abbreviations::{is_abbreviation, is_initialism};
use crate::error::AdapterResult;

/// Regex for a decimal number at the end of the current sentence.
static TRAILING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d*$").expect("valid regex"));

/// Regex for a URL or email address at the end of the current sentence.
static TRAILING_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:(?:https?://|www\.)\S*|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]*)$")
        .expect("valid regex")
});

/// Sentence segmenter driven by punctuation and local context.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    /// Create a segmenter.
    pub const fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for RuleSegmenter {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn segment(&self, text: &str) -> AdapterResult<Vec<String>> {
        Ok(split_sentences(text))
    }
}

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);

        if matches!(ch, '.' | '!' | '?') {
            // Absorb a run of terminators and closing quotes/brackets.
            while let Some(&next) = chars.get(i + 1) {
                if matches!(next, '.' | '!' | '?' | '"' | '\'' | ')' | ']') {
                    current.push(next);
                    i += 1;
                } else {
                    break;
                }
            }

            if is_boundary(&chars, i, ch, &current) {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }

        i += 1;
    }

    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

/// Decide whether the terminator run ending at `end` closes a sentence.
fn is_boundary(chars: &[char], end: usize, terminator: char, current: &str) -> bool {
    let Some(after) = next_visible(chars, end) else {
        return true;
    };

    // A terminator glued to the next word ("e.g.x", "3.14") never splits.
    if chars.get(end + 1).is_some_and(|c| !c.is_whitespace()) {
        return false;
    }

    if terminator != '.' {
        return !after.is_lowercase();
    }

    let body = current.trim_end_matches(['"', '\'', ')', ']']);
    if body.ends_with("...") {
        return after.is_uppercase();
    }

    let word = last_word(body);
    if is_abbreviation(word) || is_initialism(word) {
        return false;
    }

    if TRAILING_DECIMAL.is_match(body) && after.is_ascii_digit() {
        return false;
    }

    if TRAILING_ADDRESS.is_match(body.trim_end_matches('.')) {
        return false;
    }

    !after.is_lowercase()
}

/// First non-whitespace character after `pos`.
fn next_visible(chars: &[char], pos: usize) -> Option<char> {
    chars[pos + 1..].iter().copied().find(|c| !c.is_whitespace())
}

/// The whitespace-delimited word ending `text`, without leading punctuation.
fn last_word(text: &str) -> &str {
    let word = text.rsplit(char::is_whitespace).next().unwrap_or(text);
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}
