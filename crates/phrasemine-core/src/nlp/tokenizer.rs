//! Treebank-style word tokenization.
//!
//! Splits on whitespace, then peels punctuation off both ends of each chunk
//! and splits English clitics (`don't` -> `do` `n't`, `it's` -> `it` `'s`).
//! Intra-word hyphens, decimal numbers, and known abbreviations stay whole.

use super::Tokenizer;
use crate::dictionaries::abbreviations::{is_abbreviation, is_initialism};
use crate::error::AdapterResult;

/// Clitic suffixes split off as their own token.
const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Whitespace-and-punctuation tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    /// Create a tokenizer.
    pub const fn new() -> Self {
        Self
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> AdapterResult<Vec<String>> {
        Ok(tokenize(text))
    }
}

/// Tokenize text into words and punctuation marks.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for chunk in text.split_whitespace() {
        split_chunk(chunk, &mut tokens);
    }
    tokens
}

fn split_chunk(chunk: &str, out: &mut Vec<String>) {
    let mut rest = chunk;

    // Leading punctuation
    while let Some(c) = rest.chars().next() {
        if !c.is_ascii_punctuation() || is_clitic(rest) {
            break;
        }
        let run = punctuation_run(rest);
        out.push(rest[..run].to_string());
        rest = &rest[run..];
    }

    // Trailing punctuation, collected in reverse
    let mut trailing = Vec::new();
    while let Some(c) = rest.chars().next_back() {
        if rest.len() > 3 && rest.ends_with("...") {
            trailing.push("...".to_string());
            rest = &rest[..rest.len() - 3];
            continue;
        }
        if !c.is_ascii_punctuation() || is_clitic(rest) {
            break;
        }
        if c == '.' && (is_abbreviation(rest) || is_initialism(rest)) {
            break;
        }
        trailing.push(c.to_string());
        rest = &rest[..rest.len() - 1];
    }

    if !rest.is_empty() {
        split_clitics(rest, out);
    }
    out.extend(trailing.into_iter().rev());
}

/// Length in bytes of the punctuation token at the start of `text`.
fn punctuation_run(text: &str) -> usize {
    if text.starts_with("...") {
        3
    } else if text.starts_with("--") {
        2
    } else {
        1
    }
}

fn is_clitic(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower == "n't" || CLITICS.contains(&lower.as_str())
}

fn split_clitics(word: &str, out: &mut Vec<String>) {
    let lower = word.to_ascii_lowercase();

    if lower == "cannot" {
        out.push(word[..3].to_string());
        out.push(word[3..].to_string());
        return;
    }

    if lower.len() > 3 && lower.ends_with("n't") {
        let split = word.len() - 3;
        out.push(word[..split].to_string());
        out.push(word[split..].to_string());
        return;
    }

    for clitic in CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let split = word.len() - clitic.len();
            out.push(word[..split].to_string());
            out.push(word[split..].to_string());
            return;
        }
    }

    out.push(word.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sentence_punctuation() {
        assert_eq!(
            tokenize("Look at the map, then go."),
            vec!["Look", "at", "the", "map", ",", "then", "go", "."]
        );
    }

    #[test]
    fn splits_clitics() {
        assert_eq!(tokenize("don't"), vec!["do", "n't"]);
        assert_eq!(tokenize("It's John's"), vec!["It", "'s", "John", "'s"]);
        assert_eq!(tokenize("we'll"), vec!["we", "'ll"]);
        assert_eq!(tokenize("cannot"), vec!["can", "not"]);
        assert_eq!(tokenize("can't"), vec!["ca", "n't"]);
    }

    #[test]
    fn keeps_hyphens_and_decimals() {
        assert_eq!(
            tokenize("a bi-directional link costs 3.14"),
            vec!["a", "bi-directional", "link", "costs", "3.14"]
        );
    }

    #[test]
    fn keeps_abbreviations() {
        assert_eq!(tokenize("Dr. Smith arrived."), vec!["Dr.", "Smith", "arrived", "."]);
        assert_eq!(tokenize("e.g. this"), vec!["e.g.", "this"]);
    }

    #[test]
    fn peels_quotes_and_brackets() {
        assert_eq!(
            tokenize("(\"quoted\")"),
            vec!["(", "\"", "quoted", "\"", ")"]
        );
    }

    #[test]
    fn ellipsis_is_one_token() {
        assert_eq!(tokenize("wait..."), vec!["wait", "..."]);
        assert_eq!(tokenize("..."), vec!["..."]);
    }

    #[test]
    fn standalone_clitic_kept() {
        assert_eq!(tokenize("John 's"), vec!["John", "'s"]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n ").is_empty());
    }
}
