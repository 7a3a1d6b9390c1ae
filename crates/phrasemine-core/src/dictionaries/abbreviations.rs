//! Abbreviations that keep their trailing period.
//!
//! Used by the sentence segmenter (no boundary after `Dr.`) and by the word
//! tokenizer (`Dr.` stays one token).

use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercase abbreviations without their final period.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Forms of address
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "sr", "jr", "st", "capt", "col", "gen", "lt",
        "sgt", "hon", "gov", "pres", "sen", "rep",
    ]);

    // Latin and reference shorthand
    set.extend([
        "etc", "vs", "e.g", "i.e", "cf", "viz", "al", "ibid", "approx", "fig", "vol", "no", "pp",
        "ch", "ed", "eds", "est",
    ]);

    // Calendar
    set.extend([
        "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
        "a.m", "p.m",
    ]);

    // Organizations and places
    set.extend([
        "inc", "ltd", "co", "corp", "dept", "univ", "ave", "rd", "blvd", "u.s", "u.k", "u.s.a",
    ]);

    set
});

/// Check whether `word` (without its final period) is a known abbreviation.
pub fn is_abbreviation(word: &str) -> bool {
    let lower = word.trim_end_matches('.').to_lowercase();
    ABBREVIATIONS.contains(lower.as_str())
}

/// Check whether `word` looks like initials (`J.`, `U.S.`, `J.R.R.`).
pub fn is_initialism(word: &str) -> bool {
    let core = word.trim_end_matches('.');
    !core.is_empty()
        && core
            .split('.')
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_abbreviations() {
        assert!(is_abbreviation("Dr"));
        assert!(is_abbreviation("dr."));
        assert!(is_abbreviation("e.g"));
        assert!(!is_abbreviation("dog"));
    }

    #[test]
    fn initials() {
        assert!(is_initialism("J."));
        assert!(is_initialism("U.S."));
        assert!(is_initialism("J.R.R"));
        assert!(!is_initialism("USA"));
        assert!(!is_initialism("3.14"));
        assert!(!is_initialism(""));
    }
}
