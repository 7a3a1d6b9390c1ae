//! Rule-based lemmatization.
//!
//! Irregular forms come from lookup tables. Regular inflections are undone
//! by suffix rules; for verbs and adjectives each candidate base is checked
//! against the known word lists before a spelling heuristic is trusted.

use super::{Lemmatizer, WordCategory};
use crate::dictionaries::irregular_verbs::{self, IrregularForm};
use crate::dictionaries::lexicon::closed_class_tag;
use crate::error::AdapterResult;
use crate::word_lists::{COMMON_VERBS, IRREGULAR_PLURALS, SINGULAR_S_NOUNS};

/// Suffix-rule lemmatizer for English.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    /// Create a lemmatizer.
    pub const fn new() -> Self {
        Self
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, category: WordCategory) -> AdapterResult<String> {
        Ok(match category {
            WordCategory::Noun => lemmatize_noun(word),
            WordCategory::Verb => lemmatize_verb(word),
            WordCategory::Adjective => lemmatize_adjective(word),
            WordCategory::Adverb => word.to_string(),
        })
    }
}

/// Singular form of a noun.
pub fn lemmatize_noun(word: &str) -> String {
    if let Some(singular) = IRREGULAR_PLURALS.get(word) {
        return (*singular).to_string();
    }
    if word.len() <= 3
        || SINGULAR_S_NOUNS.contains(word)
        || word.ends_with("ss")
        || word.ends_with("us")
        || word.ends_with("is")
    {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").filter(|s| s.len() > 1) {
        return format!("{stem}y");
    }
    for sibilant in ["ches", "shes", "sses", "xes", "zes"] {
        if word.ends_with(sibilant) {
            return word[..word.len() - 2].to_string();
        }
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

/// Base form of a verb.
pub fn lemmatize_verb(word: &str) -> String {
    match word {
        "am" | "is" | "are" | "was" | "were" | "been" | "being" | "'s" | "'re" | "'m" => {
            return "be".to_string();
        }
        "has" | "had" | "having" | "'ve" => return "have".to_string(),
        "does" | "did" | "done" | "doing" => return "do".to_string(),
        _ => {}
    }
    if let Some(base) = irregular_verbs::base_form(word) {
        return base.to_string();
    }
    if COMMON_VERBS.contains(word) {
        return word.to_string();
    }

    let candidates = verb_candidates(word);
    candidates
        .iter()
        .find(|candidate| is_known_verb(candidate))
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| word.to_string())
}

/// Positive form of an adjective; unknown comparatives pass through.
pub fn lemmatize_adjective(word: &str) -> String {
    match word {
        "better" | "best" => return "good".to_string(),
        "worse" | "worst" => return "bad".to_string(),
        "further" | "furthest" | "farther" | "farthest" => return "far".to_string(),
        _ => {}
    }
    let stem = word
        .strip_suffix("est")
        .or_else(|| word.strip_suffix("er"));
    stem.and_then(|stem| {
        adjective_candidates(stem)
            .into_iter()
            .find(|candidate| closed_class_tag(candidate) == Some("JJ"))
    })
    .unwrap_or_else(|| word.to_string())
}

/// Possible positive forms for a comparative/superlative stem.
///
/// `bigg` -> `bigg`, `bigge`, `big`; `easi` -> `easy`.
pub(crate) fn adjective_candidates(stem: &str) -> Vec<String> {
    let mut candidates = vec![stem.to_string(), format!("{stem}e")];
    if let Some(single) = undouble(stem) {
        candidates.push(single);
    }
    if let Some(base) = stem.strip_suffix('i') {
        candidates.push(format!("{base}y"));
    }
    candidates
}

/// Candidate bases for an inflected verb, best guess first.
fn verb_candidates(word: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    if let Some(stem) = word.strip_suffix("ied").or_else(|| word.strip_suffix("ies")) {
        candidates.push(format!("{stem}y"));
    }

    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix).filter(|s| s.len() > 1) {
            if let Some(single) = undouble(stem) {
                candidates.push(single);
            }
            if restores_silent_e(stem) {
                candidates.push(format!("{stem}e"));
                candidates.push(stem.to_string());
            } else {
                candidates.push(stem.to_string());
                candidates.push(format!("{stem}e"));
            }
        }
    }

    if let Some(stem) = word.strip_suffix("es")
        && ["ch", "sh", "ss", "x", "z", "o"].iter().any(|s| stem.ends_with(s))
    {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s').filter(|s| !s.ends_with('s')) {
        candidates.push(stem.to_string());
    }

    candidates
}

fn is_known_verb(word: &str) -> bool {
    COMMON_VERBS.contains(word)
        || matches!(
            irregular_verbs::lookup(word),
            Some((_, IrregularForm::Base))
        )
}

/// `runn` -> `run`, but not `fall`, `miss`, `buzz`, `stuff`.
fn undouble(stem: &str) -> Option<String> {
    let mut chars = stem.chars().rev();
    let last = chars.next()?;
    let before = chars.next()?;
    (last == before && !matches!(last, 'l' | 's' | 'z' | 'f' | 'e' | 'o'))
        .then(|| stem[..stem.len() - last.len_utf8()].to_string())
}

/// Stems that usually lost a final `e` (`produc`, `driv`, `realiz`, `updat`).
fn restores_silent_e(stem: &str) -> bool {
    let mut chars = stem.chars().rev();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('v' | 'z' | 'c'), _, _) => true,
        (Some('t'), Some('a'), Some(c)) => !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nouns() {
        assert_eq!(lemmatize_noun("maps"), "map");
        assert_eq!(lemmatize_noun("cities"), "city");
        assert_eq!(lemmatize_noun("boxes"), "box");
        assert_eq!(lemmatize_noun("churches"), "church");
        assert_eq!(lemmatize_noun("children"), "child");
        assert_eq!(lemmatize_noun("glass"), "glass");
        assert_eq!(lemmatize_noun("status"), "status");
        assert_eq!(lemmatize_noun("news"), "news");
        assert_eq!(lemmatize_noun("map"), "map");
    }

    #[test]
    fn verbs() {
        assert_eq!(lemmatize_verb("running"), "run");
        assert_eq!(lemmatize_verb("went"), "go");
        assert_eq!(lemmatize_verb("was"), "be");
        assert_eq!(lemmatize_verb("looked"), "look");
        assert_eq!(lemmatize_verb("studies"), "study");
        assert_eq!(lemmatize_verb("hoping"), "hope");
        assert_eq!(lemmatize_verb("stopped"), "stop");
        assert_eq!(lemmatize_verb("watches"), "watch");
        assert_eq!(lemmatize_verb("walks"), "walk");
    }

    #[test]
    fn unknown_verbs_use_spelling_heuristics() {
        assert_eq!(lemmatize_verb("synthesizing"), "synthesize");
        assert_eq!(lemmatize_verb("grabbed"), "grab");
        assert_eq!(lemmatize_verb("tweeted"), "tweet");
    }

    #[test]
    fn adjectives() {
        assert_eq!(lemmatize_adjective("better"), "good");
        assert_eq!(lemmatize_adjective("bigger"), "big");
        assert_eq!(lemmatize_adjective("easiest"), "easy");
        assert_eq!(lemmatize_adjective("larger"), "large");
        assert_eq!(lemmatize_adjective("beautiful"), "beautiful");
    }

    #[test]
    fn adverbs_unchanged() {
        let lemma = RuleLemmatizer::new()
            .lemmatize("quickly", WordCategory::Adverb)
            .unwrap();
        assert_eq!(lemma, "quickly");
    }
}
