//! Lexicon and suffix based POS tagger.
//!
//! Tags in two passes. The lexical pass looks each token up in the
//! closed-class lexicon, the irregular verb table, and the common verb list,
//! then falls back to suffix rules. The context pass revisits ambiguous tags
//! using the neighbouring tags (`the look` vs `look at`, `it's` vs `John's`).

use super::{PosTagger, TaggedToken};
use crate::dictionaries::irregular_verbs::{self, IrregularForm};
use crate::dictionaries::lexicon::closed_class_tag;
use crate::error::{AdapterError, AdapterResult};
use crate::word_lists::{
    ADJECTIVE_SUFFIX_NOUNS, COMMON_VERBS, ING_NOUNS, LY_EXCEPTIONS, NUMBER_WORDS,
    SINGULAR_S_NOUNS,
};

/// Suffixes that mark an adjective.
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ful", "ous", "ive", "able", "ible", "less", "ical", "ic", "ish", "al",
];

/// Forms of "be" and "have" that turn a following past form into a participle.
const PERFECT_OR_PASSIVE: &[&str] = &[
    "be", "is", "are", "am", "was", "were", "been", "being", "'s", "'re", "'m", "have", "has",
    "had", "having", "'ve", "get", "gets", "got",
];

/// Forms of "be" that license an existential "there".
const BE_FORMS: &[&str] = &["is", "are", "was", "were", "'s", "be", "been"];

/// Rule-based Penn Treebank tagger.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    /// Create a tagger.
    pub const fn new() -> Self {
        Self
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> AdapterResult<Vec<TaggedToken>> {
        if let Some(position) = tokens.iter().position(|t| t.trim().is_empty()) {
            return Err(AdapterError::new(
                "tag",
                format!("empty token at position {position}"),
            ));
        }

        let mut tags: Vec<&'static str> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let sentence_start = tags
                .last()
                .is_none_or(|prev| matches!(*prev, "." | ":" | "(" | "``"));
            tags.push(lexical_tag(token, sentence_start));
        }

        resolve_context(tokens, &mut tags);

        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken::new(token.as_str(), tag))
            .collect())
    }
}

/// Context-free tag for one token.
fn lexical_tag(token: &str, sentence_start: bool) -> &'static str {
    if let Some(tag) = punctuation_tag(token) {
        return tag;
    }

    let lower = token.to_lowercase();
    let word = lower.as_str();

    if is_number(word) || NUMBER_WORDS.contains(word) {
        return "CD";
    }
    match word {
        "'s" => return "POS",
        "her" => return "PRP",
        "there" => return "EX",
        "'ll" | "'d" => return "MD",
        _ => {}
    }
    if let Some(tag) = closed_class_tag(word) {
        return tag;
    }
    if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
        return "NNP";
    }
    if let Some((_, form)) = irregular_verbs::lookup(word) {
        return match form {
            IrregularForm::Base => "VB",
            IrregularForm::Past | IrregularForm::PastOrParticiple => "VBD",
            IrregularForm::Participle => "VBN",
        };
    }
    if COMMON_VERBS.contains(word) {
        return "VB";
    }
    suffix_tag(word)
}

fn punctuation_tag(token: &str) -> Option<&'static str> {
    if !token.chars().all(|c| c.is_ascii_punctuation()) {
        return None;
    }
    Some(match token {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "-" | "--" | "..." => ":",
        "(" | "[" | "{" => "(",
        ")" | "]" | "}" => ")",
        "\"" | "``" => "``",
        "'" | "''" => "''",
        "$" => "$",
        "#" => "#",
        _ => "SYM",
    })
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '/' | ':' | '-'))
}

/// Tag an open-class word from its spelling.
fn suffix_tag(word: &str) -> &'static str {
    if let Some(tag) = LY_EXCEPTIONS.get(word) {
        return *tag;
    }
    if ING_NOUNS.contains(word) || ADJECTIVE_SUFFIX_NOUNS.contains(word) {
        return "NN";
    }

    let len = word.chars().count();
    if len > 3 && word.ends_with("ly") {
        return "RB";
    }
    if len > 4 && word.ends_with("ing") {
        return "VBG";
    }
    if len > 3 && word.ends_with("ed") {
        return "VBD";
    }
    if let Some(tag) = comparative_tag(word) {
        return tag;
    }
    if ADJECTIVE_SUFFIXES
        .iter()
        .any(|suffix| len > suffix.len() + 2 && word.ends_with(suffix))
    {
        return "JJ";
    }
    if len > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
        && !SINGULAR_S_NOUNS.contains(word)
    {
        return "NNS";
    }
    "NN"
}

/// `JJR`/`JJS` for inflected forms of known adjectives (`bigger`, `widest`).
fn comparative_tag(word: &str) -> Option<&'static str> {
    let (stem, tag) = if let Some(stem) = word.strip_suffix("est") {
        (stem, "JJS")
    } else if let Some(stem) = word.strip_suffix("er") {
        (stem, "JJR")
    } else {
        return None;
    };
    super::lemmatizer::adjective_candidates(stem)
        .iter()
        .any(|candidate| closed_class_tag(candidate) == Some("JJ"))
        .then_some(tag)
}

/// Revisit ambiguous tags using their neighbours.
fn resolve_context(tokens: &[String], tags: &mut [&'static str]) {
    for i in 0..tokens.len() {
        let word = tokens[i].to_lowercase();
        let prev = i.checked_sub(1).map(|p| tags[p]);
        let prev_word = i.checked_sub(1).map(|p| tokens[p].to_lowercase());
        let next = tags.get(i + 1).copied();
        let next_word = tokens.get(i + 1).map(|t| t.to_lowercase());

        tags[i] = match (tags[i], word.as_str()) {
            (_, "'s") => match prev {
                Some("PRP" | "EX" | "WP" | "WDT" | "DT") => "VBZ",
                _ => "POS",
            },
            (_, "her") => match next {
                Some(tag) if tag.starts_with('N') || tag.starts_with('J') => "PRP$",
                _ => "PRP",
            },
            (_, "there") => match next_word.as_deref() {
                Some(following) if BE_FORMS.contains(&following) => "EX",
                _ => "RB",
            },
            (_, "that") => match next {
                Some("PRP" | "EX" | "NNP") => "IN",
                _ => "DT",
            },
            ("VB", _) => match prev {
                Some("DT" | "PRP$" | "JJ" | "JJR" | "JJS" | "POS" | "CD" | "IN") => "NN",
                Some("PRP" | "NNS" | "WDT" | "WP" | "EX") if word != "be" => "VBP",
                _ => "VB",
            },
            ("VBD", _) => {
                let auxiliary = prev_word
                    .as_deref()
                    .is_some_and(|w| PERFECT_OR_PASSIVE.contains(&w))
                    || (prev == Some("RB")
                        && i >= 2
                        && PERFECT_OR_PASSIVE.contains(&tokens[i - 2].to_lowercase().as_str()));
                if auxiliary { "VBN" } else { "VBD" }
            }
            ("NNS", _) => {
                let verb = verb_base_of_s_form(&word);
                match prev {
                    Some("NN" | "NNP" | "PRP" | "WDT" | "WP") if verb => "VBZ",
                    _ => "NNS",
                }
            }
            ("NN", _) if prev == Some("MD") => "VB",
            (tag, _) => tag,
        };
    }
}

/// Whether an `-s` word is the third-person form of a known verb.
fn verb_base_of_s_form(word: &str) -> bool {
    let candidates = [
        word.strip_suffix("ies").map(|s| format!("{s}y")),
        word.strip_suffix("es").map(str::to_string),
        word.strip_suffix('s').map(str::to_string),
    ];
    candidates.into_iter().flatten().any(|base| {
        COMMON_VERBS.contains(base.as_str())
            || matches!(
                irregular_verbs::lookup(&base),
                Some((_, IrregularForm::Base))
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        let tokens = crate::nlp::tokenizer::tokenize(text);
        LexiconTagger::new()
            .tag(&tokens)
            .unwrap()
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn imperative_verb_and_preposition() {
        assert_eq!(tags("look at the map"), vec!["VB", "IN", "DT", "NN"]);
    }

    #[test]
    fn verb_after_determiner_is_noun() {
        assert_eq!(tags("take a look"), vec!["VB", "DT", "NN"]);
    }

    #[test]
    fn modal_verb_adverb() {
        assert_eq!(tags("you should work quickly"), vec!["PRP", "MD", "VB", "RB"]);
    }

    #[test]
    fn possessive_vs_contraction() {
        assert_eq!(tags("it's John's"), vec!["PRP", "VBZ", "NNP", "POS"]);
    }

    #[test]
    fn her_as_possessive_and_object() {
        assert_eq!(tags("in her house"), vec!["IN", "PRP$", "NN"]);
        assert_eq!(tags("I saw her"), vec!["PRP", "VBD", "PRP"]);
    }

    #[test]
    fn participle_after_auxiliary() {
        assert_eq!(tags("it was finished"), vec!["PRP", "VBD", "VBN"]);
        assert_eq!(tags("they have already walked"), vec!["PRP", "VBP", "RB", "VBN"]);
    }

    #[test]
    fn third_person_verb_vs_plural() {
        assert_eq!(tags("she works"), vec!["PRP", "VBZ"]);
        assert_eq!(tags("the works"), vec!["DT", "NNS"]);
    }

    #[test]
    fn numbers_and_punctuation() {
        assert_eq!(tags("3 books ."), vec!["CD", "NNS", "."]);
        assert_eq!(tags("seven , ;"), vec!["CD", ",", ":"]);
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(tags("running"), vec!["VBG"]);
        assert_eq!(tags("beautiful"), vec!["JJ"]);
        assert_eq!(tags("happiness"), vec!["NN"]);
        assert_eq!(tags("family"), vec!["NN"]);
        assert_eq!(tags("bigger"), vec!["JJR"]);
    }

    #[test]
    fn existential_there() {
        assert_eq!(tags("there is"), vec!["EX", "VBZ"]);
        assert_eq!(tags("go there"), vec!["VB", "RB"]);
    }

    #[test]
    fn proper_noun_mid_sentence() {
        assert_eq!(tags("we visited Paris"), vec!["PRP", "VBD", "NNP"]);
    }

    #[test]
    fn rejects_empty_token() {
        let err = LexiconTagger::new()
            .tag(&["ok".to_string(), " ".to_string()])
            .unwrap_err();
        assert_eq!(err.stage, "tag");
    }
}
