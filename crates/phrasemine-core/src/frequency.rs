//! Word frequency aggregation.
//!
//! Turns clean text into a sentence list and a word -> count map. Each
//! sentence is processed on its own: a tagging or lemmatization failure
//! drops that sentence's words and is logged, and the rest of the text
//! still counts. Only invalid input or a segmentation failure aborts.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterResult, AnalysisError, AnalysisResult};
use crate::nlp::{AnalysisContext, WordCategory};
use crate::ranking;
use crate::text::collapse_whitespace;

/// Minimum trimmed input length, in characters.
pub const MIN_INPUT_CHARS: usize = 10;

/// Options for [`aggregate_frequency`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FrequencyOptions {
    /// Drop words in the context's stop-word set.
    pub remove_stopwords: bool,
    /// Shortest word (in characters) that is counted.
    pub min_word_length: usize,
    /// Reduce words to their lemma before counting.
    pub lemmatize: bool,
}

impl Default for FrequencyOptions {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            min_word_length: 2,
            lemmatize: true,
        }
    }
}

/// Word -> occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FrequencyMap(BTreeMap<String, u64>);

impl FrequencyMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `word`.
    pub fn increment(&mut self, word: impl Into<String>) {
        self.add(word, 1);
    }

    /// Count `n` occurrences of `word`.
    pub fn add(&mut self, word: impl Into<String>, n: u64) {
        *self.0.entry(word.into()).or_insert(0) += n;
    }

    /// Count for `word` (zero when absent).
    pub fn get(&self, word: &str) -> u64 {
        self.0.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no word has been counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate `(word, count)` in word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// Add every count from `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (word, count) in other.iter() {
            self.add(word, count);
        }
    }

    /// All entries, highest count first, ties by word ascending.
    pub fn ranked(&self) -> Vec<WordCount> {
        ranking::ranked(self.iter())
            .into_iter()
            .map(WordCount::from)
            .collect()
    }

    /// The `n` most frequent words.
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        ranking::top_n(self.iter(), n)
            .into_iter()
            .map(WordCount::from)
            .collect()
    }
}

impl<S: Into<String>> Extend<S> for FrequencyMap {
    fn extend<I: IntoIterator<Item = S>>(&mut self, words: I) {
        for word in words {
            self.increment(word);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut map = Self::new();
        map.extend(words);
        map
    }
}

/// One ranked word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The word (or lemma).
    pub word: String,
    /// Occurrences.
    pub count: u64,
}

impl From<(&str, u64)> for WordCount {
    fn from((word, count): (&str, u64)) -> Self {
        Self {
            word: word.to_string(),
            count,
        }
    }
}

/// A sentence whose words were not counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedSentence {
    /// Position in [`FrequencyReport::sentences`].
    pub index: usize,
    /// Why processing failed.
    pub reason: String,
}

/// Result of [`aggregate_frequency`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FrequencyReport {
    /// Every segmented sentence, in order, including skipped ones.
    pub sentences: Vec<String>,
    /// Word counts over all successfully processed sentences.
    pub frequencies: FrequencyMap,
    /// Sentences dropped after a per-sentence failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSentence>,
}

/// Segment `text`, count its words, and return both.
///
/// # Errors
///
/// [`AnalysisError::Input`] when the trimmed text is shorter than
/// [`MIN_INPUT_CHARS`]; [`AnalysisError::Segmentation`] when the segmenter
/// fails. Per-sentence failures are recorded in
/// [`FrequencyReport::skipped`] instead.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn aggregate_frequency(
    text: &str,
    ctx: &AnalysisContext,
    options: &FrequencyOptions,
) -> AnalysisResult<FrequencyReport> {
    let length = text.trim().chars().count();
    if length < MIN_INPUT_CHARS {
        return Err(AnalysisError::Input {
            length,
            minimum: MIN_INPUT_CHARS,
        });
    }

    let collapsed = collapse_whitespace(text);
    let sentences = ctx
        .segment(&collapsed)
        .map_err(AnalysisError::Segmentation)?;

    let mut frequencies = FrequencyMap::new();
    let mut skipped = Vec::new();

    for (index, sentence) in sentences.iter().enumerate() {
        match sentence_words(sentence, ctx, options) {
            Ok(words) => frequencies.extend(words),
            Err(error) => {
                tracing::warn!(sentence = index, stage = error.stage, %error, "skipping sentence");
                skipped.push(SkippedSentence {
                    index,
                    reason: error.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        sentences = sentences.len(),
        words = frequencies.len(),
        skipped = skipped.len(),
        "frequency aggregation complete"
    );

    Ok(FrequencyReport {
        sentences,
        frequencies,
        skipped,
    })
}

/// The counted word forms of one sentence.
fn sentence_words(
    sentence: &str,
    ctx: &AnalysisContext,
    options: &FrequencyOptions,
) -> AdapterResult<Vec<String>> {
    let words: Vec<String> = ctx
        .tokenize(sentence)?
        .iter()
        .map(|token| clean_token(token))
        .filter(|word| is_valid_word(word, options.min_word_length))
        .filter(|word| !(options.remove_stopwords && ctx.stopwords().contains(word)))
        .collect();

    if words.is_empty() || !options.lemmatize {
        return Ok(words);
    }

    ctx.tag(&words)?
        .into_iter()
        .map(|token| match WordCategory::from_penn(&token.tag) {
            Some(category) => ctx.lemmatize(&token.surface, category),
            None => Ok(token.surface),
        })
        .collect()
}

/// Lowercase a token and strip ASCII punctuation from it.
pub fn clean_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether a cleaned token is non-empty, long enough and free of digits.
pub fn is_valid_word(word: &str, min_length: usize) -> bool {
    !word.is_empty()
        && word.chars().count() >= min_length && !word.chars().any(char::is_numeric)
}

/// The `n` most frequent words in `map`.
pub fn top_words(map: &FrequencyMap, n: usize) -> Vec<WordCount> {
    map.top(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;
    use crate::nlp::{LexiconTagger, PosTagger, SentenceSegmenter, TaggedToken};
    use proptest::prelude::*;

    struct FailOnWord(&'static str);

    impl PosTagger for FailOnWord {
        fn tag(&self, tokens: &[String]) -> AdapterResult<Vec<TaggedToken>> {
            if tokens.iter().any(|t| t == self.0) {
                return Err(AdapterError::new("tag", format!("cannot tag {}", self.0)));
            }
            LexiconTagger::new().tag(tokens)
        }
    }

    struct BrokenSegmenter;

    impl SentenceSegmenter for BrokenSegmenter {
        fn segment(&self, _text: &str) -> AdapterResult<Vec<String>> {
            Err(AdapterError::new("segment", "resource missing"))
        }
    }

    fn plain() -> FrequencyOptions {
        FrequencyOptions {
            remove_stopwords: true,
            min_word_length: 2,
            lemmatize: false,
        }
    }

    #[test]
    fn rejects_short_input() {
        let err = aggregate_frequency("hi", &AnalysisContext::builtin(), &plain()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::Input {
                length: 2,
                minimum: 10
            }
        ));
    }

    #[test]
    fn rejects_whitespace_padded_short_input() {
        let result = aggregate_frequency("   tiny    ", &AnalysisContext::builtin(), &plain());
        assert!(matches!(result, Err(AnalysisError::Input { .. })));
    }

    #[test]
    fn counts_words_without_stopwords() {
        let report = aggregate_frequency(
            "The cat sat on the mat. The cat slept.",
            &AnalysisContext::builtin(),
            &plain(),
        )
        .unwrap();
        assert_eq!(report.sentences.len(), 2);
        assert_eq!(report.frequencies.get("cat"), 2);
        assert_eq!(report.frequencies.get("mat"), 1);
        assert_eq!(report.frequencies.get("the"), 0);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn keeps_stopwords_when_asked() {
        let options = FrequencyOptions {
            remove_stopwords: false,
            ..plain()
        };
        let report = aggregate_frequency(
            "The cat sat on the mat.",
            &AnalysisContext::builtin(),
            &options,
        )
        .unwrap();
        assert_eq!(report.frequencies.get("the"), 2);
    }

    #[test]
    fn drops_short_and_numeric_tokens() {
        let options = FrequencyOptions {
            min_word_length: 4,
            ..plain()
        };
        let report = aggregate_frequency(
            "Big dogs ran 42 laps in 2024 today.",
            &AnalysisContext::builtin(),
            &options,
        )
        .unwrap();
        assert_eq!(report.frequencies.get("dogs"), 1);
        assert_eq!(report.frequencies.get("laps"), 1);
        assert_eq!(report.frequencies.get("today"), 1);
        assert_eq!(report.frequencies.get("big"), 0);
        assert_eq!(report.frequencies.get("42"), 0);
        assert_eq!(report.frequencies.len(), 3);
    }

    #[test]
    fn lemmatizes_by_category() {
        let report = aggregate_frequency(
            "Children were running to the cities.",
            &AnalysisContext::builtin(),
            &FrequencyOptions::default(),
        )
        .unwrap();
        assert_eq!(report.frequencies.get("child"), 1);
        assert_eq!(report.frequencies.get("run"), 1);
        assert_eq!(report.frequencies.get("city"), 1);
    }

    #[test]
    fn sentence_without_survivors_stays_listed() {
        let report = aggregate_frequency(
            "It is what it is. Maps help travellers.",
            &AnalysisContext::builtin(),
            &plain(),
        )
        .unwrap();
        assert_eq!(report.sentences.len(), 2);
        assert_eq!(report.sentences[0], "It is what it is.");
        assert_eq!(report.frequencies.get("maps"), 1);
    }

    #[test]
    fn failed_sentence_is_skipped_not_fatal() {
        let ctx = AnalysisContext::builtin().with_tagger(FailOnWord("poison"));
        let report = aggregate_frequency(
            "Apples grow slowly. This poison sentence fails. Pears grow too.",
            &ctx,
            &FrequencyOptions::default(),
        )
        .unwrap();
        assert_eq!(report.sentences.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
        assert!(report.skipped[0].reason.contains("cannot tag poison"));
        assert_eq!(report.frequencies.get("apple"), 1);
        assert_eq!(report.frequencies.get("pear"), 1);
        assert_eq!(report.frequencies.get("grow"), 2);
        assert_eq!(report.frequencies.get("sentence"), 0);
    }

    #[test]
    fn segmentation_failure_aborts() {
        let ctx = AnalysisContext::builtin().with_segmenter(BrokenSegmenter);
        let err = aggregate_frequency("Long enough input text.", &ctx, &plain()).unwrap_err();
        assert!(matches!(err, AnalysisError::Segmentation(_)));
    }

    #[test]
    fn clean_token_strips_punctuation() {
        assert_eq!(clean_token("Don't"), "dont");
        assert_eq!(clean_token("bi-directional"), "bidirectional");
        assert_eq!(clean_token("."), "");
    }

    #[test]
    fn valid_words() {
        assert!(is_valid_word("map", 2));
        assert!(!is_valid_word("a", 2));
        assert!(!is_valid_word("mp3", 2));
        assert!(!is_valid_word("", 0));
        assert!(is_valid_word("a", 0));
    }

    #[test]
    fn zero_min_length_skips_punctuation_tokens() {
        let options = FrequencyOptions {
            min_word_length: 0,
            ..plain()
        };
        let report = aggregate_frequency(
            "Cats run fast. Dogs bark loudly!",
            &AnalysisContext::builtin(),
            &options,
        )
        .unwrap();
        assert_eq!(report.frequencies.get(""), 0);
        assert_eq!(report.frequencies.get("cats"), 1);
        assert_eq!(report.frequencies.get("loudly"), 1);
    }

    #[test]
    fn top_words_tie_break() {
        let map: FrequencyMap = ["pear", "apple", "fig", "fig"].into_iter().collect();
        let top = top_words(&map, 2);
        assert_eq!(top[0].word, "fig");
        assert_eq!(top[1].word, "apple");
    }

    proptest! {
        #[test]
        fn merge_equals_counting_everything(
            left in prop::collection::vec("[a-e]{1,3}", 0..40),
            right in prop::collection::vec("[a-e]{1,3}", 0..40),
        ) {
            let mut merged: FrequencyMap = left.iter().cloned().collect();
            merged.merge(&right.iter().cloned().collect());
            let whole: FrequencyMap = left.iter().chain(right.iter()).cloned().collect();
            prop_assert_eq!(merged, whole);
        }
    }
}
