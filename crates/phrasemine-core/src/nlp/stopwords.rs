//! Stop-word filtering.

use std::collections::HashSet;

use crate::word_lists::ENGLISH_STOPWORDS;

/// A case-insensitive set of words to drop before counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordSet {
    /// The NLTK English stop-word list.
    pub fn english() -> Self {
        Self::from_list(ENGLISH_STOPWORDS)
    }

    /// An empty set (no filtering).
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a set from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add more stop words.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    /// Builder form of [`extend`](Self::extend).
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(words);
        self
    }

    /// Check whether `word` is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list() {
        let stopwords = StopwordSet::english();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("The"));
        assert!(!stopwords.contains("map"));
        assert_eq!(stopwords.len(), ENGLISH_STOPWORDS.len());
    }

    #[test]
    fn extend_is_case_insensitive() {
        let stopwords = StopwordSet::empty().with_words(["Um", "uh"]);
        assert!(stopwords.contains("um"));
        assert!(stopwords.contains("UH"));
        assert_eq!(stopwords.len(), 2);
    }

    #[test]
    fn empty_filters_nothing() {
        let stopwords = StopwordSet::empty();
        assert!(stopwords.is_empty());
        assert!(!stopwords.contains("the"));
    }
}
