//! Labeled POS-sequence patterns.
//!
//! A [`PatternCatalog`] is plain data: an ordered list of exact tag
//! sequences, each with a unique label. Scanners take a catalog by
//! reference and never modify it.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::nlp::TaggedToken;

/// The built-in catalog of common English collocation patterns.
const BUILTIN_PATTERNS: &[(&[&str], &str)] = &[
    (&["VB", "IN"], "Verb+Prep"),
    (&["VB", "DT", "NN"], "Verb+Det+Noun"),
    (&["JJ", "NN"], "Adj+Noun"),
    (&["RB", "VB"], "Adv+Verb"),
    (&["NN", "IN", "NN"], "Noun+Prep+Noun"),
    (&["VB", "RB"], "Verb+Adv"),
    (&["IN", "DT", "NN"], "Prep+Det+Noun"),
    (&["NN", "NN"], "Compound Noun"),
    (&["VB", "NN"], "Verb+Noun"),
    (&["VB", "DT", "JJ", "NN"], "Verb+Det+Adj+Noun"),
    (&["JJ", "JJ", "NN"], "Adj+Adj+Noun"),
    (&["RB", "JJ"], "Adv+Adj"),
    (&["NN", "VB"], "Noun+Verb"),
    (&["VB", "PRP"], "Verb+Pronoun"),
    (&["IN", "JJ", "NN"], "Prep+Adj+Noun"),
    (&["DT", "NN", "IN", "NN"], "Det+Noun+Prep+Noun"),
    (&["MD", "VB", "RB"], "Modal+Verb+Adv"),
    (&["NN", "IN", "DT", "NN"], "Noun+Prep+Det+Noun"),
    (&["VB", "TO", "VB"], "Verb+To+Verb"),
    (&["VBG", "NN"], "Gerund+Noun"),
    (&["VBN", "IN"], "PastPart+Prep"),
    (&["CD", "NNS"], "Number+PluralNoun"),
    (&["JJ", "CC", "JJ"], "Adj+Conj+Adj"),
    (&["VB", "PRP", "RB"], "Verb+Pronoun+Adv"),
    (&["RB", "RB", "JJ"], "Adv+Adv+Adj"),
    (&["DT", "JJ", "NN", "VBZ"], "Det+Adj+Noun+Verb"),
    (&["PRP", "MD", "VB", "RB"], "Pron+Modal+Verb+Adv"),
    (&["NN", "VBZ", "JJ"], "Noun+Verb+Adj"),
    (&["IN", "PRP$", "NN"], "Prep+Possessive+Noun"),
];

/// An exact tag sequence with a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Pattern {
    /// Tags that must appear consecutively, compared literally.
    pub tags: Vec<String>,
    /// Human-readable label, unique within a catalog.
    pub label: String,
}

impl Pattern {
    /// Create a pattern.
    pub fn new<I, S>(tags: I, label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the pattern has no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Whether `tokens` starts with this pattern's tags.
    pub fn matches_prefix(&self, tokens: &[TaggedToken]) -> bool {
        tokens.len() >= self.tags.len()
            && self
                .tags
                .iter()
                .zip(tokens)
                .all(|(tag, token)| *tag == token.tag)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.label.trim().is_empty() {
            return Err(CatalogError::EmptyLabel);
        }
        if self.tags.is_empty() {
            return Err(CatalogError::EmptyPattern(self.label.clone()));
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(CatalogError::EmptyTag(self.label.clone()));
        }
        Ok(())
    }
}

/// An ordered set of patterns keyed by unique label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct PatternCatalog {
    patterns: Vec<Pattern>,
}

impl PatternCatalog {
    /// Build a catalog, rejecting empty patterns and duplicate labels.
    pub fn new(patterns: impl IntoIterator<Item = Pattern>) -> Result<Self, CatalogError> {
        Self::default().extend(patterns)
    }

    /// The built-in 29-pattern English catalog.
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS
                .iter()
                .map(|(tags, label)| Pattern::new(tags.iter().copied(), *label))
                .collect(),
        }
    }

    /// Add one pattern.
    pub fn with_pattern(self, pattern: Pattern) -> Result<Self, CatalogError> {
        self.extend([pattern])
    }

    /// Add patterns after the existing ones.
    pub fn extend(
        mut self,
        patterns: impl IntoIterator<Item = Pattern>,
    ) -> Result<Self, CatalogError> {
        let mut labels: HashSet<String> = self.patterns.iter().map(|p| p.label.clone()).collect();
        for pattern in patterns {
            pattern.validate()?;
            if !labels.insert(pattern.label.clone()) {
                return Err(CatalogError::DuplicateLabel(pattern.label));
            }
            self.patterns.push(pattern);
        }
        Ok(self)
    }

    /// Number of patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog has no patterns.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Patterns in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Patterns as a slice.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Look up a pattern by label.
    pub fn get(&self, label: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|p| p.label == label)
    }

    /// Length of the longest pattern (0 for an empty catalog).
    pub fn max_len(&self) -> usize {
        self.patterns.iter().map(Pattern::len).max().unwrap_or(0)
    }

    /// Distinct tags used by the catalog, in first-use order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.patterns
            .iter()
            .flat_map(|p| p.tags.iter())
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PatternCatalog {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
