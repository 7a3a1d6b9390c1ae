//! POS collocation mining.
//!
//! A [`CollocationScanner`] slides a window of `W` tokens (by default the
//! longest pattern in the catalog) across a tagged token stream. At every
//! start position each pattern that fits the window is compared tag by tag;
//! a match records the space-joined surfaces of the matched tokens under the
//! pattern's label. After the pass each label keeps its `top_n` phrases,
//! ranked by count with ties broken by phrase.
//!
//! Counting and ranking are separate steps so per-sentence
//! [`CollocationCounts`] can be merged before the final reduction.
//!
//! Two engines produce identical results: [`ScanEngine::Windowed`] checks
//! each pattern at each position, [`ScanEngine::Automaton`] compiles the
//! catalog into an Aho-Corasick automaton over tag codes.

pub mod automaton;
pub mod catalog;

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::frequency::FrequencyMap;
use crate::nlp::TaggedToken;
use crate::ranking;

pub use automaton::TagAutomaton;
pub use catalog::{Pattern, PatternCatalog};

/// Default number of phrases kept per label.
pub const DEFAULT_TOP_N: usize = 20;

/// How the scanner finds pattern occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScanEngine {
    /// Compare every pattern at every window position.
    #[default]
    Windowed,
    /// One Aho-Corasick pass over the encoded tag stream.
    Automaton,
}

impl ScanEngine {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Windowed => "windowed",
            Self::Automaton => "automaton",
        }
    }
}

/// Options for [`CollocationScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScanOptions {
    /// Phrases kept per label.
    pub top_n: usize,
    /// Window length; `None` uses the catalog's longest pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_size: Option<usize>,
    /// Visit every start position and clip the window at the end of the
    /// stream. When false, only starts where a full window fits are visited.
    pub clip_tail: bool,
    /// Matching engine.
    pub engine: ScanEngine,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            window_size: None,
            clip_tail: true,
            engine: ScanEngine::default(),
        }
    }
}

impl ScanOptions {
    /// Options with a given `top_n` and defaults otherwise.
    pub fn top(top_n: usize) -> Self {
        Self {
            top_n,
            ..Self::default()
        }
    }

    /// The effective window length for `catalog`.
    pub fn window_for(&self, catalog: &PatternCatalog) -> usize {
        self.window_size.unwrap_or_else(|| catalog.max_len())
    }
}

/// Per-label phrase counters, before ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CollocationCounts(BTreeMap<String, FrequencyMap>);

impl CollocationCounts {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `phrase` under `label`.
    pub fn record(&mut self, label: &str, phrase: &str) {
        if let Some(phrases) = self.0.get_mut(label) {
            phrases.increment(phrase);
        } else {
            self.0
                .insert(label.to_string(), std::iter::once(phrase).collect());
        }
    }

    /// Count of `phrase` under `label`.
    pub fn count(&self, label: &str, phrase: &str) -> u64 {
        self.0.get(label).map_or(0, |phrases| phrases.get(phrase))
    }

    /// Phrase counts for one label.
    pub fn get(&self, label: &str) -> Option<&FrequencyMap> {
        self.0.get(label)
    }

    /// Whether nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add every counter from `other` into `self`.
    pub fn merge(&mut self, other: &Self) {
        for (label, phrases) in &other.0 {
            self.0.entry(label.clone()).or_default().merge(phrases);
        }
    }

    /// Reduce to the `top_n` phrases per label, in catalog order.
    ///
    /// Every catalog label appears in the result, possibly with no phrases.
    pub fn rank(&self, catalog: &PatternCatalog, top_n: usize) -> CollocationResult {
        let labels = catalog
            .iter()
            .map(|pattern| LabelCollocations {
                label: pattern.label.clone(),
                tags: pattern.tags.clone(),
                phrases: self
                    .get(&pattern.label)
                    .map(|phrases| {
                        ranking::top_n(phrases.iter(), top_n)
                            .into_iter()
                            .map(|(phrase, count)| PhraseCount {
                                phrase: phrase.to_string(),
                                count,
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();
        CollocationResult { labels }
    }
}

/// A phrase and how often it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhraseCount {
    /// Space-joined surfaces of the matched tokens.
    pub phrase: String,
    /// Occurrences.
    pub count: u64,
}

/// Ranked phrases for one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LabelCollocations {
    /// Pattern label.
    pub label: String,
    /// Pattern tags.
    pub tags: Vec<String>,
    /// Top phrases, count descending, ties by phrase ascending.
    pub phrases: Vec<PhraseCount>,
}

/// Ranked phrases for every pattern, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollocationResult {
    /// One entry per catalog pattern.
    pub labels: Vec<LabelCollocations>,
}

impl CollocationResult {
    /// Ranked phrases for `label`.
    pub fn get(&self, label: &str) -> Option<&[PhraseCount]> {
        self.labels
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.phrases.as_slice())
    }

    /// Labels that matched at least once.
    pub fn non_empty(&self) -> impl Iterator<Item = &LabelCollocations> {
        self.labels.iter().filter(|entry| !entry.phrases.is_empty())
    }

    /// Total ranked phrases across labels.
    pub fn phrase_count(&self) -> usize {
        self.labels.iter().map(|entry| entry.phrases.len()).sum()
    }
}

/// Scans tagged token streams against a catalog.
#[derive(Debug, Clone)]
pub struct CollocationScanner<'c> {
    catalog: &'c PatternCatalog,
    window: usize,
    clip_tail: bool,
    top_n: usize,
    automaton: Option<TagAutomaton>,
}

impl<'c> CollocationScanner<'c> {
    /// Prepare a scanner; compiles the automaton when that engine is chosen.
    pub fn new(catalog: &'c PatternCatalog, options: &ScanOptions) -> Result<Self, CatalogError> {
        let automaton = match options.engine {
            ScanEngine::Windowed => None,
            ScanEngine::Automaton => Some(TagAutomaton::build(catalog)?),
        };
        Ok(Self {
            catalog,
            window: options.window_for(catalog),
            clip_tail: options.clip_tail,
            top_n: options.top_n,
            automaton,
        })
    }

    /// The effective window length.
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Count pattern occurrences in one stream.
    #[tracing::instrument(skip_all, fields(tokens = tokens.len(), window = self.window))]
    pub fn count(&self, tokens: &[TaggedToken]) -> CollocationCounts {
        let mut counts = CollocationCounts::new();
        if self.window == 0 || tokens.is_empty() {
            return counts;
        }
        match &self.automaton {
            Some(automaton) => automaton.count_into(tokens, self.window, self.clip_tail, &mut counts),
            None => self.count_windowed(tokens, &mut counts),
        }
        counts
    }

    /// Count and rank one stream.
    pub fn scan(&self, tokens: &[TaggedToken]) -> CollocationResult {
        self.count(tokens).rank(self.catalog, self.top_n)
    }

    /// Count each sentence separately, merge, then rank.
    pub fn scan_sentences(&self, sentences: &[Vec<TaggedToken>]) -> CollocationResult {
        let mut counts = CollocationCounts::new();
        for sentence in sentences {
            counts.merge(&self.count(sentence));
        }
        counts.rank(self.catalog, self.top_n)
    }

    fn count_windowed(&self, tokens: &[TaggedToken], counts: &mut CollocationCounts) {
        let starts = if self.clip_tail {
            tokens.len()
        } else {
            (tokens.len() + 1).saturating_sub(self.window)
        };

        for start in 0..starts {
            let end = (start + self.window).min(tokens.len());
            let window = &tokens[start..end];
            for pattern in self.catalog {
                if pattern.len() <= window.len() && pattern.matches_prefix(window) {
                    counts.record(&pattern.label, &phrase_of(&window[..pattern.len()]));
                }
            }
        }
    }
}

/// Space-joined surfaces.
pub(crate) fn phrase_of(tokens: &[TaggedToken]) -> String {
    tokens
        .iter()
        .map(|token| token.surface.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan `tokens` with the windowed engine and default options.
pub fn scan_collocations(
    tokens: &[TaggedToken],
    catalog: &PatternCatalog,
    top_n: usize,
) -> CollocationResult {
    let options = ScanOptions::top(top_n);
    let scanner = CollocationScanner {
        catalog,
        window: options.window_for(catalog),
        clip_tail: options.clip_tail,
        top_n,
        automaton: None,
    };
    scanner.scan(tokens)
}

/// Scan `tokens` with explicit options.
///
/// # Errors
///
/// Returns a [`CatalogError`] when the automaton engine cannot compile the
/// catalog.
pub fn scan_collocations_with(
    tokens: &[TaggedToken],
    catalog: &PatternCatalog,
    options: &ScanOptions,
) -> Result<CollocationResult, CatalogError> {
    Ok(CollocationScanner::new(catalog, options)?.scan(tokens))
}
