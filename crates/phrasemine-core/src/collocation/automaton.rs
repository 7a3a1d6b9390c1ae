//! Aho-Corasick scan engine.
//!
//! Every catalog tag gets a one-byte code (tags outside the catalog map to
//! `0`, which no pattern contains). The catalog becomes a set of byte
//! strings and the tagged stream a byte haystack, so one overlapping
//! automaton pass finds every pattern occurrence at once.

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};

use super::{CollocationCounts, PatternCatalog, phrase_of};
use crate::error::CatalogError;
use crate::nlp::TaggedToken;

/// Distinct catalog tags one byte can encode (code `0` is reserved).
pub const MAX_DISTINCT_TAGS: usize = u8::MAX as usize;

/// A catalog compiled into a byte-level automaton.
#[derive(Debug, Clone)]
pub struct TagAutomaton {
    codes: HashMap<String, u8>,
    automaton: AhoCorasick,
    /// Automaton pattern id -> labels sharing that tag sequence.
    labels: Vec<Vec<String>>,
}

impl TagAutomaton {
    /// Compile `catalog`.
    ///
    /// # Errors
    ///
    /// [`CatalogError::TooManyTags`] when the catalog uses more than
    /// [`MAX_DISTINCT_TAGS`] distinct tags; [`CatalogError::Automaton`] when
    /// the automaton itself cannot be built.
    pub fn build(catalog: &PatternCatalog) -> Result<Self, CatalogError> {
        let tags = catalog.tags();
        if tags.len() > MAX_DISTINCT_TAGS {
            return Err(CatalogError::TooManyTags {
                count: tags.len(),
                limit: MAX_DISTINCT_TAGS,
            });
        }

        let mut codes = HashMap::with_capacity(tags.len());
        for (code, tag) in (1..=u8::MAX).zip(tags) {
            codes.insert(tag.to_string(), code);
        }

        // Patterns with identical tags share one automaton entry.
        let mut encoded: Vec<Vec<u8>> = Vec::new();
        let mut labels: Vec<Vec<String>> = Vec::new();
        for pattern in catalog {
            let bytes: Vec<u8> = pattern
                .tags
                .iter()
                .map(|tag| codes.get(tag).copied().unwrap_or(0))
                .collect();
            match encoded.iter().position(|existing| *existing == bytes) {
                Some(id) => labels[id].push(pattern.label.clone()),
                None => {
                    encoded.push(bytes);
                    labels.push(vec![pattern.label.clone()]);
                }
            }
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&encoded)
            .map_err(|e| CatalogError::Automaton(e.to_string()))?;

        Ok(Self {
            codes,
            automaton,
            labels,
        })
    }

    /// Encode a token stream as catalog tag codes.
    pub fn encode(&self, tokens: &[TaggedToken]) -> Vec<u8> {
        tokens
            .iter()
            .map(|token| self.codes.get(&token.tag).copied().unwrap_or(0))
            .collect()
    }

    /// Count every pattern occurrence that fits the scan window.
    ///
    /// A match of length `len` at `start` counts when `len <= window` and,
    /// unless `clip_tail` is set, when a full window fits at `start`.
    pub fn count_into(
        &self,
        tokens: &[TaggedToken],
        window: usize,
        clip_tail: bool,
        counts: &mut CollocationCounts,
    ) {
        let haystack = self.encode(tokens);
        for found in self.automaton.find_overlapping_iter(&haystack) {
            let (start, end) = (found.start(), found.end());
            if end - start > window || (!clip_tail && start + window > tokens.len()) {
                continue;
            }
            let phrase = phrase_of(&tokens[start..end]);
            for label in &self.labels[found.pattern().as_usize()] {
                counts.record(label, &phrase);
            }
        }
    }
}
