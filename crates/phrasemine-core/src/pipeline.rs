//! Whole-corpus analysis.
//!
//! Cleans every document (page markers, speaker labels, normalization),
//! joins them, then runs frequency aggregation and the collocation scan over
//! the combined text. The result is a single [`CorpusReport`].

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collocation::{CollocationResult, CollocationScanner, PatternCatalog, ScanOptions};
use crate::error::{AnalysisResult, NormalizeError};
use crate::frequency::{
    FrequencyOptions, SkippedSentence, WordCount, aggregate_frequency, clean_token,
};
use crate::ngrams::{count_shapes, repeated_ngrams};
use crate::nlp::{AnalysisContext, TaggedToken};
use crate::normalize::{NormalizeOptions, Normalizer};
use crate::text::{strip_page_markers, strip_speaker_labels};

/// Options for [`analyze_corpus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusOptions {
    /// Normalization settings.
    pub normalize: NormalizeOptions,
    /// Word counting settings.
    pub frequency: FrequencyOptions,
    /// Collocation scan settings; `top_n` also limits the n-gram and shape
    /// tables.
    pub scan: ScanOptions,
    /// Remove `Name:` prefixes before normalizing.
    pub strip_speaker_labels: bool,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            frequency: FrequencyOptions::default(),
            scan: ScanOptions::default(),
            strip_speaker_labels: true,
        }
    }
}

/// Size of one input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentSummary {
    /// Document name (path relative to the corpus root).
    pub name: String,
    /// Characters of raw text.
    pub raw_chars: usize,
    /// Characters left after cleaning.
    pub clean_chars: usize,
}

/// Everything [`analyze_corpus`] computes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CorpusReport {
    /// Input documents in name order.
    pub documents: Vec<DocumentSummary>,
    /// Segmented sentences of the cleaned corpus.
    pub sentences: Vec<String>,
    /// Every counted word, most frequent first.
    pub word_frequency: Vec<WordCount>,
    /// Top phrases per collocation pattern, in catalog order.
    pub collocations: CollocationResult,
    /// Word sequences of two or three tokens seen more than once.
    pub repeated_phrases: Vec<WordCount>,
    /// Most common whole-sentence tag sequences.
    pub sentence_shapes: Vec<WordCount>,
    /// Sentences left out of the word counts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSentence>,
}

/// Clean one raw document: page markers, speaker labels, then normalization.
///
/// # Errors
///
/// [`NormalizeError`] when the text contains a reserved marker character.
pub fn clean_document(
    raw: &str,
    normalizer: &Normalizer,
    strip_speakers: bool,
) -> Result<String, NormalizeError> {
    let text = strip_page_markers(raw);
    let text = if strip_speakers {
        strip_speaker_labels(&text)
    } else {
        text
    };
    normalizer.normalize(&text)
}

/// Analyze a set of named documents as one corpus.
///
/// # Errors
///
/// Fails on a reserved character in any document, an invalid catalog for the
/// chosen engine, a corpus too short to analyze, or a segmentation failure.
/// Per-sentence failures are reported in [`CorpusReport::skipped`].
#[tracing::instrument(skip_all, fields(documents = documents.len(), patterns = catalog.len()))]
pub fn analyze_corpus(
    documents: &BTreeMap<String, String>,
    ctx: &AnalysisContext,
    catalog: &PatternCatalog,
    options: &CorpusOptions,
) -> AnalysisResult<CorpusReport> {
    // Compile first so a bad catalog fails before any text work.
    let scanner = CollocationScanner::new(catalog, &options.scan)?;
    let normalizer = Normalizer::new(options.normalize.clone());

    let mut summaries = Vec::with_capacity(documents.len());
    let mut cleaned = Vec::with_capacity(documents.len());
    for (name, raw) in documents {
        let clean = clean_document(raw, &normalizer, options.strip_speaker_labels)?;
        summaries.push(DocumentSummary {
            name: name.clone(),
            raw_chars: raw.chars().count(),
            clean_chars: clean.chars().count(),
        });
        cleaned.push(clean);
    }

    let corpus = cleaned.join("\n");
    let frequency = aggregate_frequency(&corpus, ctx, &options.frequency)?;

    let tagged = ctx.tag_sentences(&frequency.sentences);
    let stream: Vec<TaggedToken> = tagged.iter().flatten().cloned().collect();
    let collocations = scanner.scan(&stream);

    let top_n = options.scan.top_n;
    let words: Vec<String> = stream
        .iter()
        .map(|token| clean_token(&token.surface))
        .filter(|word| !word.is_empty())
        .collect();
    let repeated_phrases = repeated_ngrams(&words, 2, 3, top_n);
    let sentence_shapes = count_shapes(&tagged).top(top_n);

    tracing::info!(
        sentences = frequency.sentences.len(),
        words = frequency.frequencies.len(),
        collocations = collocations.phrase_count(),
        "corpus analyzed"
    );

    Ok(CorpusReport {
        documents: summaries,
        word_frequency: frequency.frequencies.ranked(),
        sentences: frequency.sentences,
        collocations,
        repeated_phrases,
        sentence_shapes,
        skipped: frequency.skipped,
    })
}
