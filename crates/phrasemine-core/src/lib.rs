//! Core library for phrasemine.
//!
//! Word frequency and part-of-speech collocation mining for noisy,
//! mixed-script text. Every analysis takes an explicit
//! [`AnalysisContext`](nlp::AnalysisContext) holding the language adapters
//! and returns its results as values.
//!
//! # Modules
//!
//! - [`normalize`] - Mixed-script to ASCII normalization
//! - [`frequency`] - Sentence segmentation and word counting
//! - [`collocation`] - Pattern catalog and collocation scanner
//! - [`nlp`] - Adapter traits and the built-in rule-based English adapters
//! - [`text`] - Transcript cleanup helpers
//! - [`documents`] - Loading a directory of text and Markdown files
//! - [`pipeline`] - Whole-corpus analysis
//! - [`export`] - CSV and plain-text output
//! - [`ngrams`] - Surface n-grams and sentence shapes
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use phrasemine_core::{AnalysisContext, PatternCatalog, normalize, scan_collocations};
//!
//! let clean = normalize("Look at the map！", false).unwrap();
//! let ctx = AnalysisContext::builtin();
//! let tokens = ctx.tag_text(&clean).unwrap().concat();
//! let result = scan_collocations(&tokens, &PatternCatalog::builtin(), 20);
//! for entry in result.non_empty() {
//!     println!("{}: {:?}", entry.label, entry.phrases);
//! }
//! ```
#![deny(unsafe_code)]

pub mod collocation;
pub mod config;
pub mod dictionaries;
pub mod documents;
pub mod error;
pub mod export;
pub mod frequency;
pub mod ngrams;
pub mod nlp;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod text;
pub mod word_lists;

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

pub use collocation::{
    CollocationCounts, CollocationResult, CollocationScanner, Pattern, PatternCatalog, ScanEngine,
    ScanOptions, scan_collocations, scan_collocations_with,
};
pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{
    AdapterError, AdapterResult, AnalysisError, AnalysisResult, CatalogError, ConfigError,
    ConfigResult, NormalizeError,
};
pub use frequency::{FrequencyMap, FrequencyOptions, FrequencyReport, aggregate_frequency};
pub use nlp::{AnalysisContext, TaggedToken};
pub use normalize::{NormalizeOptions, Normalizer, normalize};
pub use pipeline::{CorpusOptions, CorpusReport, analyze_corpus};
