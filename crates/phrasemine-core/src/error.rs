//! Error types for phrasemine-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure reported by an external capability (segmenter, tokenizer, tagger,
/// lemmatizer).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed: {message}")]
pub struct AdapterError {
    /// Which capability failed ("segment", "tokenize", "tag", "lemmatize").
    pub stage: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl AdapterError {
    /// Build an error for the given stage.
    pub fn new(stage: &'static str, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Result type alias using [`AdapterError`].
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Invalid pattern catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Two patterns share the same label.
    #[error("duplicate pattern label: {0}")]
    DuplicateLabel(String),

    /// A pattern has no tags.
    #[error("pattern {0} has no tags")]
    EmptyPattern(String),

    /// A pattern contains an empty tag string.
    #[error("pattern {0} contains an empty tag")]
    EmptyTag(String),

    /// A pattern label is empty.
    #[error("pattern label must not be empty")]
    EmptyLabel,

    /// The catalog uses more distinct tags than the automaton can encode.
    #[error("catalog uses {count} distinct tags (limit: {limit})")]
    TooManyTags {
        /// Distinct tags in the catalog.
        count: usize,
        /// Maximum supported.
        limit: usize,
    },

    /// The multi-pattern automaton could not be built.
    #[error("cannot build pattern automaton: {0}")]
    Automaton(String),
}

/// Normalization precondition violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Input contains a character reserved for internal masking.
    #[error("input contains reserved marker character U+{codepoint:04X} at byte {offset}")]
    ReservedCharacter {
        /// Codepoint of the offending character.
        codepoint: u32,
        /// Byte offset in the input.
        offset: usize,
    },

    /// The extra-keep set names a reserved marker character.
    #[error("extra-keep set contains reserved marker character U+{codepoint:04X}")]
    ReservedKeepCharacter {
        /// Codepoint of the offending character.
        codepoint: u32,
    },
}

/// Errors that can occur during text analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The input text is empty or too short to analyze.
    #[error("input text too short: {length} characters after trimming (minimum {minimum})")]
    Input {
        /// Trimmed length in characters.
        length: usize,
        /// Required minimum.
        minimum: usize,
    },

    /// Sentence segmentation failed; nothing downstream can run.
    #[error("sentence segmentation failed: {0}")]
    Segmentation(#[source] AdapterError),

    /// The pattern catalog is invalid.
    #[error("invalid pattern catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// The input violates a normalization precondition.
    #[error("normalization rejected input: {0}")]
    Normalize(#[from] NormalizeError),

    /// Writing an export table failed.
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),

    /// Filesystem access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: camino::Utf8PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The corpus exceeds the configured size limit.
    #[error("input too large: corpus reached {size} bytes at {path} (limit: {limit} bytes)")]
    TooLarge {
        /// File that pushed the total over the limit.
        path: camino::Utf8PathBuf,
        /// Total bytes including that file.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

        /// An include glob could not be compiled.
    #[error("invalid include pattern: {0}")]
    Glob(#[from] globset::Error),
}

impl AnalysisError {
    /// Whether this error came from invalid configuration rather than input.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Normalize(_) | Self::Glob(_))
    }
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
