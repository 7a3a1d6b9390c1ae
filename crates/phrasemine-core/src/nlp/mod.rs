//! Language adapters.
//!
//! Every analysis function reaches sentence segmentation, tokenization, POS
//! tagging, lemmatization, and stop words through the traits in this module,
//! bundled into an [`AnalysisContext`] the caller owns and passes in. The
//! crate ships lightweight rule-based implementations ([`RuleSegmenter`],
//! [`WordTokenizer`], [`LexiconTagger`], [`RuleLemmatizer`]) so the pipeline
//! works out of the box; swap any of them for a model-backed adapter with the
//! `with_*` builder methods.

pub mod lemmatizer;
pub mod segmenter;
pub mod stopwords;
pub mod tagger;
pub mod tokenizer;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, AdapterResult, AnalysisError, AnalysisResult};

pub use lemmatizer::RuleLemmatizer;
pub use segmenter::RuleSegmenter;
pub use stopwords::StopwordSet;
pub use tagger::LexiconTagger;
pub use tokenizer::WordTokenizer;

/// Splits text into sentences.
pub trait SentenceSegmenter: Send + Sync {
    /// Split `text` into ordered sentence strings.
    fn segment(&self, text: &str) -> AdapterResult<Vec<String>>;
}

/// Splits a sentence into word and punctuation tokens.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into ordered tokens.
    fn tokenize(&self, text: &str) -> AdapterResult<Vec<String>>;
}

/// Assigns a Penn Treebank style tag to every token.
pub trait PosTagger: Send + Sync {
    /// Tag `tokens`, returning exactly one [`TaggedToken`] per input token.
    fn tag(&self, tokens: &[String]) -> AdapterResult<Vec<TaggedToken>>;
}

/// Reduces a word to its dictionary form.
pub trait Lemmatizer: Send + Sync {
    /// Lemmatize `word` read as the given part of speech.
    fn lemmatize(&self, word: &str, category: WordCategory) -> AdapterResult<String>;
}

/// A token with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct TaggedToken {
    /// The token as it appears in the text.
    pub surface: String,
    /// Penn Treebank style tag (`VB`, `NN`, `PRP$`, ...).
    pub tag: String,
}

impl TaggedToken {
    /// Create a tagged token.
    pub fn new(surface: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            surface: surface.into(),
            tag: tag.into(),
        }
    }
}

impl From<(&str, &str)> for TaggedToken {
    fn from((surface, tag): (&str, &str)) -> Self {
        Self::new(surface, tag)
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.surface, self.tag)
    }
}

/// Parse whitespace-separated `word/TAG` tokens.
///
/// The split happens at the last `/`, so surfaces like `and/or/CC` keep
/// their inner slash.
pub fn parse_tagged(text: &str) -> AdapterResult<Vec<TaggedToken>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, item)| match item.rsplit_once('/') {
            Some((surface, tag)) if !surface.is_empty() && !tag.is_empty() => {
                Ok(TaggedToken::new(surface, tag))
            }
            _ => Err(AdapterError::new(
                "parse",
                format!("token {} `{item}` is not in word/TAG form", i + 1),
            )),
        })
        .collect()
}

/// Coarse word category used to pick a lemmatization rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    /// `JJ*` tags.
    Adjective,
    /// `VB*` tags.
    Verb,
    /// `NN*` tags.
    Noun,
    /// `RB*` tags.
    Adverb,
}

impl WordCategory {
    /// Map a Penn Treebank tag to a category by its first letter.
    ///
    /// Returns `None` for tags with no lemmatization category (`IN`, `DT`,
    /// punctuation, ...).
    pub fn from_penn(tag: &str) -> Option<Self> {
        match tag.chars().next()? {
            'J' => Some(Self::Adjective),
            'V' => Some(Self::Verb),
            'N' => Some(Self::Noun),
            'R' => Some(Self::Adverb),
            _ => None,
        }
    }

    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Adjective => "adjective",
            Self::Verb => "verb",
            Self::Noun => "noun",
            Self::Adverb => "adverb",
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The language capabilities one analysis run uses.
///
/// Owned by the caller and passed by reference into every analysis function.
/// Holds no counters; all results are returned as values.
pub struct AnalysisContext {
    segmenter: Box<dyn SentenceSegmenter>,
    tokenizer: Box<dyn Tokenizer>,
    tagger: Box<dyn PosTagger>,
    lemmatizer: Box<dyn Lemmatizer>,
    stopwords: StopwordSet,
}

impl AnalysisContext {
    /// Context backed by the built-in rule-based English adapters.
    pub fn builtin() -> Self {
        Self {
            segmenter: Box::new(RuleSegmenter::new()),
            tokenizer: Box::new(WordTokenizer::new()),
            tagger: Box::new(LexiconTagger::new()),
            lemmatizer: Box::new(RuleLemmatizer::new()),
            stopwords: StopwordSet::english(),
        }
    }

    /// Replace the sentence segmenter.
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: impl SentenceSegmenter + 'static) -> Self {
        self.segmenter = Box::new(segmenter);
        self
    }

    /// Replace the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Replace the POS tagger.
    #[must_use]
    pub fn with_tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.tagger = Box::new(tagger);
        self
    }

    /// Replace the lemmatizer.
    #[must_use]
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Box::new(lemmatizer);
        self
    }

    /// Replace the stop-word set.
    #[must_use]
    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Split text into sentences.
    pub fn segment(&self, text: &str) -> AdapterResult<Vec<String>> {
        self.segmenter.segment(text)
    }

    /// Tokenize one sentence.
    pub fn tokenize(&self, text: &str) -> AdapterResult<Vec<String>> {
        self.tokenizer.tokenize(text)
    }

    /// Tag tokens, rejecting a tagger that drops or invents tokens.
    pub fn tag(&self, tokens: &[String]) -> AdapterResult<Vec<TaggedToken>> {
        let tagged = self.tagger.tag(tokens)?;
        if tagged.len() != tokens.len() {
            return Err(AdapterError::new(
                "tag",
                format!(
                    "tagger returned {} tags for {} tokens",
                    tagged.len(),
                    tokens.len()
                ),
            ));
        }
        Ok(tagged)
    }

    /// Lemmatize one word.
    pub fn lemmatize(&self, word: &str, category: WordCategory) -> AdapterResult<String> {
        self.lemmatizer.lemmatize(word, category)
    }

    /// The active stop-word set.
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Segment, tokenize, and tag text, one token list per sentence.
    ///
    /// A segmentation failure aborts the call. A sentence that fails to
    /// tokenize or tag is logged and left out.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn tag_text(&self, text: &str) -> AnalysisResult<Vec<Vec<TaggedToken>>> {
        let sentences = self.segment(text).map_err(AnalysisError::Segmentation)?;
        Ok(self.tag_sentences(&sentences))
    }

    /// Tokenize and tag already segmented sentences.
    pub fn tag_sentences(&self, sentences: &[String]) -> Vec<Vec<TaggedToken>> {
        sentences
            .iter()
            .enumerate()
            .filter_map(|(index, sentence)| {
                match self.tokenize(sentence).and_then(|tokens| self.tag(&tokens)) {
                    Ok(tagged) => Some(tagged),
                    Err(error) => {
                        tracing::warn!(sentence = index, %error, "skipping sentence");
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for AnalysisContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisContext")
            .field("stopwords", &self.stopwords.len())
            .finish_non_exhaustive()
    }
}
