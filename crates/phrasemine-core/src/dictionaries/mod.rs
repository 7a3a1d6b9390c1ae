//! Dictionaries for the built-in language adapters.
//!
//! Provides curated word sets used by sentence segmentation, tokenization,
//! POS tagging, and lemmatization.

pub mod abbreviations;
pub mod irregular_verbs;
pub mod lexicon;
