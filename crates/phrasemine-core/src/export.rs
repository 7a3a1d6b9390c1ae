//! Tabular export.
//!
//! Results leave the crate as three tables: Sentences, WordFrequency and
//! Collocations. They can be written as CSV files, serialized as JSON, or
//! rendered as a grouped plain-text report.

use std::fmt::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::collocation::CollocationResult;
use crate::error::{AnalysisError, AnalysisResult};
use crate::frequency::FrequencyMap;
use crate::pipeline::CorpusReport;

/// File name of the sentences table.
pub const SENTENCES_FILE: &str = "sentences.csv";
/// File name of the word frequency table.
pub const WORD_FREQUENCY_FILE: &str = "word_frequency.csv";
/// File name of the collocations table.
pub const COLLOCATIONS_FILE: &str = "collocations.csv";

/// One row of the Sentences table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceRow {
    /// Sentence text.
    #[serde(rename = "Sentence")]
    pub sentence: String,
}

/// One row of the WordFrequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequencyRow {
    /// Word or lemma.
    #[serde(rename = "Word")]
    pub word: String,
    /// Occurrences.
    #[serde(rename = "Frequency")]
    pub frequency: u64,
}

/// One row of the Collocations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CollocationRow {
    /// Pattern label.
    #[serde(rename = "PatternLabel")]
    pub pattern_label: String,
    /// Matched phrase.
    #[serde(rename = "Phrase")]
    pub phrase: String,
    /// Occurrences.
    #[serde(rename = "Frequency")]
    pub frequency: u64,
}

/// The three export tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExportTables {
    /// Sentences in corpus order.
    pub sentences: Vec<SentenceRow>,
    /// Words by frequency descending, ties by word.
    pub word_frequency: Vec<WordFrequencyRow>,
    /// Phrases in catalog order, then rank.
    pub collocations: Vec<CollocationRow>,
}

impl ExportTables {
    /// Build the tables from analysis results.
    pub fn from_results(
        sentences: &[String],
        frequencies: &FrequencyMap,
        collocations: &CollocationResult,
    ) -> Self {
        Self {
            sentences: sentences
                .iter()
                .map(|sentence| SentenceRow {
                    sentence: sentence.clone(),
                })
                .collect(),
            word_frequency: frequencies
                .ranked()
                .into_iter()
                .map(|entry| WordFrequencyRow {
                    word: entry.word,
                    frequency: entry.count,
                })
                .collect(),
            collocations: collocation_rows(collocations),
        }
    }

    /// Build the tables from a corpus report.
    pub fn from_report(report: &CorpusReport) -> Self {
        Self {
            sentences: report
                .sentences
                .iter()
                .map(|sentence| SentenceRow {
                    sentence: sentence.clone(),
                })
                .collect(),
            word_frequency: report
                .word_frequency
                .iter()
                .map(|entry| WordFrequencyRow {
                    word: entry.word.clone(),
                    frequency: entry.count,
                })
                .collect(),
            collocations: collocation_rows(&report.collocations),
        }
    }

    /// Write the three tables as CSV files into `dir`, creating it if needed.
    ///
    /// Returns the written paths. Every file gets a header row, even when the
    /// table is empty.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Io`] when the directory cannot be created,
    /// [`AnalysisError::Export`] when a file cannot be written.
    #[tracing::instrument(skip_all, fields(dir = %dir))]
    pub fn write_csv_dir(&self, dir: &Utf8Path) -> AnalysisResult<Vec<Utf8PathBuf>> {
        std::fs::create_dir_all(dir).map_err(|source| AnalysisError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let sentences = dir.join(SENTENCES_FILE);
        write_table(&sentences, &["Sentence"], &self.sentences)?;
        let words = dir.join(WORD_FREQUENCY_FILE);
        write_table(&words, &["Word", "Frequency"], &self.word_frequency)?;
        let collocations = dir.join(COLLOCATIONS_FILE);
        write_table(
            &collocations,
            &["PatternLabel", "Phrase", "Frequency"],
            &self.collocations,
        )?;

        tracing::info!(
            sentences = self.sentences.len(),
            words = self.word_frequency.len(),
            collocations = self.collocations.len(),
            "tables written"
        );
        Ok(vec![sentences, words, collocations])
    }
}

fn collocation_rows(result: &CollocationResult) -> Vec<CollocationRow> {
    result
        .labels
        .iter()
        .flat_map(|entry| {
            entry.phrases.iter().map(|phrase| CollocationRow {
                pattern_label: entry.label.clone(),
                phrase: phrase.phrase.clone(),
                frequency: phrase.count,
            })
        })
        .collect()
}

fn write_table<T: Serialize>(path: &Utf8Path, header: &[&str], rows: &[T]) -> AnalysisResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Plain-text report with one section per label that matched.
pub fn render_collocations(result: &CollocationResult) -> String {
    let mut out = String::new();
    for entry in result.non_empty() {
        let _ = writeln!(out, "{} ({})", entry.label, entry.tags.join(" "));
        let width = entry
            .phrases
            .iter()
            .map(|p| p.count.to_string().len())
            .max()
            .unwrap_or(1);
        for phrase in &entry.phrases {
            let _ = writeln!(out, "  {:>width$}  {}", phrase.count, phrase.phrase);
        }
        out.push('\n');
    }
    out
}
