//! Frequency command: ranked word counts for one file.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use phrasemine_core::config::Config;
use phrasemine_core::frequency::{WordCount, aggregate_frequency};
use phrasemine_core::normalize::Normalizer;
use phrasemine_core::pipeline::clean_document;
use serde::Serialize;
use tracing::{debug, instrument};

use super::paint;

/// Arguments for the `frequency` subcommand.
#[derive(Args, Debug)]
pub struct FrequencyArgs {
    /// File to count.
    pub file: Utf8PathBuf,

    /// Number of words to show (default: all).
    #[arg(long)]
    pub top: Option<usize>,

    /// Shortest counted word, in characters.
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Count stop words too.
    #[arg(long)]
    pub keep_stopwords: bool,

    /// Count surface forms instead of lemmas.
    #[arg(long)]
    pub no_lemmatize: bool,

    /// Skip normalization and transcript cleanup.
    #[arg(long)]
    pub raw: bool,
}

#[derive(Serialize)]
struct FrequencyOutput {
    file: String,
    sentences: usize,
    distinct_words: usize,
    total_words: u64,
    words: Vec<WordCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<usize>,
}

/// Count words in a file and print them by frequency.
#[instrument(name = "cmd_frequency", skip_all, fields(file = %args.file))]
pub fn cmd_frequency(
    args: FrequencyArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, top = ?args.top, raw = args.raw, "executing frequency command");

    let content = super::read_input_file(&args.file, max_input)?;
    let text = if args.raw {
        content
    } else {
        let normalizer = Normalizer::new(config.normalize_options());
        clean_document(&content, &normalizer, config.strip_speaker_labels)
            .with_context(|| format!("failed to normalize {}", args.file))?
    };

    let mut options = config.frequency_options();
    if let Some(min) = args.min_length {
        options.min_word_length = min;
    }
    options.remove_stopwords &= !args.keep_stopwords;
    options.lemmatize &= !args.no_lemmatize;

    let ctx = super::context(config);
    let report = aggregate_frequency(&text, &ctx, &options)
        .with_context(|| format!("failed to count words in {}", args.file))?;

    let words = match args.top {
        Some(n) => report.frequencies.top(n),
        None => report.frequencies.ranked(),
    };
    let output = FrequencyOutput {
        file: args.file.to_string(),
        sentences: report.sentences.len(),
        distinct_words: report.frequencies.len(),
        total_words: report.frequencies.total(),
        words,
        skipped: report.skipped.iter().map(|s| s.index).collect(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{}: {} sentences, {} words ({} distinct)",
        paint(&output.file, Style::new().bold()),
        output.sentences,
        output.total_words,
        output.distinct_words,
    );
    let width = output
        .words
        .first()
        .map_or(1, |w| w.count.to_string().len());
    for entry in &output.words {
        let count = format!("{:>width$}", entry.count);
        println!("  {}  {}", paint(count, Style::new().cyan()), entry.word);
    }
    if !output.skipped.is_empty() {
        println!(
            "{} {} sentence(s) skipped",
            paint("warning:", Style::new().yellow().bold()),
            output.skipped.len()
        );
    }
    Ok(())
}
