//! Analyze command: whole-corpus analysis with CSV export.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use phrasemine_core::config::Config;
use phrasemine_core::documents::{DEFAULT_INCLUDE, load_documents_within};
use phrasemine_core::export::ExportTables;
use phrasemine_core::pipeline::{CorpusReport, analyze_corpus};
use tracing::{debug, info, instrument};

use super::paint;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory of `.txt` and `.md` documents.
    pub dir: Utf8PathBuf,

    /// Write sentences.csv, word_frequency.csv and collocations.csv here.
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<Utf8PathBuf>,

    /// Include globs, relative to DIR (repeatable; overrides config).
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    /// Rows shown per summary table.
    #[arg(long, default_value_t = 10)]
    pub show: usize,
}

/// Analyze every matching document under a directory.
#[instrument(name = "cmd_analyze", skip_all, fields(dir = %args.dir))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(dir = %args.dir, out = ?args.out, include = ?args.include, "executing analyze command");

    let include: Vec<String> = if !args.include.is_empty() {
        args.include.clone()
    } else if !config.include.is_empty() {
        config.include.clone()
    } else {
        DEFAULT_INCLUDE.iter().map(|s| (*s).to_string()).collect()
    };

    let limit = max_input.map(|max| max as u64);
    let documents = load_documents_within(&args.dir, &include, limit)
        .with_context(|| format!("failed to load documents from {}", args.dir))?;
    if documents.is_empty() {
        bail!(
            "no documents in {} match {}",
            args.dir,
            include.join(", ")
        );
    }

    let catalog = config.catalog().context("invalid pattern catalog")?;
    let ctx = super::context(config);
    let report = analyze_corpus(&documents, &ctx, &catalog, &config.corpus_options())
        .with_context(|| format!("failed to analyze {}", args.dir))?;

    let written = match args.out {
        Some(ref out) => {
            let paths = ExportTables::from_report(&report)
                .write_csv_dir(out)
                .with_context(|| format!("failed to write tables to {out}"))?;
            info!(dir = %out, files = paths.len(), "export complete");
            paths
        }
        None => Vec::new(),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&report, args.show);
    for path in &written {
        println!("{} {}", paint("wrote", Style::new().green()), path);
    }
    Ok(())
}

fn print_summary(report: &CorpusReport, show: usize) {
    let words: u64 = report.word_frequency.iter().map(|w| w.count).sum();
    println!(
        "{} {} documents, {} sentences, {} words ({} distinct)",
        paint("Corpus:", Style::new().bold()),
        report.documents.len(),
        report.sentences.len(),
        words,
        report.word_frequency.len(),
    );
    if !report.skipped.is_empty() {
        println!(
            "  {} {} sentence(s) skipped",
            paint("warning:", Style::new().yellow().bold()),
            report.skipped.len()
        );
    }

    println!("\n{}", paint("Top words", Style::new().cyan().bold()));
    for entry in report.word_frequency.iter().take(show) {
        println!("  {:>6}  {}", entry.count, entry.word);
    }

    println!("\n{}", paint("Collocations", Style::new().cyan().bold()));
    for entry in report.collocations.non_empty() {
        let top: Vec<String> = entry
            .phrases
            .iter()
            .take(3)
            .map(|p| format!("{} ({})", p.phrase, p.count))
            .collect();
        println!(
            "  {}: {}",
            paint(&entry.label, Style::new().bold()),
            top.join(", ")
        );
    }

    if !report.repeated_phrases.is_empty() {
        println!("\n{}", paint("Repeated phrases", Style::new().cyan().bold()));
        for entry in report.repeated_phrases.iter().take(show) {
            println!("  {:>6}  {}", entry.count, entry.word);
        }
    }

    if !report.sentence_shapes.is_empty() {
        println!("\n{}", paint("Sentence shapes", Style::new().cyan().bold()));
        for entry in report.sentence_shapes.iter().take(show) {
            println!("  {:>6}  {}", entry.count, paint(&entry.word, Style::new().dimmed()));
        }
    }
}
