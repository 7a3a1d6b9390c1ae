//! Collocations command: top phrases per POS pattern.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::Style;
use phrasemine_core::collocation::{CollocationResult, ScanEngine, scan_collocations_with};
use phrasemine_core::config::Config;
use phrasemine_core::export::render_collocations;
use phrasemine_core::nlp::{TaggedToken, parse_tagged};
use phrasemine_core::normalize::Normalizer;
use phrasemine_core::pipeline::clean_document;
use tracing::{debug, instrument};

use super::paint;

/// Arguments for the `collocations` subcommand.
#[derive(Args, Debug)]
pub struct CollocationsArgs {
    /// File to scan.
    pub file: Utf8PathBuf,

    /// Phrases kept per pattern.
    #[arg(long)]
    pub top: Option<usize>,

    /// Input is already tagged as whitespace-separated `word/TAG` tokens.
    #[arg(long)]
    pub tagged: bool,

    /// Matching engine.
    #[arg(long, value_enum)]
    pub engine: Option<ScanEngine>,

    /// Scan window length (default: longest pattern).
    #[arg(long)]
    pub window: Option<usize>,

    /// Only visit positions where a full window fits.
    #[arg(long)]
    pub full_windows: bool,
}

/// Scan a file for collocations and print the ranked phrases.
#[instrument(name = "cmd_collocations", skip_all, fields(file = %args.file))]
pub fn cmd_collocations(
    args: CollocationsArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, tagged = args.tagged, engine = ?args.engine, "executing collocations command");

    let content = super::read_input_file(&args.file, max_input)?;
    let tokens = if args.tagged {
        parse_tagged(&content).with_context(|| format!("failed to parse {}", args.file))?
    } else {
        tag_file(&content, config).with_context(|| format!("failed to tag {}", args.file))?
    };

    let mut options = config.scan_options();
    if let Some(top) = args.top {
        options.top_n = top;
    }
    if let Some(engine) = args.engine {
        options.engine = engine;
    }
    if args.window.is_some() {
        options.window_size = args.window;
    }
    options.clip_tail &= !args.full_windows;

    let catalog = config.catalog().context("invalid pattern catalog")?;
    let result = scan_collocations_with(&tokens, &catalog, &options)
        .context("failed to compile pattern catalog")?;

    debug!(
        tokens = tokens.len(),
        phrases = result.phrase_count(),
        "scan complete"
    );

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_result(&args.file, &result);
    Ok(())
}

fn tag_file(content: &str, config: &Config) -> anyhow::Result<Vec<TaggedToken>> {
    let normalizer = Normalizer::new(config.normalize_options());
    let clean = clean_document(content, &normalizer, config.strip_speaker_labels)?;
    let ctx = super::context(config);
    Ok(ctx.tag_text(&clean)?.concat())
}

fn print_result(file: &Utf8Path, result: &CollocationResult) {
    if result.phrase_count() == 0 {
        println!(
            "{}: {}",
            paint(file, Style::new().bold()),
            paint("no collocations found", Style::new().yellow())
        );
        return;
    }
    println!("{}", paint(file, Style::new().bold()));
    println!();
    print!("{}", render_collocations(result));
}
