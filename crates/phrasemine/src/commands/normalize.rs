//! Normalize command: mixed-script text to clean ASCII.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::Style;
use phrasemine_core::config::Config;
use phrasemine_core::normalize::{Normalizer, Stage};
use phrasemine_core::pipeline::clean_document;
use serde::Serialize;
use tracing::{debug, instrument};

use super::paint;

/// Arguments for the `normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// File to normalize.
    pub file: Utf8PathBuf,

    /// Keep ASCII digits.
    #[arg(long)]
    pub keep_digits: bool,

    /// Extra symbol characters to keep (e.g. "',").
    #[arg(long, value_name = "CHARS")]
    pub keep: Option<String>,

    /// Treat the file as a transcript: drop page markers and speaker labels first.
    #[arg(long)]
    pub transcript: bool,

    /// Show the text after every stage.
    #[arg(long)]
    pub stages: bool,
}

#[derive(Serialize)]
struct StageOutput {
    stage: Stage,
    text: String,
}

#[derive(Serialize)]
struct NormalizeOutput {
    text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stages: Vec<StageOutput>,
}

/// Normalize a file and print the result.
#[instrument(name = "cmd_normalize", skip_all, fields(file = %args.file))]
pub fn cmd_normalize(
    args: NormalizeArgs,
    global_json: bool,
    config: &Config,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, transcript = args.transcript, "executing normalize command");

    let content = super::read_input_file(&args.file, max_input)?;

    let mut options = config.normalize_options();
    options.keep_digits |= args.keep_digits;
    if let Some(ref chars) = args.keep {
        options = options.with_extra_keep(chars.chars());
    }
    let normalizer = Normalizer::new(options);

    let text = if args.transcript {
        clean_document(&content, &normalizer, config.strip_speaker_labels)
    } else {
        normalizer.normalize(&content)
    }
    .with_context(|| format!("failed to normalize {}", args.file))?;

    let stages = if args.stages {
        stage_outputs(&normalizer, &content)
    } else {
        Vec::new()
    };

    if global_json {
        let output = NormalizeOutput { text, stages };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for step in &stages {
        println!("{}", paint(step.stage.as_str(), Style::new().cyan().bold()));
        println!("{}", step.text);
        println!();
    }
    if !stages.is_empty() {
        println!("{}", paint("result", Style::new().green().bold()));
    }
    println!("{text}");
    Ok(())
}

fn stage_outputs(normalizer: &Normalizer, input: &str) -> Vec<StageOutput> {
    let mut current = input.to_string();
    normalizer
        .stages()
        .map(|stage| {
            current = normalizer.apply_stage(stage, &current);
            StageOutput {
                stage,
                text: current.clone(),
            }
        })
        .collect()
}
