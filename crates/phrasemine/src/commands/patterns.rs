//! Patterns command: list the active collocation catalog.

use anyhow::Context;
use clap::Args;
use owo_colors::Style;
use phrasemine_core::collocation::Pattern;
use phrasemine_core::config::Config;
use serde::Serialize;
use tracing::{debug, instrument};

use super::paint;

/// Arguments for the `patterns` subcommand.
#[derive(Args, Debug, Default)]
pub struct PatternsArgs {
    /// Only show patterns containing this tag.
    #[arg(long)]
    pub tag: Option<String>,
}

#[derive(Serialize)]
struct PatternsOutput<'a> {
    total: usize,
    window: usize,
    patterns: Vec<&'a Pattern>,
}

/// Print the catalog built from config: built-ins plus custom patterns.
#[instrument(name = "cmd_patterns", skip_all)]
pub fn cmd_patterns(args: PatternsArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(tag = ?args.tag, "executing patterns command");

    let catalog = config.catalog().context("invalid pattern catalog")?;
    let patterns: Vec<&Pattern> = catalog
        .iter()
        .filter(|p| {
            args.tag
                .as_deref()
                .is_none_or(|tag| p.tags.iter().any(|t| t == tag))
        })
        .collect();

    let output = PatternsOutput {
        total: catalog.len(),
        window: config.scan_options().window_for(&catalog),
        patterns,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let width = output
        .patterns
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(0);
    for pattern in &output.patterns {
        let label = format!("{:<width$}", pattern.label);
        println!(
            "{}  {}",
            paint(label, Style::new().bold()),
            paint(pattern.tags.join(" "), Style::new().cyan())
        );
    }
    println!(
        "\n{} of {} patterns, window {}",
        output.patterns.len(),
        output.total,
        output.window
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_catalog() {
        assert!(cmd_patterns(PatternsArgs::default(), true, &Config::default()).is_ok());
    }

    #[test]
    fn duplicate_custom_label_is_an_error() {
        let config = Config {
            patterns: vec![Pattern::new(["JJ", "NN"], "Adj+Noun")],
            ..Config::default()
        };
        let err = cmd_patterns(PatternsArgs::default(), false, &config).unwrap_err();
        assert!(err.to_string().contains("invalid pattern catalog"));
    }
}
