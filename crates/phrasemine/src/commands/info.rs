//! Info command implementation

use clap::Args;
use owo_colors::Style;
use phrasemine_core::config::{Config, ConfigSources};
use serde::Serialize;
use tracing::{debug, instrument};

use super::paint;

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    repository: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    homepage: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            repository: env!("CARGO_PKG_REPOSITORY"),
            homepage: env!("CARGO_PKG_HOMEPAGE"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    top_n: usize,
    min_word_length: usize,
    remove_stopwords: bool,
    lemmatize: bool,
    keep_digits: bool,
    engine: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    window_size: Option<usize>,
    clip_tail: bool,
    builtin_patterns: bool,
    custom_patterns: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            top_n: config.top_n,
            min_word_length: config.min_word_length,
            remove_stopwords: config.remove_stopwords,
            lemmatize: config.lemmatize,
            keep_digits: config.keep_digits,
            engine: config.engine.as_str(),
            window_size: config.window_size,
            clip_tail: config.clip_tail,
            builtin_patterns: config.builtin_patterns,
            custom_patterns: config.patterns.len(),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let config_info = ConfigInfo::from_config(config, sources);
    let full_info = FullInfo {
        package: info,
        config: config_info,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        paint(full_info.package.name, Style::new().bold()),
        paint(full_info.package.version, Style::new().green())
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        println!("{}: {}", paint("License", Style::new().dimmed()), full_info.package.license);
    }
    if !full_info.package.repository.is_empty() {
        println!(
            "{}: {}",
            paint("Repository", Style::new().dimmed()),
            paint(full_info.package.repository, Style::new().cyan())
        );
    }

    let cfg = &full_info.config;
    println!();
    println!("{}", paint("Configuration", Style::new().bold().underline()));
    if let Some(ref path) = cfg.config_file {
        println!(
            "{}: {}",
            paint("Config file", Style::new().dimmed()),
            paint(path, Style::new().cyan())
        );
    } else {
        println!(
            "{}: {}",
            paint("Config file", Style::new().dimmed()),
            paint("none loaded", Style::new().yellow())
        );
    }
    println!("{}: {}", paint("Log level", Style::new().dimmed()), cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        println!("{}: {}", paint("Log directory", Style::new().dimmed()), dir);
    }
    print_opt("Input limit (bytes)", &cfg.max_input_bytes);

    println!();
    println!("{}", paint("Word Counts", Style::new().bold().underline()));
    println!("{}: {}", paint("Min word length", Style::new().dimmed()), cfg.min_word_length);
    println!("{}: {}", paint("Remove stop words", Style::new().dimmed()), cfg.remove_stopwords);
    println!("{}: {}", paint("Lemmatize", Style::new().dimmed()), cfg.lemmatize);
    println!("{}: {}", paint("Keep digits", Style::new().dimmed()), cfg.keep_digits);

    println!();
    println!("{}", paint("Collocations", Style::new().bold().underline()));
    println!("{}: {}", paint("Top N", Style::new().dimmed()), cfg.top_n);
    println!("{}: {}", paint("Engine", Style::new().dimmed()), cfg.engine);
    print_opt("Window size", &cfg.window_size);
    println!("{}: {}", paint("Clip tail", Style::new().dimmed()), cfg.clip_tail);
    println!(
        "{}: {}{}",
        paint("Patterns", Style::new().dimmed()),
        if cfg.builtin_patterns { "built-in" } else { "custom only" },
        if cfg.custom_patterns > 0 {
            format!(" + {} custom", cfg.custom_patterns)
        } else {
            String::new()
        }
    );

    Ok(())
}

/// Print an optional value or "(not set)".
fn print_opt<T: std::fmt::Display>(label: &str, value: &Option<T>) {
    match value {
        Some(v) => println!("{}: {}", paint(label, Style::new().dimmed()), v),
        None => println!(
            "{}: {}",
            paint(label, Style::new().dimmed()),
            paint("(not set)", Style::new().dimmed())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config::default()
    }

    fn test_sources() -> ConfigSources {
        ConfigSources::default()
    }

    #[test]
    fn test_cmd_info_text_succeeds() {
        assert!(cmd_info(InfoArgs::default(), false, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        assert!(cmd_info(InfoArgs::default(), true, &test_config(), &test_sources()).is_ok());
    }

    #[test]
    fn test_config_info_no_file() {
        let info = ConfigInfo::from_config(&test_config(), &test_sources());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.top_n, 20);
        assert_eq!(info.engine, "windowed");
        assert!(info.clip_tail);
    }

    #[test]
    fn test_config_info_counts_custom_patterns() {
        let config = Config {
            builtin_patterns: false,
            patterns: vec![phrasemine_core::Pattern::new(["NN", "NN"], "Compound")],
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &test_sources());
        assert_eq!(info.custom_patterns, 1);
        assert!(!info.builtin_patterns);
    }
}
