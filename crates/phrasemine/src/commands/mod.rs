//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;
use owo_colors::{OwoColorize, Stream, Style};
use phrasemine_core::config::Config;
use phrasemine_core::nlp::AnalysisContext;

pub mod analyze;
pub mod collocations;
pub mod frequency;
pub mod info;
pub mod normalize;
pub mod patterns;
pub mod schema;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Style `value` for stdout.
///
/// Plain text unless stdout supports color or `--color always` is set.
pub fn paint(value: impl std::fmt::Display, style: Style) -> String {
    value
        .if_supports_color(Stream::Stdout, |v| v.style(style))
        .to_string()
}

/// The built-in English adapters with the configured stop words.
pub fn context(config: &Config) -> AnalysisContext {
    AnalysisContext::builtin().with_stopwords(config.stopwords())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_input_file_enforces_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("big.txt")).unwrap();
        std::fs::write(&path, "0123456789").unwrap();

        assert_eq!(read_input_file(&path, None).unwrap(), "0123456789");
        assert!(read_input_file(&path, Some(10)).is_ok());
        let err = read_input_file(&path, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn paint_follows_color_override() {
        owo_colors::set_override(true);
        let colored = paint("Corpus:", Style::new().bold());
        assert!(colored.starts_with('\u{1b}'), "{colored:?}");
        assert!(colored.contains("Corpus:"));
        owo_colors::set_override(false);
        assert_eq!(paint("Corpus:", Style::new().bold()), "Corpus:");
        owo_colors::unset_override();
    }

    #[test]
    fn read_input_file_missing() {
        let err = read_input_file(Utf8Path::new("/nonexistent/phrasemine.txt"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn context_uses_extra_stopwords() {
        let config = Config {
            extra_stopwords: vec!["um".into()],
            ..Config::default()
        };
        let ctx = context(&config);
        assert!(ctx.stopwords().contains("um"));
        assert!(ctx.stopwords().contains("the"));
    }
}
