//! Corpus loading.
//!
//! Walks a directory, keeps files matching the include globs, and reduces
//! each one to plain prose keyed by its path relative to the root. Plain
//! text is taken as-is; Markdown goes through pulldown-cmark so code blocks,
//! headings and markup never reach the analyzers.

use std::collections::BTreeMap;

use camino::Utf8Path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use walkdir::WalkDir;

use crate::error::{AnalysisError, AnalysisResult};
use crate::text::is_toc_line;

/// Include globs used when none are configured.
pub const DEFAULT_INCLUDE: &[&str] = &["*.txt", "*.md"];

/// How a document's raw bytes are turned into prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Taken verbatim.
    PlainText,
    /// CommonMark, reduced to paragraph text.
    Markdown,
}

impl DocumentKind {
    /// Kind from a file extension (Markdown for `md`/`markdown`).
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("md" | "markdown") => Self::Markdown,
            _ => Self::PlainText,
        }
    }
}

/// Compile include globs (defaults when empty).
///
/// # Errors
///
/// [`AnalysisError::Glob`] when a pattern does not compile.
pub fn include_set<S: AsRef<str>>(patterns: &[S]) -> AnalysisResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() {
        for pattern in DEFAULT_INCLUDE {
            builder.add(Glob::new(pattern)?);
        }
    } else {
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
    }
    Ok(builder.build()?)
}

/// Load every matching document under `dir`, recursively.
///
/// Keys are `/`-separated paths relative to `dir`. Files that cannot be read
/// (or are not UTF-8) are logged and skipped; the rest still load. Symbolic
/// links to files are read, links to directories are not followed.
///
/// # Errors
///
/// [`AnalysisError::Io`] when `dir` itself cannot be listed,
/// [`AnalysisError::Glob`] for an invalid include pattern.
pub fn load_documents<S: AsRef<str>>(
    dir: &Utf8Path,
    include: &[S],
) -> AnalysisResult<BTreeMap<String, String>> {
    load_documents_within(dir, include, None)
}

/// [`load_documents`] with a cap on the total size of the matched files.
///
/// Sizes come from file metadata and are checked before each file is read.
///
/// # Errors
///
/// As [`load_documents`], plus [`AnalysisError::TooLarge`] once the matched
/// files exceed `max_bytes` together.
#[tracing::instrument(skip_all, fields(dir = %dir, max_bytes = ?max_bytes))]
pub fn load_documents_within<S: AsRef<str>>(
    dir: &Utf8Path,
    include: &[S],
    max_bytes: Option<u64>,
) -> AnalysisResult<BTreeMap<String, String>> {
    let matcher = include_set(include)?;
    let mut documents = BTreeMap::new();
    let mut total: u64 = 0;

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) if error.depth() == 0 => {
                return Err(AnalysisError::Io {
                    path: dir.to_path_buf(),
                    source: error.into(),
                });
            }
            Err(error) => {
                tracing::warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };

        let Some(path) = Utf8Path::from_path(entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };
        let is_file = if entry.path_is_symlink() {
            path.is_file()
        } else {
            entry.file_type().is_file()
        };
        if !is_file {
            continue;
        }

        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }

        if let Some(limit) = max_bytes {
            let size = match std::fs::metadata(path) {
                Ok(metadata) => metadata.len(),
                Err(error) => {
                    tracing::warn!(%path, %error, "skipping unreadable document");
                    continue;
                }
            };
            total = total.saturating_add(size);
            if total > limit {
                return Err(AnalysisError::TooLarge {
                    path: path.to_path_buf(),
                    size: total,
                    limit,
                });
            }
        }

        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let name = relative.components().map(|c| c.as_str()).collect::<Vec<_>>();
                let text = extract_text(DocumentKind::from_path(path), &raw);
                tracing::debug!(%path, chars = text.chars().count(), "loaded document");
                documents.insert(name.join("/"), text);
            }
            Err(error) => tracing::warn!(%path, %error, "skipping unreadable document"),
        }
    }

    tracing::info!(documents = documents.len(), "corpus loaded");
    Ok(documents)
}

/// Reduce raw document content to prose, one paragraph per line.
///
/// Lines that start with a digit are dropped as table-of-contents entries.
pub fn extract_text(kind: DocumentKind, raw: &str) -> String {
    let prose = match kind {
        DocumentKind::PlainText => raw.to_string(),
        DocumentKind::Markdown => markdown_prose(raw),
    };
    prose
        .lines()
        .filter(|line| !line.trim().is_empty() && !is_toc_line(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown paragraphs, list items and quotes as plain lines.
///
/// Code blocks, inline code, headings, HTML and frontmatter are removed;
/// link and emphasis text is kept without markup.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn markdown_prose(text: &str) -> String {
    let text = strip_frontmatter(text);
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut result = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in Parser::new_ext(text, options) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. }) => skip_depth += 1,
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_)) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => result.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => result.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::TableRow)
                if skip_depth == 0 =>
            {
                if !result.ends_with('\n') {
                    result.push('\n');
                }
            }
            Event::End(TagEnd::TableCell) if skip_depth == 0 => result.push(' '),
            _ => {}
        }
    }

    result
}

/// Drop a leading `---` delimited YAML block.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::fs;

    fn utf8_dir(dir: &tempfile::TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn markdown_drops_code_and_headings() {
        let input = "# Title\n\nSome *text* with [a link](http://x).\n\n```rust\nlet x = 1;\n```\n\n- first item\n- second item\n";
        let prose = markdown_prose(input);
        assert!(!prose.contains("Title"));
        assert!(!prose.contains("let x"));
        assert!(prose.contains("Some text with a link."));
        assert!(prose.contains("first item\n"));
    }

    #[test]
    fn markdown_drops_frontmatter() {
        let prose = markdown_prose("---\nauthor: someone\n---\n\nBody text.");
        assert!(!prose.contains("author"));
        assert!(prose.contains("Body text."));
    }

    #[test]
    fn toc_lines_are_dropped() {
        let raw = "Contents\n1 Introduction\n2. Methods\nThe study began in spring.\n";
        assert_eq!(
            extract_text(DocumentKind::PlainText, raw),
            "Contents\nThe study began in spring."
        );
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(DocumentKind::from_path(Utf8Path::new("a/b.MD")), DocumentKind::Markdown);
        assert_eq!(DocumentKind::from_path(Utf8Path::new("notes.txt")), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_path(Utf8Path::new("README")), DocumentKind::PlainText);
    }

    #[test]
    fn loads_matching_files_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("a.txt"), "Alpha text.").unwrap();
        fs::write(root.join("b.md"), "# Heading\n\nBeta text.").unwrap();
        fs::write(root.join("c.rs"), "fn main() {}").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested/d.txt"), "Delta text.").unwrap();

        let empty: [&str; 0] = [];
        let docs = load_documents(&root, &empty).unwrap();
        let names: Vec<&str> = docs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a.txt", "b.md", "nested/d.txt"]);
        assert_eq!(docs["b.md"], "Beta text.");
    }

    #[test]
    fn custom_include_globs() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("a.txt"), "Alpha.").unwrap();
        fs::write(root.join("b.md"), "Beta.").unwrap();

        let docs = load_documents(&root, &["*.md"]).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs.contains_key("b.md"));
    }

    #[test]
    fn unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("good.txt"), "Readable.").unwrap();
        fs::write(root.join("bad.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let empty: [&str; 0] = [];
        let docs = load_documents(&root, &empty).unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs.contains_key("good.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn directory_symlink_cycle_is_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("a.txt"), "Alpha text.").unwrap();
        std::os::unix::fs::symlink(&root, root.join("loop")).unwrap();

        let docs = load_documents(&root, &["**/*.txt"]).unwrap();
        let names: Vec<&str> = docs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn file_symlink_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("a.txt"), "Alpha text.").unwrap();
        std::os::unix::fs::symlink(root.join("a.txt"), root.join("b.txt")).unwrap();

        let docs = load_documents(&root, &["*.txt"]).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs["b.txt"], "Alpha text.");
    }

    #[test]
    fn size_limit_applies_to_matched_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = utf8_dir(&dir);
        fs::write(root.join("a.txt"), "0123456789").unwrap();
        fs::write(root.join("b.txt"), "0123456789").unwrap();
        fs::write(root.join("skip.csv"), "x".repeat(100)).unwrap();

        let empty: [&str; 0] = [];
        assert_eq!(load_documents_within(&root, &empty, Some(20)).unwrap().len(), 2);

        let err = load_documents_within(&root, &empty, Some(15)).unwrap_err();
        match err {
            AnalysisError::TooLarge { size, limit, .. } => {
                assert_eq!(size, 20);
                assert_eq!(limit, 15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_directory_is_an_error() {
        let empty: [&str; 0] = [];
        let err = load_documents(Utf8Path::new("/definitely/not/here"), &empty).unwrap_err();
        assert!(matches!(err, AnalysisError::Io { .. }));
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let err = include_set(&["[unclosed"]).unwrap_err();
        assert!(matches!(err, AnalysisError::Glob(_)));
        assert!(err.is_configuration());
    }
}
