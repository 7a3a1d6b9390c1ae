//! Transcript cleanup.
//!
//! Source documents are often dialogue transcripts exported from word
//! processors: every line starts with a speaker label, and a table of
//! contents leaves `<title>\t<page>/<total>` residue behind. These helpers
//! remove that scaffolding before normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Regex for a leading `Name:` speaker label (ASCII or fullwidth colon).
static SPEAKER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[A-Za-z \t]+[:\u{FF1A}][ \t]*").expect("valid regex"));

/// Regex for table-of-contents residue: CJK title, tabs, `page/total`.
static PAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\u{4E00}-\u{9FA5}]+\t+\d+/\d+\n?").expect("valid regex")
});

/// Regex for runs of whitespace.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Remove a leading speaker label from every line.
///
/// `Peppa Pig: Hello!` becomes `Hello!`. Only letters and spaces may precede
/// the colon, so times (`10:30`) and URLs are left alone.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn strip_speaker_labels(text: &str) -> String {
    SPEAKER_LABEL.replace_all(text, "").into_owned()
}

/// Remove table-of-contents residue such as `第一章\t\t3/39`.
pub fn strip_page_markers(text: &str) -> String {
    PAGE_MARKER.replace_all(text, "").into_owned()
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Whether a line looks like a numbered table-of-contents entry.
pub fn is_toc_line(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}
