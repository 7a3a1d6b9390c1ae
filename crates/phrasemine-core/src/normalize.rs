//! Mixed-script text normalization.
//!
//! Turns CJK-punctuated, full-width, partly non-English input into clean
//! ASCII text that an English tokenizer and tagger can consume, without
//! destroying sentence punctuation or intra-word hyphenation.
//!
//! The pipeline is a fixed sequence of pure [`Stage`]s:
//!
//! 1. [`Stage::FoldPunctuation`]: CJK / full-width punctuation to ASCII
//! 2. [`Stage::FoldFullwidth`]: full-width forms to their half-width letters
//! 3. [`Stage::AsciiOnly`]: drop every non-ASCII codepoint
//! 4. [`Stage::ProtectSymbols`]: mask `-`/`.`, blank other symbols, unmask
//! 5. [`Stage::StripDigits`]: only when digits are not kept
//!
//! Order matters: folding must run before the ASCII filter or the folded
//! characters would be discarded, and symbol protection assumes ASCII input.

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

/// Marker standing in for a protected hyphen during symbol stripping.
pub const HYPHEN_SENTINEL: char = '\u{E000}';

/// Marker standing in for a protected period during symbol stripping.
pub const PERIOD_SENTINEL: char = '\u{E001}';

/// Offset between a full-width form and its ASCII counterpart.
const FULLWIDTH_OFFSET: u32 = 0xFEE0;

/// CJK and full-width punctuation with their ASCII replacements.
const PUNCTUATION_FOLDS: &[(char, &str)] = &[
    ('\u{FF0C}', ","),   // ，
    ('\u{3001}', ","),   // 、
    ('\u{3002}', "."),   // 。
    ('\u{FF0E}', "."),   // ．
    ('\u{FF1B}', ";"),   // ；
    ('\u{FF1A}', ":"),   // ：
    ('\u{FF1F}', "?"),   // ？
    ('\u{FF01}', "!"),   // ！
    ('\u{201C}', "\""),  // “
    ('\u{201D}', "\""),  // ”
    ('\u{2018}', "'"),   // ‘
    ('\u{2019}', "'"),   // ’
    ('\u{300C}', "\""),  // 「
    ('\u{300D}', "\""),  // 」
    ('\u{300E}', "\""),  // 『
    ('\u{300F}', "\""),  // 』
    ('\u{FF08}', "("),   // （
    ('\u{FF09}', ")"),   // ）
    ('\u{3010}', "["),   // 【
    ('\u{3011}', "]"),   // 】
    ('\u{300A}', "<"),   // 《
    ('\u{300B}', ">"),   // 》
    ('\u{3008}', "<"),   // 〈
    ('\u{3009}', ">"),   // 〉
    ('\u{FF5E}', "~"),   // ～
    ('\u{301C}', "~"),   // 〜
    ('\u{2014}', "-"),   // —
    ('\u{2013}', "-"),   // –
    ('\u{2026}', "..."), // …
];

/// Options controlling the normalization pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Keep ASCII digits. When `false`, digits are removed as the last stage.
    pub keep_digits: bool,
    /// Extra characters preserved by symbol stripping (e.g. `'` or `,`).
    pub extra_keep: Vec<char>,
}

impl NormalizeOptions {
    /// Options that keep digits and no extra symbols.
    pub fn keep_digits() -> Self {
        Self {
            keep_digits: true,
            extra_keep: Vec::new(),
        }
    }

    /// Add characters to preserve through symbol stripping.
    pub fn with_extra_keep(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.extra_keep.extend(chars);
        self
    }
}

/// One step of the normalization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Map CJK / full-width punctuation glyphs to ASCII.
    FoldPunctuation,
    /// Map full-width letters, digits and symbols to ASCII.
    FoldFullwidth,
    /// Drop every codepoint above 0x7F.
    AsciiOnly,
    /// Keep letter-flanked hyphens and non-decimal periods, blank other symbols.
    ProtectSymbols,
    /// Remove ASCII digits.
    StripDigits,
}

impl Stage {
    /// Every stage in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::FoldPunctuation,
        Self::FoldFullwidth,
        Self::AsciiOnly,
        Self::ProtectSymbols,
        Self::StripDigits,
    ];

    /// Stable name used in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FoldPunctuation => "fold_punctuation",
            Self::FoldFullwidth => "fold_fullwidth",
            Self::AsciiOnly => "ascii_only",
            Self::ProtectSymbols => "protect_symbols",
            Self::StripDigits => "strip_digits",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered normalization pipeline.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub const fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// The options this normalizer was built with.
    pub const fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Stages that will run, in order.
    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ALL
            .into_iter()
            .filter(|stage| *stage != Stage::StripDigits || !self.options.keep_digits)
    }

    /// Apply a single stage.
    ///
    /// Stages assume their predecessors have run; [`Stage::ProtectSymbols`]
    /// on non-ASCII input treats every non-ASCII character as a symbol.
    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        match stage {
            Stage::FoldPunctuation => fold_punctuation(text),
            Stage::FoldFullwidth => fold_fullwidth(text),
            Stage::AsciiOnly => ascii_only(text),
            Stage::ProtectSymbols => protect_symbols(text, &self.options.extra_keep),
            Stage::StripDigits => strip_digits(text),
        }
    }

    /// Run the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::ReservedCharacter`] if the input contains one
    /// of the masking sentinels, or [`NormalizeError::ReservedKeepCharacter`]
    /// if the extra-keep set does.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), keep_digits = self.options.keep_digits))]
    pub fn normalize(&self, text: &str) -> Result<String, NormalizeError> {
        check_reserved(text)?;
        if let Some(&c) = self.options.extra_keep.iter().find(|c| is_sentinel(**c)) {
            return Err(NormalizeError::ReservedKeepCharacter {
                codepoint: c as u32,
            });
        }

        let mut current = text.to_string();
        for stage in self.stages() {
            current = self.apply_stage(stage, &current);
            tracing::trace!(stage = stage.as_str(), len = current.len(), "stage applied");
        }
        Ok(current)
    }
}

/// Normalize text with default symbol handling.
///
/// # Errors
///
/// Returns [`NormalizeError::ReservedCharacter`] when the input contains a
/// masking sentinel.
pub fn normalize(text: &str, keep_digits: bool) -> Result<String, NormalizeError> {
    Normalizer::new(NormalizeOptions {
        keep_digits,
        extra_keep: Vec::new(),
    })
    .normalize(text)
}

const fn is_sentinel(c: char) -> bool {
    c == HYPHEN_SENTINEL || c == PERIOD_SENTINEL
}

fn check_reserved(text: &str) -> Result<(), NormalizeError> {
    match text.char_indices().find(|(_, c)| is_sentinel(*c)) {
        Some((offset, c)) => Err(NormalizeError::ReservedCharacter {
            codepoint: c as u32,
            offset,
        }),
        None => Ok(()),
    }
}

/// Stage 1: fold CJK punctuation glyphs.
pub fn fold_punctuation(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match PUNCTUATION_FOLDS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, ascii)) => out.push_str(ascii),
            None => out.push(c),
        }
    }
    out
}

/// Whether `c` is one of the full-width forms (every codepoint in the
/// Halfwidth and Fullwidth Forms block whose name starts with FULLWIDTH).
pub const fn is_fullwidth_form(c: char) -> bool {
    matches!(c, '\u{FF01}'..='\u{FF60}' | '\u{FFE0}'..='\u{FFE6}')
}

/// Stage 2: fold full-width forms whose shifted codepoint is ASCII.
pub fn fold_fullwidth(text: &str) -> String {
    text.chars()
        .map(|c| {
            if !is_fullwidth_form(c) {
                return c;
            }
            let shifted = c as u32 - FULLWIDTH_OFFSET;
            if shifted <= 0x7F {
                char::from_u32(shifted).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Stage 3: keep only ASCII codepoints.
pub fn ascii_only(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Stage 4: mask, strip, unmask.
///
/// A hyphen survives only between two letters; a period survives unless it
/// sits between two digits. Every other character that is not alphanumeric,
/// whitespace or listed in `extra_keep` becomes a single space. Output has
/// the same number of characters as the input.
pub fn protect_symbols(text: &str, extra_keep: &[char]) -> String {
    let chars: Vec<char> = text.chars().collect();

    let masked: Vec<char> = chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
            let next = chars.get(i + 1).copied();
            match c {
                '-' if prev.is_some_and(|p| p.is_ascii_alphabetic())
                    && next.is_some_and(|n| n.is_ascii_alphabetic()) =>
                {
                    HYPHEN_SENTINEL
                }
                '.' if !(prev.is_some_and(|p| p.is_ascii_digit())
                    && next.is_some_and(|n| n.is_ascii_digit())) =>
                {
                    PERIOD_SENTINEL
                }
                _ => c,
            }
        })
        .collect();

    masked
        .into_iter()
        .map(|c| {
            if c == HYPHEN_SENTINEL {
                '-'
            } else if c == PERIOD_SENTINEL {
                '.'
            } else if c.is_ascii_alphanumeric() || c.is_whitespace() || extra_keep.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Stage 5: remove ASCII digits.
pub fn strip_digits(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn norm(text: &str) -> String {
        normalize(text, true).unwrap()
    }

    #[test]
    fn hyphenated_word_survives() {
        assert_eq!(
            norm("bi-directional optimization"),
            "bi-directional optimization"
        );
    }

    #[test]
    fn math_minus_becomes_space() {
        assert_eq!(norm("3 - 2 result is 1"), "3   2 result is 1");
    }

    #[test]
    fn decimal_point_becomes_space() {
        assert_eq!(norm("The value is 3.14"), "The value is 3 14");
    }

    #[test]
    fn sentence_period_survives() {
        assert_eq!(norm("Another one."), "Another one.");
    }

    #[test]
    fn ellipsis_folds_to_periods() {
        assert_eq!(norm("Wait\u{2026}"), "Wait...");
    }

    #[test]
    fn cjk_punctuation_folds() {
        let out = norm("Hello\u{FF0C}world\u{3002}Really\u{FF1F}");
        assert_eq!(out, "Hello world.Really ");
    }

    #[test]
    fn fullwidth_letters_and_digits_fold() {
        assert_eq!(fold_fullwidth("\u{FF21}\u{FF42}\u{FF13}"), "Ab3");
        assert_eq!(norm("\u{FF28}\u{FF49} there"), "Hi there");
    }

    #[test]
    fn non_fullwidth_characters_untouched() {
        assert_eq!(fold_fullwidth("abc \u{4F60}\u{597D} \u{00E9}"), "abc \u{4F60}\u{597D} \u{00E9}");
        // Halfwidth katakana share the block but are not full-width forms.
        assert_eq!(fold_fullwidth("\u{FF76}"), "\u{FF76}");
    }

    #[test]
    fn fullwidth_outside_ascii_kept_then_dropped() {
        // FULLWIDTH CENT SIGN shifts above 0x7F and is left alone.
        assert_eq!(fold_fullwidth("\u{FFE0}"), "\u{FFE0}");
        assert_eq!(norm("\u{FFE0}5"), "5");
    }

    #[test]
    fn chinese_text_dropped() {
        assert_eq!(norm("Hello \u{4F60}\u{597D} world"), "Hello  world");
    }

    #[test]
    fn digits_removed_when_requested() {
        assert_eq!(normalize("Room 101 is here.", false).unwrap(), "Room  is here.");
    }

    #[test]
    fn stage_list_respects_keep_digits() {
        let keep = Normalizer::new(NormalizeOptions::keep_digits());
        assert!(!keep.stages().any(|s| s == Stage::StripDigits));
        let strip = Normalizer::default();
        assert_eq!(strip.stages().last(), Some(Stage::StripDigits));
    }

    #[test]
    fn extra_keep_preserves_symbols() {
        let normalizer =
            Normalizer::new(NormalizeOptions::keep_digits().with_extra_keep(['\'', ',']));
        assert_eq!(
            normalizer.normalize("don't stop, ok?").unwrap(),
            "don't stop, ok "
        );
    }

    #[test]
    fn hyphen_at_edges_not_protected() {
        assert_eq!(norm("-start end- mid-dle"), " start end  mid-dle");
    }

    #[test]
    fn chained_hyphens_all_protected() {
        assert_eq!(norm("state-of-the-art"), "state-of-the-art");
    }

    #[test]
    fn sentinel_in_input_rejected() {
        let err = normalize("bad \u{E000} input", true).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::ReservedCharacter {
                codepoint: 0xE000,
                offset: 4
            }
        );
        assert!(normalize("x\u{E001}", false).is_err());
    }

    #[test]
    fn sentinel_in_extra_keep_rejected() {
        let normalizer = Normalizer::new(NormalizeOptions::default().with_extra_keep([PERIOD_SENTINEL]));
        assert_eq!(
            normalizer.normalize("fine text").unwrap_err(),
            NormalizeError::ReservedKeepCharacter { codepoint: 0xE001 }
        );
    }

    #[test]
    fn protect_symbols_preserves_length() {
        let input = "a-b 1.2 c. d-3 #!";
        assert_eq!(
            protect_symbols(input, &[]).chars().count(),
            input.chars().count()
        );
    }

    proptest! {
        #[test]
        fn idempotent_on_ascii(s in "[ -~\t\n]{0,80}", keep in any::<bool>()) {
            let once = normalize(&s, keep).unwrap();
            let twice = normalize(&once, keep).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn output_is_ascii(s in "\\PC{0,60}") {
            prop_assume!(!s.contains(HYPHEN_SENTINEL) && !s.contains(PERIOD_SENTINEL));
            let out = normalize(&s, true).unwrap();
            prop_assert!(out.is_ascii());
        }
    }
}
