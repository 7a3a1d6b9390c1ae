//! Surface n-grams and sentence shapes.

use crate::frequency::{FrequencyMap, WordCount};
use crate::nlp::{AnalysisContext, TaggedToken};

/// Count every n-gram of `min_n..=max_n` tokens, joined with spaces.
///
/// Grams never wrap around the end of `tokens`. A `min_n` of zero is treated
/// as one.
#[tracing::instrument(skip_all, fields(tokens = tokens.len(), min_n, max_n))]
pub fn count_ngrams<S: AsRef<str>>(tokens: &[S], min_n: usize, max_n: usize) -> FrequencyMap {
    let mut counts = FrequencyMap::new();
    for n in min_n.max(1)..=max_n {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            let gram = window
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ");
            counts.increment(gram);
        }
    }
    counts
}

/// N-grams that occur more than once, most frequent first.
pub fn repeated_ngrams<S: AsRef<str>>(
    tokens: &[S],
    min_n: usize,
    max_n: usize,
    limit: usize,
) -> Vec<WordCount> {
    let mut repeated = count_ngrams(tokens, min_n, max_n).ranked();
    repeated.retain(|entry| entry.count > 1);
    repeated.truncate(limit);
    repeated
}

/// The POS tag sequence of one sentence, space-joined.
pub fn shape_of(tokens: &[TaggedToken]) -> String {
    tokens
        .iter()
        .map(|token| token.tag.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// How often each whole-sentence tag sequence occurs.
///
/// Sentences that fail to tag are skipped (and logged by the context).
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn sentence_shapes(ctx: &AnalysisContext, sentences: &[String]) -> FrequencyMap {
    count_shapes(&ctx.tag_sentences(sentences))
}

/// Shape counts for sentences that are already tagged; empty ones are ignored.
pub fn count_shapes(tagged: &[Vec<TaggedToken>]) -> FrequencyMap {
    tagged
        .iter()
        .filter(|tokens| !tokens.is_empty())
        .map(|tokens| shape_of(tokens))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn empty_input() {
        let empty: [&str; 0] = [];
        assert!(count_ngrams(&empty, 1, 3).is_empty());
    }

    #[test]
    fn counts_each_order() {
        let counts = count_ngrams(&words(&["a", "b", "a", "b"]), 1, 3);
        assert_eq!(counts.get("a"), 2);
        assert_eq!(counts.get("a b"), 2);
        assert_eq!(counts.get("b a"), 1);
        assert_eq!(counts.get("a b a"), 1);
        assert_eq!(counts.get("a b a b"), 0);
    }

    #[test]
    fn short_input_stops_early() {
        let counts = count_ngrams(&["only", "two"], 2, 4);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("only two"), 1);
    }

    #[test]
    fn zero_min_is_one() {
        let counts = count_ngrams(&["x"], 0, 1);
        assert_eq!(counts.get("x"), 1);
    }

    #[test]
    fn repeated_only_keeps_duplicates() {
        let repeated = repeated_ngrams(
            &words(&[
                "in", "the", "morning", "we", "code", "in", "the", "morning", "we", "ship",
            ]),
            2,
            4,
            50,
        );
        assert!(repeated.iter().all(|entry| entry.count > 1));
        assert!(repeated.iter().any(|entry| entry.word == "in the morning"));
        assert!(!repeated.iter().any(|entry| entry.word == "we ship"));
        // Equal counts fall back to phrase order.
        assert_eq!(repeated[0].word, "in the");
    }

    #[test]
    fn shapes_group_sentences_by_tags() {
        let ctx = AnalysisContext::builtin();
        let sentences = words(&["Look at the map.", "Look at the sky.", "Run."]);
        let shapes = sentence_shapes(&ctx, &sentences);
        assert_eq!(shapes.get("VB IN DT NN ."), 2);
        assert_eq!(shapes.total(), 3);
    }

    #[test]
    fn count_shapes_ignores_empty_sentences() {
        let tagged = vec![
            vec![TaggedToken::new("red", "JJ"), TaggedToken::new("car", "NN")],
            Vec::new(),
            vec![TaggedToken::new("blue", "JJ"), TaggedToken::new("sky", "NN")],
        ];
        let shapes = count_shapes(&tagged);
        assert_eq!(shapes.get("JJ NN"), 2);
        assert_eq!(shapes.total(), 2);
        assert_eq!(shapes.top(1)[0].word, "JJ NN");
    }

    #[test]
    fn shape_of_joins_tags() {
        let tokens = vec![TaggedToken::new("red", "JJ"), TaggedToken::new("car", "NN")];
        assert_eq!(shape_of(&tokens), "JJ NN");
    }
}
