//! Closed-class English words and their Penn Treebank tags.
//!
//! Function words are a small, stable set, so the lexicon tagger looks them
//! up directly and leaves only open-class words to suffix heuristics.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Lowercase closed-class word to Penn tag.
pub static CLOSED_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    let groups: &[(&str, &[&str])] = &[
        (
            "DT",
            &[
                "the", "a", "an", "this", "that", "these", "those", "each", "every", "either",
                "neither", "another", "some", "any", "no", "all", "both", "half",
            ],
        ),
        (
            "IN",
            &[
                "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
                "into", "through", "during", "before", "after", "above", "below", "from", "up",
                "down", "over", "under", "around", "among", "across", "behind", "beyond",
                "near", "off", "onto", "toward", "towards", "upon", "within", "without",
                "since", "until", "because", "although", "though", "while", "whether", "if",
                "unless", "than", "like", "per", "via", "despite", "throughout", "along",
                "beside", "besides", "inside", "outside", "except",
            ],
        ),
        ("TO", &["to"]),
        ("CC", &["and", "or", "but", "nor", "yet", "plus"]),
        (
            "PRP",
            &[
                "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
                "myself", "yourself", "himself", "herself", "itself", "ourselves",
                "yourselves", "themselves",
            ],
        ),
        ("PRP$", &["my", "your", "his", "its", "our", "their"]),
        ("WP", &["who", "whom", "what"]),
        ("WP$", &["whose"]),
        ("WDT", &["which", "whatever", "whichever"]),
        ("WRB", &["when", "where", "why", "how", "whenever", "wherever"]),
        (
            "MD",
            &[
                "can", "could", "may", "might", "must", "shall", "should", "will", "would",
                "ca", "wo", "ought",
            ],
        ),
        (
            "RB",
            &[
                "not", "n't", "very", "too", "also", "just", "only", "even", "still", "already",
                "always", "never", "often", "sometimes", "usually", "again", "ever", "here",
                "now", "then", "soon", "almost", "quite", "rather", "really", "perhaps",
                "maybe", "however", "therefore", "thus", "so", "once", "yet", "away", "back",
                "together", "instead", "else", "well", "much", "far", "later", "ago",
            ],
        ),
        (
            "JJ",
            &[
                "good", "new", "first", "last", "long", "great", "little", "own", "other",
                "old", "right", "big", "high", "different", "small", "large", "next", "early",
                "young", "important", "few", "public", "bad", "same", "able", "free", "sure",
                "clear", "full", "whole", "real", "best", "better", "main", "hard", "easy",
                "strong", "true", "simple", "open", "certain", "low", "short", "several",
                "many", "more", "most", "less", "least", "such", "fine", "hot", "cold", "red",
                "blue", "green", "black", "white", "happy", "ready", "nice", "quick", "fast",
                "slow", "deep", "wide", "late", "common", "possible", "available",
            ],
        ),
        ("UH", &["oh", "yes", "hello", "hi", "wow", "ok", "okay", "please"]),
        // "be", "have", "do" forms
        ("VB", &["be", "have", "do"]),
        ("VBP", &["am", "are", "'m", "'re", "'ve"]),
        ("VBZ", &["is", "has", "does"]),
        ("VBD", &["was", "were", "had", "did"]),
        ("VBN", &["been", "done"]),
        ("VBG", &["being", "having", "doing"]),
    ];

    for (tag, words) in groups {
        for word in *words {
            map.entry(*word).or_insert(*tag);
        }
    }
    map
});

/// Penn tag for a closed-class word (lowercase), if known.
pub fn closed_class_tag(word: &str) -> Option<&'static str> {
    CLOSED_CLASS.get(word).copied()
}
