//! Curated word lists for the built-in language adapters.
//!
//! Stop words, common verb bases, number words, irregular plurals, and the
//! suffix exceptions the lexicon tagger and rule lemmatizer rely on.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// The NLTK English stop-word list.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Regular verbs common enough to anchor tagging and lemmatization.
///
/// Irregular verbs live in [`crate::dictionaries::irregular_verbs`].
pub static COMMON_VERBS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "accept", "achieve", "add", "agree", "allow", "analyze", "answer", "appear", "apply",
        "argue", "arrive", "ask", "assume", "attack", "avoid", "base", "believe", "belong",
        "call", "carry", "cause", "change", "check", "choose", "claim", "clean", "close",
        "collect", "compare", "complete", "consider", "contain", "continue", "control", "cook",
        "copy", "count", "cover", "create", "cry", "decide", "define", "deliver", "depend",
        "describe", "design", "destroy", "develop", "die", "discover", "discuss", "divide",
        "dress", "drop", "enjoy", "enter", "establish", "expect", "explain", "express", "face",
        "fail", "fill", "finish", "fix", "focus", "follow", "force", "form", "gather", "guess",
        "handle", "happen", "hate", "help", "hope", "identify", "ignore", "imagine", "improve",
        "include", "increase", "indicate", "inform", "insist", "intend", "introduce", "invite",
        "involve", "join", "jump", "kill", "kiss", "laugh", "learn", "like", "listen", "live",
        "look", "love", "manage", "mark", "marry", "matter", "measure", "mention", "mind",
        "miss", "move", "need", "notice", "obtain", "occur", "offer", "open", "order", "own",
        "pass", "perform", "pick", "place", "plan", "play", "point", "prefer", "prepare",
        "present", "prevent", "produce", "promise", "protect", "prove", "provide", "publish",
        "pull", "push", "raise", "reach", "realize", "receive", "recognize", "record", "reduce",
        "refer", "reflect", "refuse", "remain", "remember", "remove", "repeat", "replace",
        "reply", "report", "represent", "require", "rest", "result", "return", "reveal",
        "save", "seem", "serve", "settle", "share", "shout", "smile", "solve", "sound", "start",
        "stay", "stop", "study", "succeed", "suffer", "suggest", "supply", "support", "suppose",
        "surprise", "talk", "taste", "tend", "thank", "touch", "train", "travel", "treat",
        "try", "turn", "use", "visit", "wait", "walk", "want", "warn", "wash", "watch", "wish",
        "wonder", "work", "worry", "optimize", "practice", "translate", "type",
    ]
    .into_iter()
    .collect()
});

/// Spelled-out cardinal numbers.
pub static NUMBER_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
        "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
        "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
        "hundred", "thousand", "million", "billion", "dozen",
    ]
    .into_iter()
    .collect()
});

/// Irregular noun plurals mapped to their singular.
pub static IRREGULAR_PLURALS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        [
            ("children", "child"),
            ("men", "man"),
            ("women", "woman"),
            ("people", "person"),
            ("mice", "mouse"),
            ("geese", "goose"),
            ("feet", "foot"),
            ("teeth", "tooth"),
            ("oxen", "ox"),
            ("lives", "life"),
            ("wives", "wife"),
            ("knives", "knife"),
            ("leaves", "leaf"),
            ("wolves", "wolf"),
            ("halves", "half"),
            ("shelves", "shelf"),
            ("criteria", "criterion"),
            ("phenomena", "phenomenon"),
            ("analyses", "analysis"),
            ("theses", "thesis"),
            ("crises", "crisis"),
        ]
        .into_iter()
        .collect()
    });

/// Nouns ending in `-s` that are not plurals.
pub static SINGULAR_S_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "news", "series", "species", "bus", "gas", "lens", "bonus", "virus", "status",
        "campus", "focus", "census", "chaos", "atlas", "canvas", "corpus", "basis", "analysis",
        "thesis", "crisis", "physics", "mathematics", "economics", "politics", "ethics",
    ]
    .into_iter()
    .collect()
});

/// Words ending in `-ly` that are not adverbs, with their tag.
pub static LY_EXCEPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("friendly", "JJ"),
        ("lovely", "JJ"),
        ("likely", "JJ"),
        ("ugly", "JJ"),
        ("lonely", "JJ"),
        ("silly", "JJ"),
        ("costly", "JJ"),
        ("elderly", "JJ"),
        ("holy", "JJ"),
        ("daily", "JJ"),
        ("weekly", "JJ"),
        ("monthly", "JJ"),
        ("family", "NN"),
        ("ally", "NN"),
        ("belly", "NN"),
        ("jelly", "NN"),
        ("bully", "NN"),
        ("assembly", "NN"),
        ("reply", "VB"),
        ("apply", "VB"),
        ("supply", "VB"),
        ("rely", "VB"),
        ("fly", "VB"),
        ("multiply", "VB"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in `-ing` that are nouns rather than gerunds.
pub static ING_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "thing", "nothing", "something", "anything", "everything", "king", "ring", "spring",
        "string", "wing", "morning", "evening", "ceiling", "pudding", "sibling", "duckling",
    ]
    .into_iter()
    .collect()
});

/// Nouns ending in a suffix the tagger otherwise reads as adjectival.
pub static ADJECTIVE_SUFFIX_NOUNS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "animal", "signal", "hospital", "capital", "festival", "journal", "material",
        "proposal", "approval", "arrival", "interval", "rival", "principal", "metal", "total",
        "table", "cable", "vegetable", "fable", "motive", "objective", "detective", "native",
        "executive", "representative", "relative", "topic", "music", "logic", "panic",
        "traffic", "republic",
    ]
    .into_iter()
    .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwords_cover_function_words() {
        for word in ["the", "and", "of", "don't", "wouldn't"] {
            assert!(ENGLISH_STOPWORDS.contains(&word), "{word}");
        }
        assert!(!ENGLISH_STOPWORDS.contains(&"map"));
    }

    #[test]
    fn lookup_tables() {
        assert!(COMMON_VERBS.contains("look"));
        assert!(NUMBER_WORDS.contains("seven"));
        assert_eq!(IRREGULAR_PLURALS.get("children"), Some(&"child"));
        assert_eq!(LY_EXCEPTIONS.get("family"), Some(&"NN"));
        assert!(ING_NOUNS.contains("morning"));
    }
}
