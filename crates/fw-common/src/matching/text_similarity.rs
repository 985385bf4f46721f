use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Word tokens of two or more characters.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?u)\b\w\w+\b").expect("token pattern is a valid regex")
});

/// English stop words, the same set scikit-learn ships as `ENGLISH_STOP_WORDS`.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lower-cased content terms of `text`, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

fn term_counts(tokens: &[String]) -> BTreeMap<&str, f64> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0.0) += 1.0;
    }
    counts
}

/// Cosine similarity of two texts under TF-IDF weighting (0.0〜1.0).
///
/// The corpus is just the two inputs, rebuilt on every call. Terms are weighted
/// by raw count times the smoothed idf `ln((1 + n) / (1 + df)) + 1`. Missing or
/// empty text, an empty vocabulary, and non-finite arithmetic all yield 0.
pub fn similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (Some(a), Some(b)) = (a, b) else {
        return 0.0;
    };
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let tokens_a = tokenize(a);
    let tokens_b = tokenize(b);
    if tokens_a.is_empty() && tokens_b.is_empty() {
        tracing::debug!("empty vocabulary after stop-word removal; text score is zero");
        return 0.0;
    }

    let counts_a = term_counts(&tokens_a);
    let counts_b = term_counts(&tokens_b);

    const DOCUMENTS: f64 = 2.0;
    let idf = |term: &str| {
        let df = counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8;
        ((1.0 + DOCUMENTS) / (1.0 + df as f64)).ln() + 1.0
    };

    let weigh = |counts: &BTreeMap<&str, f64>| -> BTreeMap<String, f64> {
        counts
            .iter()
            .map(|(term, tf)| (term.to_string(), tf * idf(term)))
            .collect()
    };
    let vec_a = weigh(&counts_a);
    let vec_b = weigh(&counts_b);

    let dot: f64 = vec_a
        .iter()
        .filter_map(|(term, wa)| vec_b.get(term).map(|wb| wa * wb))
        .sum();
    let norm_a = vec_a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = vec_b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let cosine = dot / (norm_a * norm_b);
    if !cosine.is_finite() {
        tracing::warn!(cosine, "non-finite text similarity; degrading to zero");
        return 0.0;
    }

    cosine.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn absent_or_empty_text_scores_zero() {
        assert_eq!(similarity(None, Some("rust developer")), 0.0);
        assert_eq!(similarity(Some("rust developer"), None), 0.0);
        assert_eq!(similarity(Some(""), Some("rust developer")), 0.0);
        assert_eq!(similarity(Some("   "), Some("rust developer")), 0.0);
    }

    #[test]
    fn identical_text_scores_one() {
        let text = "Senior Rust engineer building async network services";
        let score = similarity(Some(text), Some(text));

        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stop_words_only_scores_zero() {
        assert_eq!(similarity(Some("the and of"), Some("with from into")), 0.0);
    }

    #[test]
    fn disjoint_vocabulary_scores_zero() {
        assert_eq!(similarity(Some("python django"), Some("figma sketch")), 0.0);
    }

    #[test]
    fn case_is_normalized() {
        let lower = similarity(Some("python react"), Some("python developer"));
        let upper = similarity(Some("PYTHON React"), Some("Python DEVELOPER"));

        assert!((lower - upper).abs() < 1e-12);
        assert!(lower > 0.0 && lower < 1.0);
    }

    #[test]
    fn shared_term_matches_hand_computed_value() {
        // "python react" vs "python golang": shared term has idf 1, unique terms idf ln(1.5)+1.
        let unique = (1.5f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + unique * unique);

        let score = similarity(Some("python react"), Some("python golang"));

        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn single_character_tokens_are_ignored() {
        assert_eq!(tokenize("C R x rust"), vec!["rust".to_string()]);
    }

    #[test]
    fn stop_word_only_side_scores_zero() {
        assert_eq!(tokenize("Go full stack system"), vec!["stack".to_string()]);
        assert_eq!(similarity(Some("Go"), Some("Go developer")), 0.0);
    }

    proptest! {
        #[test]
        fn similarity_is_symmetric(a in "[a-z ]{0,40}", b in "[a-z ]{0,40}") {
            let ab = similarity(Some(&a), Some(&b));
            let ba = similarity(Some(&b), Some(&a));
            prop_assert!((ab - ba).abs() < 1e-12);
            prop_assert!((0.0..=1.0).contains(&ab));
        }

        #[test]
        fn empty_side_is_always_zero(x in ".{0,40}") {
            prop_assert_eq!(similarity(Some(""), Some(&x)), 0.0);
            prop_assert_eq!(similarity(Some(&x), Some("")), 0.0);
        }
    }
}
