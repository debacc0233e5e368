//! Text normalization and stop words

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static JOINER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([-/])\s*").expect("Invalid joiner regex"));

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Common English stop words, shared by the tokenizer and the TF-IDF vectorizer.
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
    "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
    "amongst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything",
    "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "both", "but", "by", "can",
    "cannot", "could", "did", "do", "does", "doing", "done", "down", "due", "during",
    "each", "eg", "eight", "either", "eleven", "else", "elsewhere", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few",
    "fifteen", "fifty", "first", "five", "for", "former", "formerly", "forty", "four",
    "from", "further", "had", "has", "have", "having", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself",
    "his", "how", "however", "hundred", "i", "ie", "if", "in", "indeed", "into", "is",
    "it", "its", "itself", "just", "last", "latter", "latterly", "least", "less", "made",
    "many", "may", "me", "meanwhile", "might", "mine", "more", "moreover", "most",
    "mostly", "much", "must", "my", "myself", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only",
    "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out",
    "over", "own", "per", "perhaps", "please", "quite", "rather", "re", "really", "same",
    "seem", "seemed", "seeming", "seems", "several", "she", "should", "since", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "ten", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "third", "this", "those",
    "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "toward", "towards", "twelve", "twenty", "two", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Check a lowercase word against the stop word list
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORD_SET.contains(word)
}

/// Normalize free text for skill matching.
///
/// Lowercases, replaces punctuation with spaces, collapses whitespace and
/// glues hyphens and slashes to their neighbours (`"front - end"` becomes
/// `"front-end"`). Skill joiners survive inside tokens: a `.` between two
/// alphanumerics (`node.js`) and a `+` or `#` trailing an alphanumeric
/// (`c++`, `c#`, `5+ years`).
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();

    let mut replaced = String::with_capacity(lowered.len());
    let mut last: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        let keep = if c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '/' {
            true
        } else {
            match c {
                '.' => {
                    last.is_some_and(char::is_alphanumeric)
                        && chars.get(i + 1).is_some_and(|next| next.is_alphanumeric())
                }
                '+' | '#' => last.is_some_and(|prev| prev.is_alphanumeric() || prev == '+' || prev == '#'),
                _ => false,
            }
        };

        let emitted = if keep { c } else { ' ' };
        replaced.push(emitted);
        last = Some(emitted);
    }

    let collapsed = WHITESPACE_REGEX.replace_all(&replaced, " ");
    JOINER_REGEX.replace_all(&collapsed, "$1").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Python, Java; and (SQL)!"), "python java and sql");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  rust\t\tand \n go  "), "rust and go");
    }

    #[test]
    fn test_glues_hyphens_and_slashes() {
        assert_eq!(normalize("front - end"), "front-end");
        assert_eq!(normalize("CI / CD pipelines"), "ci/cd pipelines");
        assert_eq!(normalize("scikit -learn"), "scikit-learn");
    }

    #[test]
    fn test_keeps_skill_joiners() {
        assert_eq!(normalize("Node.js and ASP.NET"), "node.js and asp.net");
        assert_eq!(normalize("C++, C# developer"), "c++ c# developer");
        assert_eq!(normalize("5+ years of experience."), "5+ years of experience");
    }

    #[test]
    fn test_drops_loose_symbols() {
        assert_eq!(normalize("python. java"), "python java");
        assert_eq!(normalize("+ # . c"), "c");
        assert_eq!(normalize("node . js"), "node js");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ...  "), "");
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("with"));
        assert!(!is_stop_word("python"));
        assert!(!is_stop_word("go"));
    }

    proptest! {
        #[test]
        fn test_normalize_idempotent(text in "[a-zA-Z0-9 .,;:+#/\\-_!?()\t\n]{0,80}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn test_normalize_never_panics(text in ".*") {
            let _ = normalize(&text);
        }
    }
}
