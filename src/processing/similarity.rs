//! TF-IDF cosine similarity between two documents

use crate::error::{JobMatcherError, Result};
use crate::processing::text_processor::is_stop_word;
use log::warn;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Default cap on vocabulary size
pub const DEFAULT_MAX_FEATURES: usize = 1000;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid token regex"));

/// Pairwise text similarity on a 0-100 scale
pub trait TextSimilarity: Send + Sync {
    fn similarity(&self, doc_a: &str, doc_b: &str) -> Result<f64>;
}

/// TF-IDF vectorizer over unigrams and bigrams with English stop words removed
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    max_features: usize,
}

/// Document-term matrix produced by [`TfIdfVectorizer::fit_transform`].
///
/// Rows are L2-normalized, columns follow the sorted vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfIdfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self { max_features }
    }

    /// Lowercase, tokenize, drop stop words, then emit unigrams and bigrams
    fn analyze(&self, doc: &str) -> Vec<String> {
        let lowered = doc.to_lowercase();
        let words: Vec<&str> = TOKEN_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|word| !is_stop_word(word))
            .collect();

        let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        terms.extend(words.windows(2).map(|pair| pair.join(" ")));
        terms
    }

    pub fn fit_transform(&self, docs: &[&str]) -> Result<TfIdfMatrix> {
        let counts: Vec<HashMap<String, usize>> = docs
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // Corpus frequency and document frequency per term
        let mut corpus_freq: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in &counts {
            for (term, &count) in tf {
                let entry = corpus_freq.entry(term.as_str()).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        if corpus_freq.is_empty() {
            return Err(JobMatcherError::Similarity(
                "empty vocabulary; documents only contain stop words".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize, usize)> = corpus_freq
            .into_iter()
            .map(|(term, (freq, df))| (term, freq, df))
            .collect();
        if ranked.len() > self.max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(self.max_features);
            ranked.sort_by(|a, b| a.0.cmp(b.0));
        }

        let n_docs = docs.len() as f64;
        let idf: Vec<f64> = ranked
            .iter()
            .map(|(_, _, df)| ((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = ranked
                    .iter()
                    .zip(&idf)
                    .map(|((term, _, _), idf)| tf.get(*term).copied().unwrap_or(0) as f64 * idf)
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(TfIdfMatrix {
            vocabulary: ranked.iter().map(|(term, _, _)| term.to_string()).collect(),
            rows,
        })
    }
}

impl TfIdfMatrix {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Cosine similarity between two rows, 0 when either is all zeros
    pub fn cosine(&self, a: usize, b: usize) -> Result<f64> {
        let (row_a, row_b) = match (self.row(a), self.row(b)) {
            (Some(row_a), Some(row_b)) => (row_a, row_b),
            _ => {
                return Err(JobMatcherError::Similarity(format!(
                    "row index out of range: {} or {} (have {})",
                    a,
                    b,
                    self.rows.len()
                )))
            }
        };

        let dot: f64 = row_a.iter().zip(row_b).map(|(x, y)| x * y).sum();
        let norm_a = row_a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b = row_b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            Ok(0.0)
        } else {
            Ok(dot / (norm_a * norm_b))
        }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for value in row.iter_mut() {
            *value /= norm;
        }
    }
}

/// TF-IDF similarity fitted on exactly the two compared documents
#[derive(Debug, Clone, Default)]
pub struct TfIdfSimilarity {
    vectorizer: TfIdfVectorizer,
}

impl TfIdfSimilarity {
    pub fn new(max_features: usize) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(max_features),
        }
    }
}

impl TextSimilarity for TfIdfSimilarity {
    fn similarity(&self, doc_a: &str, doc_b: &str) -> Result<f64> {
        let matrix = self.vectorizer.fit_transform(&[doc_a, doc_b])?;
        Ok((matrix.cosine(0, 1)? * 100.0).clamp(0.0, 100.0))
    }
}

/// Similarity on a 0-100 scale, failing on an empty vocabulary
pub fn try_text_similarity(doc_a: &str, doc_b: &str) -> Result<f64> {
    TfIdfSimilarity::default().similarity(doc_a, doc_b)
}

/// Similarity on a 0-100 scale; vectorization failures count as 0
pub fn text_similarity(doc_a: &str, doc_b: &str) -> f64 {
    try_text_similarity(doc_a, doc_b).unwrap_or_else(|e| {
        warn!("Error calculating text similarity: {}", e);
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents() {
        let score = text_similarity("python developer with aws", "python developer with aws");
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_documents() {
        assert_eq!(text_similarity("python django", "marketing sales"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        let score = text_similarity(
            "python developer building rest services",
            "python engineer building data pipelines",
        );
        assert!(score > 0.0 && score < 100.0);
    }

    #[test]
    fn test_symmetric() {
        let a = "react frontend engineer with typescript";
        let b = "backend engineer with python and typescript";
        assert!((text_similarity(a, b) - text_similarity(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        let result = try_text_similarity("the and of", "c++ c#");
        assert!(matches!(result, Err(JobMatcherError::Similarity(_))));
        assert_eq!(text_similarity("the and of", "c++ c#"), 0.0);
    }

    #[test]
    fn test_one_sided_vocabulary() {
        // Only one document has terms: no error, but no similarity either
        assert_eq!(try_text_similarity("python", "the").unwrap(), 0.0);
    }

    #[test]
    fn test_analyze_unigrams_and_bigrams() {
        let vectorizer = TfIdfVectorizer::default();
        let terms = vectorizer.analyze("Machine learning with the Python language");

        assert!(terms.contains(&"machine".to_string()));
        assert!(terms.contains(&"machine learning".to_string()));
        // Stop words are dropped before bigrams are formed
        assert!(terms.contains(&"learning python".to_string()));
        assert!(!terms.iter().any(|t| t.contains("the")));
    }

    #[test]
    fn test_vocabulary_and_idf() {
        let vectorizer = TfIdfVectorizer::default();
        let matrix = vectorizer.fit_transform(&["rust rust go", "rust java"]).unwrap();

        assert_eq!(
            matrix.vocabulary(),
            &["go", "java", "rust", "rust go", "rust java", "rust rust"]
        );

        // "rust" appears in both documents, "go" only in the first
        let row = matrix.row(0).unwrap();
        let rust = row[2];
        let go = row[0];
        let idf_shared = 1.0;
        let idf_single = (3.0f64 / 2.0).ln() + 1.0;
        assert!((rust / go - (2.0 * idf_shared) / idf_single).abs() < 1e-9);

        let norm: f64 = row.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let vectorizer = TfIdfVectorizer::new(2);
        let matrix = vectorizer
            .fit_transform(&["kafka kafka kafka spark spark", "kafka spark airflow"])
            .unwrap();

        assert_eq!(matrix.vocabulary(), &["kafka", "spark"]);
    }

    #[test]
    fn test_cosine_out_of_range() {
        let matrix = TfIdfVectorizer::default().fit_transform(&["python"]).unwrap();
        assert!(matrix.cosine(0, 1).is_err());
    }
}
