//! NLP pipeline capability used by skill extraction

use crate::processing::text_processor::is_stop_word;

/// A single token produced by an NLP pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub is_stop: bool,
    pub is_punct: bool,
}

impl Token {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let is_punct = !text.chars().any(char::is_alphanumeric);
        let is_stop = is_stop_word(&text.to_lowercase());
        Self { text, is_stop, is_punct }
    }

    /// Content tokens are the ones worth matching against the taxonomy
    pub fn is_content(&self) -> bool {
        !self.is_stop && !self.is_punct
    }
}

/// Tokenization and noun-phrase chunking over normalized text.
///
/// Implementations are shared across ranking workers, so they must be
/// `Send + Sync` and must not mutate shared state.
pub trait NlpPipeline: Send + Sync {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<Token>>;

    fn noun_phrases(&self, text: &str) -> anyhow::Result<Vec<String>>;
}

/// Whitespace tokenizer with stop-word-delimited phrase chunks.
///
/// A phrase is a maximal run of consecutive content tokens, so
/// `"experience with machine learning systems"` yields
/// `["experience", "machine learning systems"]`.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPipeline;

impl RuleBasedPipeline {
    pub fn new() -> Self {
        Self
    }
}

impl NlpPipeline for RuleBasedPipeline {
    fn tokenize(&self, text: &str) -> anyhow::Result<Vec<Token>> {
        Ok(text.split_whitespace().map(Token::new).collect())
    }

    fn noun_phrases(&self, text: &str) -> anyhow::Result<Vec<String>> {
        let mut phrases = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for word in text.split_whitespace() {
            if Token::new(word).is_content() {
                current.push(word);
            } else if !current.is_empty() {
                phrases.push(current.join(" "));
                current.clear();
            }
        }

        if !current.is_empty() {
            phrases.push(current.join(" "));
        }

        Ok(phrases)
    }
}
