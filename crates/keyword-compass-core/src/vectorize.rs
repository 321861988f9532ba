//! Batch-local TF-IDF vectorization of keyword texts.
//!
//! Each preprocessed keyword becomes a term-frequency–inverse-document-
//! frequency vector over unigrams and bigrams. The vocabulary is built
//! from the batch itself, capped at [`TfIdfVectorizer::MAX_VOCAB`]
//! dimensions (highest document frequency wins, ties alphabetical), with
//! English stopwords excluded. IDF is smoothed: `ln((n+1)/(df+1)) + 1`.
//! Rows are L2-normalized so cosine similarity reduces to a dot product
//! scale and k-means distances stay comparable across keyword lengths.
//!
//! Everything here is deterministic: vocabulary order, term indices, and
//! vector contents depend only on the input batch, never on hash-map
//! iteration order.

use std::collections::{BTreeMap, BTreeSet};

/// Common English stopwords excluded from vocabulary and topic labels.
const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else", "few",
    "for", "from", "further", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "me", "might", "more", "most", "must", "my",
    "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out",
    "over", "own", "same", "shall", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "why", "will", "with", "would", "you", "your",
];

pub(crate) fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Lowercase, strip punctuation to whitespace, collapse repeated
/// whitespace.
pub fn preprocess(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Preprocessed tokens with stopwords and single characters removed.
pub(crate) fn content_tokens(text: &str) -> Vec<String> {
    preprocess(text)
        .split_whitespace()
        .filter(|t| t.len() > 1 && !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Unigram + bigram terms for one keyword text.
fn terms(text: &str) -> Vec<String> {
    let tokens = content_tokens(text);
    let mut out = tokens.clone();
    for pair in tokens.windows(2) {
        out.push(format!("{} {}", pair[0], pair[1]));
    }
    out
}

/// Batch-local TF-IDF vectorizer.
pub struct TfIdfVectorizer {
    vocab: Vec<String>,
    index: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Vocabulary dimension cap.
    pub const MAX_VOCAB: usize = 1000;

    /// Build the vocabulary and IDF table from a batch of keyword texts.
    pub fn fit(texts: &[String]) -> Self {
        let docs: Vec<Vec<String>> = texts.iter().map(|t| terms(t)).collect();

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in &docs {
            let unique: BTreeSet<&String> = doc.iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }

        // Cap the vocabulary: highest document frequency first, ties
        // alphabetical, then restore alphabetical order for stable indices.
        let mut ranked: Vec<(String, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(Self::MAX_VOCAB);
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = texts.len() as f64;
        let mut vocab = Vec::with_capacity(ranked.len());
        let mut index = BTreeMap::new();
        let mut idf = Vec::with_capacity(ranked.len());
        for (i, (term, df)) in ranked.into_iter().enumerate() {
            idf.push(((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0);
            index.insert(term.clone(), i);
            vocab.push(term);
        }

        Self { vocab, index, idf }
    }

    pub fn dims(&self) -> usize {
        self.vocab.len()
    }

    /// TF-IDF vector for one text, L2-normalized.
    ///
    /// A text sharing no terms with the vocabulary yields the zero vector.
    pub fn transform(&self, text: &str) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocab.len()];
        for term in terms(text) {
            if let Some(&i) = self.index.get(&term) {
                vector[i] += 1.0;
            }
        }
        for (i, value) in vector.iter_mut().enumerate() {
            if *value > 0.0 {
                *value *= self.idf[i];
            }
        }
        l2_normalize(&mut vector);
        vector
    }

    /// Fit a batch and transform every member.
    pub fn fit_transform(texts: &[String]) -> (Self, Vec<Vec<f64>>) {
        let vectorizer = Self::fit(texts);
        let vectors = texts.iter().map(|t| vectorizer.transform(t)).collect();
        (vectorizer, vectors)
    }
}

fn l2_normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > f64::EPSILON {
        for v in vector.iter_mut() {
            *v /= norm;
        }
    }
}

/// Cosine similarity between two vectors.
///
/// Returns 0.0 for empty or mismatched-length vectors.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f64::EPSILON {
        return 0.0;
    }
    dot / denom
}
