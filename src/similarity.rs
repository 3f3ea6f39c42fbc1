//! Fuzzy similarity between tokenized phrases.
//!
//! The fuzzy matcher only needs "one score per corpus entry, higher is more
//! similar", so the comparison technique sits behind [`DocumentSimilarity`]
//! and can be swapped for an embedding model without touching the matcher.

use std::collections::{HashMap, HashSet};

use crate::error::ConceptResult;

/// Scores a query token sequence against every entry of a corpus.
pub trait DocumentSimilarity: Send + Sync {
    /// One similarity per `corpus` entry, in corpus order.
    fn similarity(&self, corpus: &[Vec<String>], query: &[String]) -> ConceptResult<Vec<f64>>;
}

/// Cosine similarity of TF-IDF bag-of-words vectors.
///
/// IDF weights are fitted on the corpus passed to each call, so rare tokens
/// shared with the query count for more than common ones. Scores are in
/// `[0, 1]`; an entry sharing no token with the query scores `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfCosine;

impl TfIdfCosine {
    fn idf(corpus: &[Vec<String>]) -> HashMap<String, f64> {
        let mut df: HashMap<String, usize> = HashMap::new();
        for entry in corpus {
            let distinct: HashSet<String> = entry.iter().map(|t| t.to_lowercase()).collect();
            for token in distinct {
                *df.entry(token).or_insert(0) += 1;
            }
        }
        let n = corpus.len() as f64;
        df.into_iter()
            .map(|(token, d)| (token, ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0))
            .collect()
    }

    fn vectorize(tokens: &[String], idf: &HashMap<String, f64>, unseen: f64) -> HashMap<String, f64> {
        let mut vector: HashMap<String, f64> = HashMap::new();
        for token in tokens {
            *vector.entry(token.to_lowercase()).or_insert(0.0) += 1.0;
        }
        for (token, weight) in vector.iter_mut() {
            *weight *= idf.get(token).copied().unwrap_or(unseen);
        }
        vector
    }
}

/// Cosine of two sparse vectors, clamped to `[0, 1]`.
pub fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(k, va)| b.get(k).map(|vb| va * vb))
        .sum();
    let norm_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let norm_b = b.values().map(|v| v * v).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

impl DocumentSimilarity for TfIdfCosine {
    fn similarity(&self, corpus: &[Vec<String>], query: &[String]) -> ConceptResult<Vec<f64>> {
        let idf = Self::idf(corpus);
        // A token no corpus entry contains: df = 0.
        let unseen = (1.0 + corpus.len() as f64).ln() + 1.0;
        let q = Self::vectorize(query, &idf, unseen);
        Ok(corpus
            .iter()
            .map(|entry| cosine(&Self::vectorize(entry, &idf, unseen), &q))
            .collect())
    }
}
