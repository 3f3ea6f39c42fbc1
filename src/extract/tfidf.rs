//! TF-IDF keyword extraction.
//!
//! The vectorizer is fitted once on a corpus; its vocabulary and IDF weights
//! are immutable afterwards, so one [`TfIdfExtractor`] can serve concurrent
//! queries without locking.

use std::collections::{HashMap, HashSet};

use crate::config::TfIdfConfig;
use crate::document::{Document, Phrase, ScoredPhrase, sort_descending};
use crate::error::{ConceptError, ConceptResult};
use crate::matcher::{self, MatchResult};
use crate::nlp::stopwords::{self, StopwordFilter};
use crate::nlp::tokenize;

use super::{KeyphraseExtractor, Strategy};

/// Sparse vector: vocabulary index → weight.
pub type SparseVector = HashMap<usize, f64>;

/// Term-frequency / inverse-document-frequency vectorizer.
///
/// Uses smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, and L2-normalized
/// output vectors. Stopwords and one-character tokens never enter the
/// vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stopwords: StopwordFilter,
}

impl TfIdfVectorizer {
    /// Fit vocabulary and IDF weights over `corpus`, one string per document.
    pub fn fit<S: AsRef<str>>(corpus: &[S]) -> Self {
        Self::fit_with_stopwords(corpus, stopwords::english().clone())
    }

    pub fn fit_with_stopwords<S: AsRef<str>>(corpus: &[S], stopwords: StopwordFilter) -> Self {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();

        for doc in corpus {
            let distinct: HashSet<String> = analyze(doc.as_ref(), &stopwords).into_iter().collect();
            for term in distinct {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == df.len() {
                    df.push(0);
                }
                df[idx] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        tracing::info!(
            documents = corpus.len(),
            vocabulary = vocabulary.len(),
            "fitted tf-idf vectorizer"
        );
        Self {
            vocabulary,
            idf,
            stopwords,
        }
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    pub fn idf(&self, index: usize) -> Option<f64> {
        self.idf.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// L2-normalized TF-IDF vector of `document`. Out-of-vocabulary terms
    /// are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in analyze(document, &self.stopwords) {
            if let Some(idx) = self.index_of(&term) {
                *vector.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in vector.iter_mut() {
            *weight *= self.idf[*idx];
        }
        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }
        vector
    }
}

/// Lower-cased tokens of two or more characters, stopwords removed.
fn analyze(text: &str, stopwords: &StopwordFilter) -> Vec<String> {
    tokenize::words(text)
        .into_iter()
        .filter(|w| w.chars().count() >= 2 && !stopwords.is_stopword(w))
        .collect()
}

/// Keyword extractor over a fitted [`TfIdfVectorizer`].
#[derive(Debug, Clone)]
pub struct TfIdfExtractor {
    vectorizer: TfIdfVectorizer,
    config: TfIdfConfig,
}

impl TfIdfExtractor {
    /// Fit on `corpus` (each document joined with spaces) with default config.
    pub fn new(corpus: &[Document]) -> Self {
        let joined: Vec<String> = corpus.iter().map(Document::joined).collect();
        Self {
            vectorizer: TfIdfVectorizer::fit(&joined),
            config: TfIdfConfig::default(),
        }
    }

    pub fn with_config(corpus: &[Document], config: TfIdfConfig) -> ConceptResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(corpus)
        })
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }

    /// Distinct in-vocabulary words of `document` with their weights,
    /// highest first; ties keep first-occurrence order.
    pub fn scores(&self, document: &Document) -> Vec<ScoredPhrase> {
        let weights = self.vectorizer.transform(&document.joined());
        let mut seen = HashSet::new();
        let mut scored: Vec<ScoredPhrase> = document
            .tokens()
            .into_iter()
            .filter_map(|word| {
                let idx = self.vectorizer.index_of(&word)?;
                let weight = *weights.get(&idx)?;
                seen.insert(idx).then(|| ScoredPhrase::new(weight, word))
            })
            .collect();
        sort_descending(&mut scored);
        scored
    }

    /// The top `int(fraction × distinct in-vocabulary words)` words.
    pub fn keywords(&self, document: &Document, fraction: f64) -> ConceptResult<Vec<Phrase>> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ConceptError::invalid_config(format!(
                "fraction must be in [0, 1], got {fraction}"
            )));
        }
        let scored = self.scores(document);
        let cut = (scored.len() as f64 * fraction) as usize;
        tracing::debug!(in_vocabulary = scored.len(), kept = cut, "tf-idf keywords");
        Ok(scored.into_iter().take(cut).map(|p| p.phrase).collect())
    }

    /// Exact known/new split of `candidate`'s keywords against `library`.
    pub fn match_concepts(&self, library: &[Document], candidate: &Document) -> ConceptResult<MatchResult> {
        matcher::match_exact(self, library, candidate)
    }
}

impl KeyphraseExtractor for TfIdfExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::TfIdfBased
    }

    fn extract(&self, document: &Document) -> ConceptResult<Vec<Phrase>> {
        self.keywords(document, self.config.fraction)
    }
}
