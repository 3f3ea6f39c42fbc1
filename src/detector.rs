//! Detector facade: top-level API for conceptdiff.
//!
//! The `Detector` owns the configuration and the two pluggable collaborators
//! (part-of-speech tagger and phrase similarity) and builds a configured
//! extractor for whichever strategy the caller picks.

use std::fmt;
use std::sync::Arc;

use crate::config::{ConceptConfig, TaggerConfig};
use crate::document::{Document, Phrase};
use crate::error::ConceptResult;
use crate::extract::{
    Extractor, FrequencyExtractor, KeyphraseExtractor, Strategy, TextRankExtractor, TfIdfExtractor,
};
use crate::matcher::{self, FuzzyMatcher, MatchResult};
use crate::nlp::pos::{LexiconTagger, PosTagger};
use crate::similarity::{DocumentSimilarity, TfIdfCosine};

/// Novelty detector: extracts keyphrases and splits a candidate document's
/// concepts into known and new against a library.
#[derive(Clone)]
pub struct Detector {
    config: ConceptConfig,
    tagger: Arc<dyn PosTagger>,
    similarity: Arc<dyn DocumentSimilarity>,
}

impl fmt::Debug for Detector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The nlprule tagger when a model is configured, the lexicon tagger otherwise.
fn configured_tagger(config: &TaggerConfig) -> ConceptResult<Arc<dyn PosTagger>> {
    match &config.model {
        #[cfg(feature = "nlprule")]
        Some(path) => Ok(Arc::new(crate::nlp::pos::NlpruleTagger::from_path(path)?)),
        #[cfg(not(feature = "nlprule"))]
        Some(_) => Err(crate::error::ConceptError::invalid_config(
            "tagger.model needs conceptdiff built with the `nlprule` feature",
        )),
        None => Ok(Arc::new(LexiconTagger)),
    }
}

impl Detector {
    /// Create a detector with the configured tagger and the default
    /// similarity comparator.
    pub fn new(config: ConceptConfig) -> ConceptResult<Self> {
        config.validate()?;
        let tagger = configured_tagger(&config.tagger)?;
        tracing::info!(
            mu = config.frequency.mu,
            sigma = config.frequency.sigma,
            fraction = config.tfidf.fraction,
            sim_threshold = config.matching.sim_threshold,
            "initializing conceptdiff detector"
        );
        Ok(Self {
            config,
            tagger,
            similarity: Arc::new(TfIdfCosine),
        })
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn with_similarity(mut self, similarity: Arc<dyn DocumentSimilarity>) -> Self {
        self.similarity = similarity;
        self
    }

    pub fn config(&self) -> &ConceptConfig {
        &self.config
    }

    /// Build a configured extractor for `strategy`.
    ///
    /// `corpus` is only used by the TF-IDF strategy, which fits its
    /// vocabulary on it.
    pub fn extractor(&self, strategy: Strategy, corpus: &[Document]) -> ConceptResult<Extractor> {
        let extractor = match strategy {
            Strategy::FrequencyBased => FrequencyExtractor::new(self.config.frequency.clone())?
                .with_tagger(Arc::clone(&self.tagger))
                .into(),
            Strategy::TfIdfBased => {
                TfIdfExtractor::with_config(corpus, self.config.tfidf.clone())?.into()
            }
            Strategy::GraphBased => TextRankExtractor::new(self.config.textrank.clone())?
                .with_tagger(Arc::clone(&self.tagger))
                .into(),
        };
        Ok(extractor)
    }

    /// Ranked keyphrases of `document`.
    ///
    /// An empty `corpus` fits TF-IDF on `document` alone.
    pub fn extract(
        &self,
        strategy: Strategy,
        document: &Document,
        corpus: &[Document],
    ) -> ConceptResult<Vec<Phrase>> {
        let extractor = if corpus.is_empty() {
            self.extractor(strategy, std::slice::from_ref(document))?
        } else {
            self.extractor(strategy, corpus)?
        };
        extractor.extract(document)
    }

    /// Split `candidate`'s keyphrases into known and new against `library`.
    ///
    /// The frequency strategy matches multi-word phrases fuzzily; the
    /// single-word strategies match exactly. TF-IDF is fitted on the library
    /// together with the candidate.
    pub fn match_concepts(
        &self,
        strategy: Strategy,
        library: &[Document],
        candidate: &Document,
    ) -> ConceptResult<MatchResult> {
        let mut corpus = Vec::new();
        if strategy == Strategy::TfIdfBased {
            corpus.extend_from_slice(library);
            corpus.push(candidate.clone());
        }
        let extractor = self.extractor(strategy, &corpus)?;

        if strategy.uses_fuzzy_matching() {
            let matcher = FuzzyMatcher::new(Arc::clone(&self.similarity), &self.config.matching)?;
            matcher.match_concepts(&extractor, library, candidate)
        } else {
            matcher::match_exact(&extractor, library, candidate)
        }
    }
}
