//! Concept matchers: partition a candidate's keyphrases into known and new.
//!
//! The exact matcher is plain set algebra over extracted phrases. The fuzzy
//! matcher asks a [`DocumentSimilarity`] comparator how close each candidate
//! phrase is to every library phrase and reduces those scores with a
//! [`MatchPolicy`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{MatchConfig, MatchPolicy};
use crate::document::{Document, KeyphraseSet};
use crate::error::{ConceptError, ConceptResult};
use crate::extract::KeyphraseExtractor;
use crate::similarity::DocumentSimilarity;

/// Candidate keyphrases split into those the library already covers and
/// those it does not. The two sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub known: KeyphraseSet,
    pub new: KeyphraseSet,
}

impl MatchResult {
    /// Every candidate keyphrase, known or new.
    pub fn candidates(&self) -> KeyphraseSet {
        self.known.union(&self.new).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.new.is_empty()
    }

    /// Share of candidate keyphrases that are new, `0.0` when there are none.
    pub fn novelty(&self) -> f64 {
        let total = self.known.len() + self.new.len();
        if total == 0 {
            0.0
        } else {
            self.new.len() as f64 / total as f64
        }
    }
}

/// Exact-string matching: `known = library ∩ candidate`, `new = candidate − known`.
pub fn match_exact<E: KeyphraseExtractor + ?Sized>(
    extractor: &E,
    library: &[Document],
    candidate: &Document,
) -> ConceptResult<MatchResult> {
    let library_keywords = extractor.library_keyphrases(library)?;
    let candidate_keywords = extractor.keyphrase_set(candidate)?;

    let known: KeyphraseSet = candidate_keywords
        .intersection(&library_keywords)
        .cloned()
        .collect();
    let new: KeyphraseSet = candidate_keywords.difference(&known).cloned().collect();

    tracing::info!(
        strategy = %extractor.strategy(),
        library = library_keywords.len(),
        known = known.len(),
        new = new.len(),
        "exact concept match"
    );
    Ok(MatchResult { known, new })
}

/// Nearest-neighbour matcher over a pluggable similarity comparator.
#[derive(Clone)]
pub struct FuzzyMatcher {
    similarity: Arc<dyn DocumentSimilarity>,
    sim_threshold: f64,
    policy: MatchPolicy,
}

impl std::fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("sim_threshold", &self.sim_threshold)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl FuzzyMatcher {
    pub fn new(similarity: Arc<dyn DocumentSimilarity>, config: &MatchConfig) -> ConceptResult<Self> {
        config.validate()?;
        Ok(Self {
            similarity,
            sim_threshold: config.sim_threshold,
            policy: config.policy,
        })
    }

    pub fn sim_threshold(&self) -> f64 {
        self.sim_threshold
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Reduce one candidate's per-library-phrase scores to a decision score.
    ///
    /// `None` when there is nothing to compare against.
    fn decision_score(&self, mut scores: Vec<f64>) -> Option<f64> {
        if scores.is_empty() {
            return None;
        }
        match self.policy {
            MatchPolicy::BestMatch => scores.into_iter().reduce(f64::max),
            MatchPolicy::TopKMean { k } => {
                scores.sort_by(|a, b| b.total_cmp(a));
                let top = &scores[..k.min(scores.len())];
                Some(top.iter().sum::<f64>() / top.len() as f64)
            }
        }
    }

    /// Classify every keyphrase `extractor` finds in `candidate` against the
    /// keyphrases it finds in `library`.
    ///
    /// With an empty library no phrase has a best match, so all are new.
    pub fn match_concepts<E: KeyphraseExtractor + ?Sized>(
        &self,
        extractor: &E,
        library: &[Document],
        candidate: &Document,
    ) -> ConceptResult<MatchResult> {
        let library_phrases = extractor.library_keyphrases(library)?;
        let corpus: Vec<Vec<String>> = library_phrases.iter().map(|p| tokens_of(p)).collect();
        let candidate_phrases = extractor.keyphrase_set(candidate)?;

        let mut result = MatchResult::default();
        for phrase in candidate_phrases {
            let scores = self.similarity.similarity(&corpus, &tokens_of(&phrase))?;
            if scores.len() != corpus.len() {
                return Err(ConceptError::extraction(
                    "similarity",
                    format!(
                        "comparator returned {} scores for {} library phrases",
                        scores.len(),
                        corpus.len()
                    ),
                ));
            }
            match self.decision_score(scores) {
                Some(score) if score >= self.sim_threshold => {
                    tracing::debug!(%phrase, score, "known concept");
                    result.known.insert(phrase);
                }
                score => {
                    tracing::debug!(%phrase, ?score, "new concept");
                    result.new.insert(phrase);
                }
            }
        }

        tracing::info!(
            strategy = %extractor.strategy(),
            library = library_phrases.len(),
            known = result.known.len(),
            new = result.new.len(),
            threshold = self.sim_threshold,
            "fuzzy concept match"
        );
        Ok(result)
    }
}

fn tokens_of(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_string).collect()
}
