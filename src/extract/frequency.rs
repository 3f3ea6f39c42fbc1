//! Frequency-based keyphrase extraction.
//!
//! Pipeline: join the document, rank candidate phrases with [`RakeRanker`],
//! re-weight each score by a normal density over the phrase's token count
//! (favoring 2-3 word phrases), sort, then keep only multi-word phrases made
//! entirely of nouns and adjectives.

use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::config::{FrequencyConfig, MatchConfig};
use crate::document::{Document, Phrase, ScoredPhrase, sort_descending};
use crate::error::ConceptResult;
use crate::matcher::{FuzzyMatcher, MatchResult};
use crate::nlp::pos::{self, LexiconTagger, PosTagger};
use crate::similarity::TfIdfCosine;

use super::rake::RakeRanker;
use super::{KeyphraseExtractor, Strategy};

/// Density at `x` of a normal distribution with mean `mu` and std dev `sigma`.
///
/// Underflows to `0.0` far from the mean, which silently zeroes a score
/// rather than removing the phrase.
pub fn length_weight(x: usize, mu: f64, sigma: f64) -> f64 {
    let z = (x as f64 - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
}

/// Re-weight raw scores by [`length_weight`] and sort, highest first.
pub fn weight_by_length(phrases: Vec<ScoredPhrase>, mu: f64, sigma: f64) -> Vec<ScoredPhrase> {
    let mut weighted: Vec<ScoredPhrase> = phrases
        .into_iter()
        .map(|p| {
            let weight = length_weight(p.token_count(), mu, sigma);
            ScoredPhrase::new(p.score * weight, p.phrase)
        })
        .collect();
    sort_descending(&mut weighted);
    weighted
}

/// Keep phrases whose every token is a noun or adjective and that are longer
/// than `max(min_len, 1)` tokens. Input order is preserved.
pub fn filter_by_pos(
    phrases: &[ScoredPhrase],
    tagger: &dyn PosTagger,
    min_len: usize,
) -> ConceptResult<Vec<Phrase>> {
    let mut kept = Vec::new();
    for p in phrases {
        if p.token_count() > min_len.max(1) && pos::only_nouns_and_adjectives(tagger, &p.phrase)? {
            kept.push(p.phrase.clone());
        }
    }
    Ok(kept)
}

/// Frequency-based extractor with an injectable part-of-speech tagger.
#[derive(Clone)]
pub struct FrequencyExtractor {
    config: FrequencyConfig,
    ranker: RakeRanker,
    tagger: Arc<dyn PosTagger>,
}

impl fmt::Debug for FrequencyExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrequencyExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for FrequencyExtractor {
    fn default() -> Self {
        let config = FrequencyConfig::default();
        Self {
            ranker: RakeRanker::new(&config.punctuation),
            config,
            tagger: Arc::new(LexiconTagger),
        }
    }
}

impl FrequencyExtractor {
    pub fn new(config: FrequencyConfig) -> ConceptResult<Self> {
        config.validate()?;
        Ok(Self {
            ranker: RakeRanker::new(&config.punctuation),
            config,
            tagger: Arc::new(LexiconTagger),
        })
    }

    /// Use `tagger` for the noun/adjective filter.
    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    pub fn config(&self) -> &FrequencyConfig {
        &self.config
    }

    /// Length-weighted candidate phrases before the POS filter, highest first.
    pub fn scored(&self, document: &Document) -> Vec<ScoredPhrase> {
        let raw = self.ranker.rank(&document.joined());
        weight_by_length(raw, self.config.mu, self.config.sigma)
    }

    /// Ranked keyphrases with explicit length-curve parameters.
    pub fn keyphrases(&self, document: &Document, mu: f64, sigma: f64) -> ConceptResult<Vec<Phrase>> {
        let config = FrequencyConfig {
            mu,
            sigma,
            ..self.config.clone()
        };
        config.validate()?;
        let raw = self.ranker.rank(&document.joined());
        let weighted = weight_by_length(raw, mu, sigma);
        let kept = filter_by_pos(&weighted, self.tagger.as_ref(), config.min_len)?;
        tracing::debug!(
            candidates = weighted.len(),
            kept = kept.len(),
            "frequency-based extraction complete"
        );
        Ok(kept)
    }
}

impl KeyphraseExtractor for FrequencyExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::FrequencyBased
    }

    fn extract(&self, document: &Document) -> ConceptResult<Vec<Phrase>> {
        self.keyphrases(document, self.config.mu, self.config.sigma)
    }
}

/// Ranked multi-word keyphrases using the default tagger.
pub fn keyphrases(document: &Document, mu: f64, sigma: f64) -> ConceptResult<Vec<Phrase>> {
    FrequencyExtractor::default().keyphrases(document, mu, sigma)
}

/// Fuzzy known/new split of `candidate`'s keyphrases against `library`,
/// using TF-IDF cosine similarity between phrases.
pub fn match_concepts(
    library: &[Document],
    candidate: &Document,
    sim_threshold: f64,
) -> ConceptResult<MatchResult> {
    let matcher = FuzzyMatcher::new(
        Arc::new(TfIdfCosine),
        &MatchConfig {
            sim_threshold,
            ..Default::default()
        },
    )?;
    matcher.match_concepts(&FrequencyExtractor::default(), library, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConceptError;
    use crate::nlp::pos::TaggedToken;

    fn sample() -> Document {
        Document::from_lines(["The quick brown fox jumps.", "Quick foxes are agile."])
    }

    #[test]
    fn length_weight_peaks_at_mu() {
        let at_mu = length_weight(2, 2.0, 1.5);
        assert!((at_mu - 1.0 / (1.5 * (2.0 * PI).sqrt())).abs() < 1e-12);
        assert!(length_weight(1, 2.0, 1.5) < at_mu);
        assert!(length_weight(3, 2.0, 1.5) < at_mu);
        assert!((length_weight(1, 2.0, 1.5) - length_weight(3, 2.0, 1.5)).abs() < 1e-12);
    }

    #[test]
    fn length_weight_underflows_far_from_mu() {
        assert_eq!(length_weight(10_000, 2.0, 1.5), 0.0);
    }

    #[test]
    fn weighting_prefers_short_phrases() {
        let raw = vec![
            ScoredPhrase::new(10.0, "a b c d e f g"),
            ScoredPhrase::new(8.0, "a b"),
        ];
        let weighted = weight_by_length(raw, 2.0, 1.5);
        assert_eq!(weighted[0].phrase, "a b");
    }

    #[test]
    fn filter_drops_single_words_and_verbs() {
        let phrases = keyphrases(&sample(), 2.0, 1.5).unwrap();
        assert_eq!(phrases, vec!["quick foxes".to_string()]);
        for p in &phrases {
            assert!(p.split_whitespace().count() > 1);
        }
    }

    #[test]
    fn common_research_vocabulary_survives() {
        let doc = Document::from_lines([
            "Computer systems research improves information retrieval.",
            "New research results on computer vision problems.",
        ]);
        let phrases = keyphrases(&doc, 2.0, 1.5).unwrap();
        assert!(phrases.contains(&"computer vision problems".to_string()), "{phrases:?}");
    }

    #[test]
    fn scientific_noun_phrases() {
        let doc = Document::from_lines([
            "Convolutional-recurrent architectures and support vector machines for protein structure prediction.",
        ]);
        let phrases = FrequencyExtractor::default().extract(&doc).unwrap();
        for expected in [
            "convolutional-recurrent architectures",
            "support vector machines",
            "protein structure prediction",
        ] {
            assert!(phrases.contains(&expected.to_string()), "{expected}: {phrases:?}");
        }
    }

    #[test]
    fn scored_keeps_everything_before_filtering() {
        let scored = FrequencyExtractor::default().scored(&sample());
        let phrases: Vec<_> = scored.iter().map(|p| p.phrase.as_str()).collect();
        assert!(phrases.contains(&"agile"));
        assert!(phrases.contains(&"quick brown fox jumps"));
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn min_len_raises_the_bar() {
        let phrases = vec![
            ScoredPhrase::new(3.0, "neural network architecture"),
            ScoredPhrase::new(2.0, "neural network"),
        ];
        let kept = filter_by_pos(&phrases, &LexiconTagger, 2).unwrap();
        assert_eq!(kept, vec!["neural network architecture".to_string()]);
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(keyphrases(&Document::default(), 2.0, 1.5).unwrap().is_empty());
    }

    #[test]
    fn invalid_sigma_is_rejected() {
        let err = keyphrases(&sample(), 2.0, 0.0).unwrap_err();
        assert!(matches!(err, ConceptError::InvalidConfig { .. }));
    }

    struct NounTagger;

    impl PosTagger for NounTagger {
        fn tag(&self, tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>> {
            Ok(tokens.iter().map(|t| (t.to_string(), "NN".to_string())).collect())
        }
    }

    struct FailingTagger;

    impl PosTagger for FailingTagger {
        fn tag(&self, _tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>> {
            Err(ConceptError::extraction("pos tagging", "model not loaded"))
        }
    }

    #[test]
    fn injected_tagger_decides_the_filter() {
        let extractor = FrequencyExtractor::default().with_tagger(Arc::new(NounTagger));
        let phrases = extractor.extract(&sample()).unwrap();
        assert!(phrases.contains(&"quick brown fox jumps".to_string()));
        assert!(!phrases.contains(&"agile".to_string()));
    }

    #[test]
    fn tagger_failure_propagates() {
        let extractor = FrequencyExtractor::default().with_tagger(Arc::new(FailingTagger));
        let err = extractor.extract(&sample()).unwrap_err();
        assert!(matches!(err, ConceptError::Extraction { .. }));
    }
}
