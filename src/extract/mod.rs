//! Keyphrase extraction strategies.
//!
//! Three interchangeable strategies share one contract,
//! [`KeyphraseExtractor::extract`]: a ranked list of phrases, best first.
//!
//! - **Frequency-based** (`frequency`): co-occurrence degree / frequency
//!   ranking, length weighting, noun/adjective filter. Multi-word phrases.
//! - **TF-IDF** (`tfidf`): per-word weights against a corpus fitted once.
//!   Single words.
//! - **Graph-based** (`textrank`): PageRank over a word co-occurrence graph.
//!
//! Scores are strategy-internal and never compared across strategies.

pub mod frequency;
pub mod rake;
pub mod tfidf;
pub mod textrank;

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::document::{Document, KeyphraseSet, Phrase};
use crate::error::{ConceptError, ConceptResult};

pub use frequency::FrequencyExtractor;
pub use rake::RakeRanker;
pub use textrank::TextRankExtractor;
pub use tfidf::{TfIdfExtractor, TfIdfVectorizer};

/// Which extraction strategy to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    FrequencyBased,
    TfIdfBased,
    GraphBased,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Self::FrequencyBased, Self::TfIdfBased, Self::GraphBased];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FrequencyBased => "frequency",
            Self::TfIdfBased => "tfidf",
            Self::GraphBased => "textrank",
        }
    }

    /// Whether matching for this strategy compares phrases fuzzily.
    ///
    /// Only the multi-word frequency strategy needs it; the single-word
    /// strategies match by exact string.
    pub fn uses_fuzzy_matching(&self) -> bool {
        matches!(self, Self::FrequencyBased)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ConceptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "frequency" | "frequency-based" | "rake" => Ok(Self::FrequencyBased),
            "tfidf" | "tf-idf" | "tfidf-based" => Ok(Self::TfIdfBased),
            "textrank" | "graph" | "graph-based" => Ok(Self::GraphBased),
            other => Err(ConceptError::invalid_config(format!(
                "unknown strategy \"{other}\" (expected frequency, tfidf, or textrank)"
            ))),
        }
    }
}

/// A keyphrase extraction strategy.
pub trait KeyphraseExtractor: Send + Sync {
    fn strategy(&self) -> Strategy;

    /// Ranked keyphrases of `document`, highest first.
    fn extract(&self, document: &Document) -> ConceptResult<Vec<Phrase>>;

    /// Like [`extract`](Self::extract), for untyped input.
    ///
    /// Fails with [`ConceptError::InputShape`] before any scoring when
    /// `value` is not a list of strings.
    fn extract_json(&self, value: &serde_json::Value) -> ConceptResult<Vec<Phrase>> {
        let document = Document::from_json(value)?;
        self.extract(&document)
    }

    /// The keyphrases of `document` as a set.
    fn keyphrase_set(&self, document: &Document) -> ConceptResult<KeyphraseSet> {
        Ok(self.extract(document)?.into_iter().collect())
    }

    /// Union of the keyphrases of every library document.
    ///
    /// Documents are extracted in parallel; set union makes the result
    /// independent of scheduling.
    fn library_keyphrases(&self, library: &[Document]) -> ConceptResult<KeyphraseSet> {
        let sets = library
            .par_iter()
            .map(|doc| self.keyphrase_set(doc))
            .collect::<ConceptResult<Vec<_>>>()?;
        Ok(sets.into_iter().flatten().collect())
    }
}

/// One of the three strategies, configured and ready to extract.
#[derive(Debug, Clone)]
pub enum Extractor {
    FrequencyBased(FrequencyExtractor),
    TfIdfBased(TfIdfExtractor),
    GraphBased(TextRankExtractor),
}

impl KeyphraseExtractor for Extractor {
    fn strategy(&self) -> Strategy {
        match self {
            Self::FrequencyBased(e) => e.strategy(),
            Self::TfIdfBased(e) => e.strategy(),
            Self::GraphBased(e) => e.strategy(),
        }
    }

    fn extract(&self, document: &Document) -> ConceptResult<Vec<Phrase>> {
        match self {
            Self::FrequencyBased(e) => e.extract(document),
            Self::TfIdfBased(e) => e.extract(document),
            Self::GraphBased(e) => e.extract(document),
        }
    }
}

impl From<FrequencyExtractor> for Extractor {
    fn from(e: FrequencyExtractor) -> Self {
        Self::FrequencyBased(e)
    }
}

impl From<TfIdfExtractor> for Extractor {
    fn from(e: TfIdfExtractor) -> Self {
        Self::TfIdfBased(e)
    }
}

impl From<TextRankExtractor> for Extractor {
    fn from(e: TextRankExtractor) -> Self {
        Self::GraphBased(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strategy_parses_aliases() {
        assert_eq!("rake".parse::<Strategy>().unwrap(), Strategy::FrequencyBased);
        assert_eq!("TF-IDF".parse::<Strategy>().unwrap(), Strategy::TfIdfBased);
        assert_eq!("graph".parse::<Strategy>().unwrap(), Strategy::GraphBased);
        assert!("lda".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategy_display_roundtrips() {
        for s in Strategy::ALL {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }

    #[test]
    fn only_frequency_matches_fuzzily() {
        assert!(Strategy::FrequencyBased.uses_fuzzy_matching());
        assert!(!Strategy::TfIdfBased.uses_fuzzy_matching());
        assert!(!Strategy::GraphBased.uses_fuzzy_matching());
    }

    #[test]
    fn every_strategy_rejects_bare_string() {
        let corpus = vec![Document::from_lines(["graph based ranking of words"])];
        let extractors: Vec<Extractor> = vec![
            FrequencyExtractor::default().into(),
            TfIdfExtractor::new(&corpus).into(),
            TextRankExtractor::default().into(),
        ];
        for extractor in &extractors {
            let err = extractor.extract_json(&json!("a plain sentence")).unwrap_err();
            assert!(
                matches!(err, ConceptError::InputShape { .. }),
                "{} accepted a bare string",
                extractor.strategy()
            );
        }
    }

    #[test]
    fn library_keyphrases_is_a_union() {
        let extractor = TextRankExtractor::default();
        let a = Document::from_lines(["neural networks learn representations"]);
        let b = Document::from_lines(["graph algorithms rank nodes"]);
        let union = extractor.library_keyphrases(&[a.clone(), b.clone()]).unwrap();
        let mut expected = extractor.keyphrase_set(&a).unwrap();
        expected.extend(extractor.keyphrase_set(&b).unwrap());
        assert_eq!(union, expected);
    }
}
