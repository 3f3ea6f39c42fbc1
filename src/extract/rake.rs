//! Co-occurrence degree / frequency phrase ranking (RAKE).
//!
//! The text is cut into punctuation-free fragments here; candidate phrases
//! and their `degree / frequency` scores come from the `rake` crate.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use rake::{Rake, StopWords};

use crate::document::{ScoredPhrase, sort_descending};
use crate::nlp::stopwords::{self, StopwordFilter};
use crate::nlp::tokenize::{self, DEFAULT_PUNCTUATION};

/// RAKE ranker over a fixed stopword list and punctuation set.
#[derive(Clone)]
pub struct RakeRanker {
    rake: Arc<Rake>,
    punctuation: Vec<char>,
}

impl fmt::Debug for RakeRanker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RakeRanker")
            .field("punctuation", &self.punctuation)
            .finish_non_exhaustive()
    }
}

impl Default for RakeRanker {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCTUATION)
    }
}

fn build_rake(filter: &StopwordFilter) -> Rake {
    let words: HashSet<String> = filter.iter().map(str::to_string).collect();
    Rake::new(StopWords::from(words))
}

impl RakeRanker {
    /// English stopwords, the given punctuation set.
    pub fn new(punctuation: &[char]) -> Self {
        Self {
            rake: Arc::new(build_rake(stopwords::english())),
            punctuation: punctuation.to_vec(),
        }
    }

    /// Replace the stopword list.
    pub fn with_stopwords(mut self, stopwords: StopwordFilter) -> Self {
        self.rake = Arc::new(build_rake(&stopwords));
        self
    }

    /// Distinct candidate phrases with their raw scores, highest first.
    pub fn rank(&self, text: &str) -> Vec<ScoredPhrase> {
        let fragments: Vec<String> = tokenize::fragments(text, &self.punctuation)
            .into_iter()
            .map(|words| words.join(" "))
            .collect();
        if fragments.is_empty() {
            return Vec::new();
        }

        // Fragments are rejoined on a full stop, which the crate always splits on.
        let mut ranked: Vec<ScoredPhrase> = self
            .rake
            .run(&fragments.join(". "))
            .into_iter()
            .map(|k| ScoredPhrase::new(k.score, k.keyword.to_lowercase()))
            .collect();

        sort_descending(&mut ranked);
        tracing::debug!(
            fragments = fragments.len(),
            distinct = ranked.len(),
            "rake ranking complete"
        );
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(ranked: &[ScoredPhrase]) -> Vec<&str> {
        ranked.iter().map(|p| p.phrase.as_str()).collect()
    }

    #[test]
    fn candidates_split_at_stopwords_and_punctuation() {
        let ranked = RakeRanker::default().rank("The quick brown fox jumps. Quick foxes are agile.");
        let mut found = phrases(&ranked);
        found.sort_unstable();
        assert_eq!(found, vec!["agile", "quick brown fox jumps", "quick foxes"]);
    }

    #[test]
    fn phrases_sharing_words_outscore_their_parts() {
        // "graph" appears in a 2-word and a 1-word phrase: deg 3, freq 2.
        // "ranking" appears once in a 2-word phrase: deg 2, freq 1.
        let ranked = RakeRanker::default().rank("graph ranking, graph");
        assert_eq!(phrases(&ranked), vec!["graph ranking", "graph"]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn repeated_phrases_listed_once() {
        let ranked = RakeRanker::default().rank("neural network. neural network.");
        assert_eq!(phrases(&ranked), vec!["neural network"]);
    }

    #[test]
    fn longer_phrases_outscore_their_parts() {
        let ranked = RakeRanker::default().rank("deep neural network training, training");
        assert_eq!(ranked[0].phrase, "deep neural network training");
    }

    #[test]
    fn hyphenated_compounds_stay_whole() {
        let ranked = RakeRanker::default()
            .rank("Deep convolutional-recurrent architectures. Graph-based ranking algorithms.");
        let found = phrases(&ranked);
        assert!(found.contains(&"deep convolutional-recurrent architectures"), "{found:?}");
        assert!(found.contains(&"graph-based ranking algorithms"), "{found:?}");
    }

    #[test]
    fn empty_text_has_no_candidates() {
        assert!(RakeRanker::default().rank("").is_empty());
        assert!(RakeRanker::default().rank("the and of").is_empty());
    }

    #[test]
    fn custom_stopwords() {
        let ranker = RakeRanker::default().with_stopwords(StopwordFilter::from_list(&["fox"]));
        let ranked = ranker.rank("brown fox jumps");
        let mut found = phrases(&ranked);
        found.sort_unstable();
        assert_eq!(found, vec!["brown", "jumps"]);
    }
}
