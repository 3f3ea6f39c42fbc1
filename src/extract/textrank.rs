//! Graph-based keyword extraction (TextRank).
//!
//! Content words (non-stopword nouns and adjectives) become nodes keyed by
//! their Snowball stem; two nodes are linked when their words fall inside the
//! same sliding window of the text. PageRank over that graph picks the top
//! share of stems, and runs of adjacent selected words in the text are
//! merged back into keyphrases.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use petgraph::algo::page_rank;
use petgraph::graph::{DiGraph, NodeIndex};
use rust_stemmers::{Algorithm, Stemmer};

use crate::config::TextRankConfig;
use crate::document::{Document, Phrase, ScoredPhrase, sort_descending};
use crate::error::{ConceptError, ConceptResult};
use crate::matcher::{self, MatchResult};
use crate::nlp::pos::{LexiconTagger, PosTagger, is_noun_or_adjective};
use crate::nlp::stopwords;
use crate::nlp::tokenize;

use super::{KeyphraseExtractor, Strategy};

/// One word of the text, with its stem if it is a graph candidate.
struct TextWord {
    surface: String,
    stem: Option<String>,
}

/// Word co-occurrence graph over stems.
struct CooccurrenceGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl CooccurrenceGraph {
    /// Link every pair of candidate stems sharing a window of `window` words.
    fn build(words: &[TextWord], window: usize) -> Self {
        let mut this = Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        };
        for (i, word) in words.iter().enumerate() {
            let Some(a) = &word.stem else { continue };
            for other in words.iter().skip(i + 1).take(window.saturating_sub(1)) {
                if let Some(b) = &other.stem {
                    if a != b {
                        this.link(a, b);
                    }
                }
            }
        }
        this
    }

    fn node(&mut self, stem: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(stem) {
            return idx;
        }
        let idx = self.graph.add_node(stem.to_string());
        self.index.insert(stem.to_string(), idx);
        idx
    }

    /// Undirected link, stored as a pair of arcs.
    fn link(&mut self, a: &str, b: &str) {
        let ia = self.node(a);
        let ib = self.node(b);
        if self.graph.find_edge(ia, ib).is_none() {
            self.graph.add_edge(ia, ib, ());
            self.graph.add_edge(ib, ia, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// PageRank score per stem.
    ///
    /// An empty graph has nothing to normalize over and is reported as
    /// [`ConceptError::DegenerateGraph`].
    pub fn rank(&self, damping: f64, iterations: usize) -> ConceptResult<HashMap<String, f64>> {
        let nodes = self.graph.node_count();
        if nodes == 0 {
            return Err(ConceptError::DegenerateGraph { nodes });
        }
        let scores = page_rank(&self.graph, damping, iterations);
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(ConceptError::DegenerateGraph { nodes });
        }
        Ok(self
            .graph
            .node_indices()
            .map(|idx| (self.graph[idx].clone(), scores[idx.index()]))
            .collect())
    }
}

/// TextRank extractor with an injectable part-of-speech tagger.
#[derive(Clone)]
pub struct TextRankExtractor {
    config: TextRankConfig,
    tagger: Arc<dyn PosTagger>,
}

impl fmt::Debug for TextRankExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRankExtractor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for TextRankExtractor {
    fn default() -> Self {
        Self {
            config: TextRankConfig::default(),
            tagger: Arc::new(LexiconTagger),
        }
    }
}

impl TextRankExtractor {
    pub fn new(config: TextRankConfig) -> ConceptResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tagger: Arc::new(LexiconTagger),
        })
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Tokenize and mark graph candidates.
    fn analyze(&self, text: &str) -> ConceptResult<Vec<TextWord>> {
        let surface = tokenize::words(text);
        let refs: Vec<&str> = surface.iter().map(String::as_str).collect();
        let tagged = self.tagger.tag(&refs)?;
        if tagged.len() != surface.len() {
            return Err(ConceptError::extraction(
                "pos tagging",
                format!("tagger returned {} tags for {} tokens", tagged.len(), surface.len()),
            ));
        }

        let stemmer = Stemmer::create(Algorithm::English);
        let stopwords = stopwords::english();
        Ok(surface
            .into_iter()
            .zip(tagged)
            .map(|(word, (_, tag))| {
                let candidate = is_noun_or_adjective(&tag)
                    && word.chars().count() >= 2
                    && word.chars().any(char::is_alphabetic)
                    && !stopwords.is_stopword(&word);
                let stem = candidate.then(|| stemmer.stem(&word).into_owned());
                TextWord { surface: word, stem }
            })
            .collect())
    }

    /// Ranked keyphrases with their mean member scores, highest first.
    ///
    /// Errors from a degenerate graph are returned as-is; [`extract`]
    /// absorbs them into an empty result.
    ///
    /// [`extract`]: KeyphraseExtractor::extract
    pub fn scored(&self, document: &Document) -> ConceptResult<Vec<ScoredPhrase>> {
        let words = self.analyze(&document.joined())?;
        let graph = CooccurrenceGraph::build(&words, self.config.window);
        let scores = graph.rank(self.config.damping, self.config.iterations)?;

        let mut ranked: Vec<(&String, f64)> = scores.iter().map(|(s, v)| (s, *v)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        let keep = ((ranked.len() as f64 * self.config.ratio) as usize).max(1);
        let selected: HashSet<&str> = ranked
            .iter()
            .take(keep)
            .map(|(stem, _)| stem.as_str())
            .collect();

        let mut phrases: Vec<ScoredPhrase> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut run: Vec<&TextWord> = Vec::new();
        let is_selected = |w: &TextWord| {
            w.stem
                .as_deref()
                .is_some_and(|stem| selected.contains(stem))
        };
        for word in words.iter().map(Some).chain(std::iter::once(None)) {
            if let Some(w) = word.filter(|w| is_selected(*w)) {
                run.push(w);
                continue;
            }
            if !run.is_empty() {
                let phrase = run
                    .iter()
                    .map(|w| w.surface.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if seen.insert(phrase.clone()) {
                    let mean = run
                        .iter()
                        .filter_map(|w| w.stem.as_ref().and_then(|s| scores.get(s)))
                        .sum::<f64>()
                        / run.len() as f64;
                    phrases.push(ScoredPhrase::new(mean, phrase));
                }
                run.clear();
            }
        }

        sort_descending(&mut phrases);
        tracing::debug!(
            nodes = graph.node_count(),
            selected = selected.len(),
            phrases = phrases.len(),
            "textrank extraction complete"
        );
        Ok(phrases)
    }

    /// Exact known/new split of `candidate`'s keywords against `library`.
    pub fn match_concepts(&self, library: &[Document], candidate: &Document) -> ConceptResult<MatchResult> {
        matcher::match_exact(self, library, candidate)
    }
}

impl KeyphraseExtractor for TextRankExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::GraphBased
    }

    fn extract(&self, document: &Document) -> ConceptResult<Vec<Phrase>> {
        match self.scored(document) {
            Ok(phrases) => Ok(phrases.into_iter().map(|p| p.phrase).collect()),
            Err(ConceptError::DegenerateGraph { nodes }) => {
                tracing::warn!(nodes, "degenerate co-occurrence graph, no keywords");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

/// Ranked keywords using the default configuration.
pub fn keywords(document: &Document) -> ConceptResult<Vec<Phrase>> {
    TextRankExtractor::default().extract(document)
}

/// Exact known/new split using the default configuration.
pub fn match_concepts(library: &[Document], candidate: &Document) -> ConceptResult<MatchResult> {
    TextRankExtractor::default().match_concepts(library, candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article() -> Document {
        Document::from_lines([
            "Compatibility of systems of linear constraints over the set of natural numbers.",
            "Criteria of compatibility of a system of linear Diophantine equations, strict \
             inequations, and nonstrict inequations are considered.",
            "Upper bounds for components of a minimal set of solutions and algorithms of \
             construction of minimal generating sets of solutions for all types of systems \
             are given.",
        ])
    }

    #[test]
    fn empty_documents_yield_no_keywords() {
        assert!(keywords(&Document::default()).unwrap().is_empty());
        assert!(keywords(&Document::from_lines([""])).unwrap().is_empty());
    }

    #[test]
    fn stopword_only_document_is_degenerate_but_absorbed() {
        let doc = Document::from_lines(["the of and"]);
        assert!(matches!(
            TextRankExtractor::default().scored(&doc),
            Err(ConceptError::DegenerateGraph { .. })
        ));
        assert!(keywords(&doc).unwrap().is_empty());
    }

    #[test]
    fn ranks_central_terms_of_an_abstract() {
        let doc = article();
        let phrases = keywords(&doc).unwrap();
        assert!(!phrases.is_empty());
        let vocabulary: HashSet<String> = doc.tokens().into_iter().collect();
        for phrase in &phrases {
            for word in phrase.split_whitespace() {
                assert!(vocabulary.contains(word), "{word} not in the document");
                assert!(!stopwords::english().is_stopword(word));
            }
        }
    }

    #[test]
    fn adjacent_selected_words_merge_into_phrases() {
        let config = TextRankConfig {
            ratio: 1.0,
            ..Default::default()
        };
        let extractor = TextRankExtractor::new(config).unwrap();
        let doc = Document::from_lines(["linear constraints and linear equations"]);
        let phrases = extractor.extract(&doc).unwrap();
        assert!(phrases.contains(&"linear constraints".to_string()));
        assert!(phrases.contains(&"linear equations".to_string()));
    }

    #[test]
    fn phrases_are_unique_and_ordered() {
        let scored = TextRankExtractor::default().scored(&article()).unwrap();
        let distinct: HashSet<_> = scored.iter().map(|p| &p.phrase).collect();
        assert_eq!(distinct.len(), scored.len());
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn window_links_only_nearby_words() {
        let text_words = |ws: &[&str]| -> Vec<TextWord> {
            ws.iter()
                .map(|w| TextWord {
                    surface: w.to_string(),
                    stem: (*w != "-").then(|| w.to_string()),
                })
                .collect()
        };
        let words = text_words(&["alpha", "beta", "-", "gamma"]);
        let graph = CooccurrenceGraph::build(&words, 2);
        assert_eq!(graph.node_count(), 2);
        let wide = CooccurrenceGraph::build(&words, 3);
        assert_eq!(wide.node_count(), 3);
    }

    #[test]
    fn same_document_as_library_and_candidate_has_nothing_new() {
        let doc = article();
        let result = match_concepts(std::slice::from_ref(&doc), &doc).unwrap();
        assert!(result.new.is_empty());
        assert_eq!(result.known, TextRankExtractor::default().keyphrase_set(&doc).unwrap());
    }
}
