//! Documents, phrases, and scored phrases.
//!
//! A [`Document`] is always segmented: an ordered list of lines (or tokens).
//! Extractors only accept `&Document`, so an unsegmented `&str` cannot reach
//! them. Untyped input is checked once, in [`Document::from_json`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConceptError, ConceptResult};
use crate::nlp::tokenize;

/// A span of one or more tokens joined by single spaces.
pub type Phrase = String;

/// A deduplicated set of phrases. Ordered so results are deterministic.
pub type KeyphraseSet = BTreeSet<Phrase>;

/// A phrase together with its strategy-internal score.
///
/// Scores are only comparable within a single extraction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPhrase {
    pub score: f64,
    pub phrase: Phrase,
}

impl ScoredPhrase {
    pub fn new(score: f64, phrase: impl Into<Phrase>) -> Self {
        Self {
            score,
            phrase: phrase.into(),
        }
    }

    /// Number of whitespace-separated tokens in the phrase.
    pub fn token_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

/// Sort scored phrases by score, highest first. Ties keep their input order.
pub fn sort_descending(phrases: &mut [ScoredPhrase]) {
    phrases.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// An ordered sequence of text segments (lines, sentences, or tokens).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    segments: Vec<String>,
}

impl Document {
    /// Build a document from already-segmented lines or tokens.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Segment raw text into one segment per non-empty line.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        )
    }

    /// Parse a document from an untyped JSON value.
    ///
    /// Only an array of strings is accepted. A bare string is the classic
    /// shape mistake (one unsegmented blob) and is rejected before any
    /// scoring happens.
    pub fn from_json(value: &serde_json::Value) -> ConceptResult<Self> {
        match value {
            serde_json::Value::Array(items) => {
                let segments = items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Ok(s.clone()),
                        other => Err(ConceptError::InputShape {
                            found: format!("a list containing {}", json_kind(other)),
                        }),
                    })
                    .collect::<ConceptResult<Vec<_>>>()?;
                Ok(Self { segments })
            }
            other => Err(ConceptError::InputShape {
                found: json_kind(other).to_string(),
            }),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when there is no non-whitespace text at all.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.trim().is_empty())
    }

    /// All segments joined into one blob with single spaces.
    pub fn joined(&self) -> String {
        self.segments.join(" ")
    }

    /// Lower-cased word tokens across all segments, punctuation dropped.
    pub fn tokens(&self) -> Vec<String> {
        self.segments
            .iter()
            .flat_map(|s| tokenize::words(s))
            .collect()
    }
}

impl From<Vec<String>> for Document {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<&[&str]> for Document {
    fn from(segments: &[&str]) -> Self {
        Self::from_lines(segments.iter().copied())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a single unsegmented string",
        serde_json::Value::Array(_) => "a nested list",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_text_drops_blank_lines() {
        let doc = Document::from_text("first line\n\n   \nsecond line\n");
        assert_eq!(doc.lines(), &["first line", "second line"]);
    }

    #[test]
    fn joined_uses_single_spaces() {
        let doc = Document::from_lines(["a b", "c"]);
        assert_eq!(doc.joined(), "a b c");
    }

    #[test]
    fn from_json_accepts_list_of_strings() {
        let doc = Document::from_json(&json!(["The quick brown fox.", "Jumps."])).unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn from_json_rejects_bare_string() {
        let err = Document::from_json(&json!("a plain sentence")).unwrap_err();
        assert!(matches!(err, ConceptError::InputShape { .. }));
        assert!(err.to_string().contains("unsegmented"));
    }

    #[test]
    fn from_json_rejects_mixed_list() {
        let err = Document::from_json(&json!(["ok", 3])).unwrap_err();
        assert!(matches!(err, ConceptError::InputShape { .. }));
    }

    #[test]
    fn empty_and_blank_documents_are_empty() {
        assert!(Document::default().is_empty());
        assert!(Document::from_lines([""]).is_empty());
        assert!(!Document::from_lines(["x"]).is_empty());
    }

    #[test]
    fn serde_rejects_bare_string() {
        let parsed: Result<Document, _> = serde_json::from_str("\"just text\"");
        assert!(parsed.is_err());
        let parsed: Document = serde_json::from_str("[\"a\", \"b\"]").unwrap();
        assert_eq!(parsed.lines(), &["a", "b"]);
    }

    #[test]
    fn sort_descending_is_stable_on_ties() {
        let mut phrases = vec![
            ScoredPhrase::new(1.0, "a"),
            ScoredPhrase::new(2.0, "b"),
            ScoredPhrase::new(1.0, "c"),
        ];
        sort_descending(&mut phrases);
        let order: Vec<_> = phrases.iter().map(|p| p.phrase.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
