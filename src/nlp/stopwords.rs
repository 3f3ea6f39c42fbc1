//! English stopword filtering backed by the `stop-words` crate (NLTK list).

use std::collections::HashSet;
use std::sync::LazyLock;

use stop_words::{LANGUAGE, get};

static ENGLISH: LazyLock<StopwordFilter> = LazyLock::new(StopwordFilter::english);

/// A case-insensitive stopword set.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    stopwords: HashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::english()
    }
}

impl StopwordFilter {
    /// The stock English list.
    pub fn english() -> Self {
        Self {
            stopwords: get(LANGUAGE::English)
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
        }
    }

    /// A filter from a custom list.
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
        }
    }

    /// Add additional stopwords.
    pub fn extend(&mut self, words: &[&str]) {
        self.stopwords.extend(words.iter().map(|w| w.to_lowercase()));
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(&word.to_lowercase())
    }

    /// Every stopword, lower-cased, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stopwords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}

/// Shared English filter, built on first use.
pub fn english() -> &'static StopwordFilter {
    &ENGLISH
}
