// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # conceptdiff
//!
//! Novelty detection for text: extract keyphrases from a candidate document
//! and split them into concepts a reference library already covers and
//! concepts that are new.
//!
//! ## Architecture
//!
//! - **Extraction** (`extract`): three strategies behind one
//!   [`KeyphraseExtractor`] trait: frequency/co-occurrence (RAKE with length
//!   weighting and a noun/adjective filter), TF-IDF, and TextRank
//! - **Matching** (`matcher`): exact set algebra, or fuzzy best-match through
//!   a pluggable [`DocumentSimilarity`] comparator
//! - **Language support** (`nlp`): tokenization, stopwords, a pluggable
//!   part-of-speech tagger
//! - **Facade** (`detector`): configuration-driven entry point
//!
//! ## Library usage
//!
//! ```no_run
//! use conceptdiff::{ConceptConfig, Detector, Document, Strategy};
//!
//! let detector = Detector::new(ConceptConfig::default()).unwrap();
//! let library = vec![Document::from_text("Neural networks learn representations.")];
//! let candidate = Document::from_text("Deep neural networks learn representations of images.");
//! let result = detector
//!     .match_concepts(Strategy::FrequencyBased, &library, &candidate)
//!     .unwrap();
//! println!("new concepts: {:?}", result.new);
//! ```

pub mod config;
pub mod detector;
pub mod document;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod nlp;
pub mod similarity;

pub use config::{ConceptConfig, MatchPolicy, TaggerConfig};
pub use detector::Detector;
pub use document::{Document, KeyphraseSet, Phrase, ScoredPhrase};
pub use error::{ConceptError, ConceptResult};
pub use extract::{Extractor, KeyphraseExtractor, Strategy};
pub use matcher::{FuzzyMatcher, MatchResult};
pub use similarity::{DocumentSimilarity, TfIdfCosine};
