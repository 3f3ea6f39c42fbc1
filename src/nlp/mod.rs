//! Text processing building blocks shared by every extraction strategy.
//!
//! - **Tokenization** (`tokenize`): normalization, word tokens, punctuation fragments
//! - **Stopwords** (`stopwords`): English function-word filter
//! - **Tagging** (`pos`): the `PosTagger` seam, a lexicon-based default, and
//!   an optional nlprule-backed tagger

pub mod pos;
pub mod stopwords;
pub mod tokenize;

pub use pos::{LexiconTagger, PosTagger, TaggedToken, is_noun_or_adjective};
pub use stopwords::StopwordFilter;
#[cfg(feature = "nlprule")]
pub use pos::NlpruleTagger;
