//! Rich diagnostic error types for concept extraction and matching.
//!
//! Every variant carries a miette error code and help text so callers (and the
//! CLI) can tell a malformed document apart from a ranking failure or a bad
//! configuration file.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for conceptdiff.
#[derive(Debug, Error, Diagnostic)]
pub enum ConceptError {
    #[error("expected a segmented document, got {found}")]
    #[diagnostic(
        code(conceptdiff::input_shape),
        help(
            "Documents must be an ordered list of lines or tokens, not a single \
             unsegmented string. Wrap the text in a list, or build the document \
             with `Document::from_text` which segments it for you."
        )
    )]
    InputShape { found: String },

    #[error("keyphrase extraction failed during {stage}: {message}")]
    #[diagnostic(
        code(conceptdiff::extraction),
        help(
            "An internal tagging or ranking step failed. If you injected a custom \
             part-of-speech tagger, check that it returns exactly one tag per token."
        )
    )]
    Extraction { stage: String, message: String },

    #[error("failed to load tagger model: {path}: {message}")]
    #[diagnostic(
        code(conceptdiff::tagger_model),
        help("`tagger.model` must point at an nlprule tokenizer binary such as en_tokenizer.bin.")
    )]
    TaggerModel { path: String, message: String },

    #[error("degenerate co-occurrence graph ({nodes} nodes)")]
    #[diagnostic(
        code(conceptdiff::degenerate_graph),
        help("The document has no co-occurring content words to rank.")
    )]
    DegenerateGraph { nodes: usize },

    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(conceptdiff::invalid_config),
        help("Check the parameter ranges in your conceptdiff TOML configuration.")
    )]
    InvalidConfig { message: String },

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(conceptdiff::config_read),
        help("Ensure the config file exists and is readable.")
    )]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(conceptdiff::config_parse),
        help("Check the TOML syntax in the config file.")
    )]
    ConfigParse { path: String, message: String },

    #[error("I/O error: {source}")]
    #[diagnostic(
        code(conceptdiff::io),
        help("A filesystem operation failed. Check file paths and permissions.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

impl ConceptError {
    /// Shorthand for an [`ConceptError::Extraction`] raised in `stage`.
    pub fn extraction(stage: &str, message: impl Into<String>) -> Self {
        Self::Extraction {
            stage: stage.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`ConceptError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ConceptError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source }
    }
}

/// Convenience alias for conceptdiff results.
pub type ConceptResult<T> = std::result::Result<T, ConceptError>;
