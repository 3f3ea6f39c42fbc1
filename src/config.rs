//! Configuration for the extraction strategies and the concept matchers.
//!
//! Every field has a serde default, so a partial TOML file (or none at all)
//! yields the reference parameters:
//!
//! ```toml
//! [frequency]
//! mu = 2.0
//! sigma = 1.5
//!
//! [matching]
//! sim_threshold = 0.8
//!
//! [tagger]
//! model = "/usr/share/nlprule/en_tokenizer.bin"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConceptError, ConceptResult};
use crate::nlp::tokenize::DEFAULT_PUNCTUATION;

/// Top-level configuration, one section per strategy plus matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConceptConfig {
    #[serde(default)]
    pub frequency: FrequencyConfig,
    #[serde(default)]
    pub tfidf: TfIdfConfig,
    #[serde(default)]
    pub textrank: TextRankConfig,
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub tagger: TaggerConfig,
}

/// Frequency-based (co-occurrence degree) keyphrase extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyConfig {
    /// Preferred phrase length in tokens (mean of the weighting curve).
    #[serde(default = "default_mu")]
    pub mu: f64,
    /// Spread of the length-weighting curve.
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    /// Phrases must have more than `max(min_len, 1)` tokens to be kept.
    #[serde(default)]
    pub min_len: usize,
    /// Characters that split text into phrase candidates.
    #[serde(default = "default_punctuation")]
    pub punctuation: Vec<char>,
}

/// TF-IDF keyword extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfConfig {
    /// Share of the document's distinct in-vocabulary words to keep.
    #[serde(default = "default_fraction")]
    pub fraction: f64,
}

/// Graph-based (TextRank) keyword extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRankConfig {
    /// Co-occurrence window, in words.
    #[serde(default = "default_window")]
    pub window: usize,
    /// PageRank damping factor.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// PageRank power iterations.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Share of graph nodes kept as keywords.
    #[serde(default = "default_ratio")]
    pub ratio: f64,
}

/// Concept matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Similarity at or above which a candidate phrase counts as known.
    #[serde(default = "default_sim_threshold")]
    pub sim_threshold: f64,
    /// How per-library-phrase similarities are reduced to one score.
    #[serde(default)]
    pub policy: MatchPolicy,
}

/// Part-of-speech tagger selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// nlprule tokenizer binary. The lexicon tagger is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<PathBuf>,
}

/// Reduction from a phrase's similarity scores to a single decision score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum MatchPolicy {
    /// The single most similar library phrase decides.
    #[default]
    BestMatch,
    /// Mean of the `k` most similar library phrases.
    TopKMean { k: usize },
}

fn default_mu() -> f64 {
    2.0
}
fn default_sigma() -> f64 {
    1.5
}
fn default_punctuation() -> Vec<char> {
    DEFAULT_PUNCTUATION.to_vec()
}
fn default_fraction() -> f64 {
    0.2
}
fn default_window() -> usize {
    2
}
fn default_damping() -> f64 {
    0.85
}
fn default_iterations() -> usize {
    50
}
fn default_ratio() -> f64 {
    0.2
}
fn default_sim_threshold() -> f64 {
    0.8
}

impl Default for FrequencyConfig {
    fn default() -> Self {
        Self {
            mu: default_mu(),
            sigma: default_sigma(),
            min_len: 0,
            punctuation: default_punctuation(),
        }
    }
}

impl Default for TfIdfConfig {
    fn default() -> Self {
        Self {
            fraction: default_fraction(),
        }
    }
}

impl Default for TextRankConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            damping: default_damping(),
            iterations: default_iterations(),
            ratio: default_ratio(),
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sim_threshold: default_sim_threshold(),
            policy: MatchPolicy::default(),
        }
    }
}

impl ConceptConfig {
    /// Load from a TOML file and validate.
    pub fn load(path: &Path) -> ConceptResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConceptError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConceptError::ConfigParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> ConceptResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> ConceptResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConceptError::invalid_config(e.to_string()))
    }

    /// Reject parameters the algorithms cannot work with.
    pub fn validate(&self) -> ConceptResult<()> {
        self.frequency.validate()?;
        self.tfidf.validate()?;
        self.textrank.validate()?;
        self.matching.validate()?;
        self.tagger.validate()
    }
}

impl FrequencyConfig {
    pub fn validate(&self) -> ConceptResult<()> {
        if !self.mu.is_finite() {
            return Err(ConceptError::invalid_config("frequency.mu must be finite"));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(ConceptError::invalid_config(format!(
                "frequency.sigma must be > 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

impl TfIdfConfig {
    pub fn validate(&self) -> ConceptResult<()> {
        validate_fraction("tfidf.fraction", self.fraction)
    }
}

impl TextRankConfig {
    pub fn validate(&self) -> ConceptResult<()> {
        if self.window < 2 {
            return Err(ConceptError::invalid_config(format!(
                "textrank.window must be >= 2, got {}",
                self.window
            )));
        }
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConceptError::invalid_config(format!(
                "textrank.damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if self.iterations == 0 {
            return Err(ConceptError::invalid_config("textrank.iterations must be > 0"));
        }
        validate_fraction("textrank.ratio", self.ratio)
    }
}

impl MatchConfig {
    pub fn validate(&self) -> ConceptResult<()> {
        if self.sim_threshold.is_nan() {
            return Err(ConceptError::invalid_config("matching.sim_threshold is NaN"));
        }
        if let MatchPolicy::TopKMean { k: 0 } = self.policy {
            return Err(ConceptError::invalid_config("matching.policy top-k-mean needs k > 0"));
        }
        Ok(())
    }
}

impl TaggerConfig {
    pub fn validate(&self) -> ConceptResult<()> {
        if self.model.is_some() && !cfg!(feature = "nlprule") {
            return Err(ConceptError::invalid_config(
                "tagger.model needs conceptdiff built with the `nlprule` feature",
            ));
        }
        Ok(())
    }
}

fn validate_fraction(name: &str, value: f64) -> ConceptResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConceptError::invalid_config(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}
