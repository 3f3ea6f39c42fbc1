//! Part-of-speech tagging.
//!
//! The extractors only need to know whether a token is a noun or adjective,
//! so tagging sits behind the [`PosTagger`] trait and any tagger producing
//! Penn Treebank tags can be injected. [`LexiconTagger`] is the built-in
//! fallback: a closed-class lexicon plus suffix rules, with one contextual
//! rule for nominal "-ing" compounds ("machine learning"). With the
//! `nlprule` feature, [`NlpruleTagger`] tags with a statistical model instead.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{ConceptError, ConceptResult};

/// A token paired with its Penn Treebank tag.
pub type TaggedToken = (String, String);

/// Assigns one part-of-speech tag per token.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>>;
}

/// True for noun (`NN*`) and adjective (`JJ*`) tags.
pub fn is_noun_or_adjective(tag: &str) -> bool {
    tag.starts_with("NN") || tag.starts_with("JJ")
}

/// True when every token of `phrase` is tagged as a noun or adjective.
///
/// Fails if the tagger does not return exactly one tag per token.
pub fn only_nouns_and_adjectives(tagger: &dyn PosTagger, phrase: &str) -> ConceptResult<bool> {
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let tagged = tagger.tag(&tokens)?;
    if tagged.len() != tokens.len() {
        return Err(ConceptError::extraction(
            "pos tagging",
            format!(
                "tagger returned {} tags for {} tokens in \"{phrase}\"",
                tagged.len(),
                tokens.len()
            ),
        ));
    }
    Ok(tagged.iter().all(|(_, tag)| is_noun_or_adjective(tag)))
}

// ---------------------------------------------------------------------------
// Lexicon
// ---------------------------------------------------------------------------

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each",
    "every", "no", "all", "both", "either", "neither", "another",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they",
    "them", "myself", "yourself", "himself", "herself", "itself", "ourselves",
    "themselves", "who", "whom", "what", "which",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "its", "our", "their", "whose"];

const PREPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "from",
    "up", "down", "over", "under", "since", "until", "upon", "within",
    "without", "across", "along", "among", "around", "behind", "beyond",
    "near", "toward", "towards", "via", "per", "if", "because", "while",
    "although", "though", "whether", "unless",
];

const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so", "plus"];

const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would",
];

const ADVERBS: &[&str] = &[
    "not", "very", "too", "also", "just", "only", "then", "there", "here",
    "now", "never", "always", "often", "again", "still", "already", "soon",
    "even", "ever", "quite", "rather", "almost", "perhaps", "however",
    "thus", "therefore", "where", "when", "why", "how", "well",
];

/// Irregular and auxiliary verb forms with their tags.
const VERB_FORMS: &[(&str, &str)] = &[
    ("be", "VB"), ("is", "VBZ"), ("are", "VBP"), ("am", "VBP"), ("was", "VBD"),
    ("were", "VBD"), ("been", "VBN"), ("being", "VBG"), ("have", "VBP"),
    ("has", "VBZ"), ("had", "VBD"), ("having", "VBG"), ("do", "VBP"),
    ("does", "VBZ"), ("did", "VBD"), ("done", "VBN"), ("doing", "VBG"),
    ("go", "VB"), ("goes", "VBZ"), ("went", "VBD"), ("gone", "VBN"),
    ("make", "VB"), ("made", "VBD"), ("take", "VB"), ("took", "VBD"),
    ("taken", "VBN"), ("give", "VB"), ("gave", "VBD"), ("given", "VBN"),
    ("get", "VB"), ("got", "VBD"), ("see", "VB"), ("saw", "VBD"),
    ("seen", "VBN"), ("know", "VB"), ("knew", "VBD"), ("known", "VBN"),
    ("say", "VB"), ("said", "VBD"), ("think", "VB"), ("thought", "VBD"),
    ("come", "VB"), ("came", "VBD"), ("find", "VB"), ("found", "VBD"),
    ("run", "VB"), ("ran", "VBD"), ("become", "VB"), ("became", "VBD"),
    ("begin", "VB"), ("began", "VBD"), ("begun", "VBN"), ("show", "VB"),
    ("shown", "VBN"), ("write", "VB"), ("wrote", "VBD"), ("written", "VBN"),
    ("keep", "VB"), ("kept", "VBD"), ("leave", "VB"), ("left", "VBD"),
    ("hold", "VB"), ("held", "VBD"), ("bring", "VB"), ("brought", "VBD"),
    ("build", "VB"), ("built", "VBD"), ("send", "VB"), ("sent", "VBD"),
    ("fall", "VB"), ("fell", "VBD"), ("grow", "VB"), ("grew", "VBD"),
    ("grown", "VBN"),
];

/// Regular verbs whose inflections are recognized by suffix.
const VERB_STEMS: &[&str] = &[
    "jump", "use", "work", "call", "try", "ask", "need", "feel", "seem",
    "help", "talk", "turn", "start", "play", "move", "live", "believe",
    "happen", "include", "continue", "change", "lead", "understand", "watch",
    "follow", "stop", "create", "speak", "read", "allow", "add", "spend",
    "open", "walk", "win", "offer", "remember", "love", "consider", "appear",
    "buy", "wait", "serve", "die", "expect", "stay", "reach", "kill",
    "remain", "suggest", "raise", "pass", "sell", "require", "report",
    "decide", "pull", "produce", "enable", "prevent", "agree", "resemble",
    "oppose", "influence", "describe", "provide", "contain", "improve",
    "reduce", "increase", "extract", "compute", "measure", "detect",
    "represent", "depend", "implement", "define",
    "sleep", "eat", "bark", "chase", "fly", "swim", "climb",
];

const ADJECTIVES: &[&str] = &[
    "quick", "slow", "brown", "lazy", "agile", "big", "small", "large",
    "little", "new", "old", "good", "bad", "great", "high", "low", "long",
    "short", "young", "early", "late", "important", "different", "same",
    "able", "free", "full", "hard", "easy", "strong", "weak", "real", "best",
    "better", "true", "false", "whole", "clear", "simple", "complex",
    "recent", "certain", "major", "minor", "red", "green", "blue", "black",
    "white", "dark", "light", "hot", "cold", "deep", "wide", "fast", "main",
    "general", "specific", "open", "common", "public", "private", "social",
    "human", "natural", "local", "national", "global", "final", "key",
    "semantic", "neural", "artificial", "statistical", "digital", "novel",
];

/// Suffixes that mark adjectives when the word is not in the lexicon.
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ary", "ic",
    "al", "ent", "ant",
];

/// Suffixes that look verbal but usually end nouns ("business", "analysis").
const NOUN_S_ENDINGS: &[&str] = &["ss", "us", "is", "ics"];

static LEXICON: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let closed: &[(&[&str], &str)] = &[
        (DETERMINERS, "DT"),
        (PRONOUNS, "PRP"),
        (POSSESSIVES, "PRP$"),
        (PREPOSITIONS, "IN"),
        (CONJUNCTIONS, "CC"),
        (MODALS, "MD"),
        (ADVERBS, "RB"),
        (ADJECTIVES, "JJ"),
    ];
    for (words, tag) in closed {
        for w in *words {
            map.entry(*w).or_insert(*tag);
        }
    }
    for (w, tag) in VERB_FORMS {
        map.entry(*w).or_insert(*tag);
    }
    for w in VERB_STEMS {
        map.entry(*w).or_insert("VB");
    }
    map.insert("to", "TO");
    map
});

/// Rule-based tagger over a small English lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    /// Tag a single word without context.
    fn tag_word(word: &str) -> &'static str {
        let low = word.to_lowercase();
        if low.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return "CD";
        }
        if let Some(tag) = LEXICON.get(low.as_str()) {
            return *tag;
        }
        if let Some(tag) = inflected_verb(&low) {
            return tag;
        }
        if low.len() > 4 && low.ends_with("ly") {
            return "RB";
        }
        if low.len() > 4 && low.ends_with("ing") {
            return "VBG";
        }
        if low.len() > 4 && low.ends_with("ed") {
            return "VBN";
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|s| low.len() > s.len() + 2 && low.ends_with(s))
        {
            return "JJ";
        }
        if word.chars().next().is_some_and(char::is_uppercase) {
            return "NNP";
        }
        if low.len() > 3 && low.ends_with('s') && !NOUN_S_ENDINGS.iter().any(|s| low.ends_with(s))
        {
            return "NNS";
        }
        "NN"
    }
}

/// Recognize regular inflections of the verb stems.
fn inflected_verb(word: &str) -> Option<&'static str> {
    let is_stem = |s: &str| VERB_STEMS.contains(&s);
    let candidates: [(&str, &[&str], &'static str); 3] = [
        ("s", &["", "e"], "VBZ"),
        ("ed", &["", "e"], "VBD"),
        ("ing", &["", "e"], "VBG"),
    ];
    for (suffix, restore, tag) in candidates {
        if let Some(stem) = word.strip_suffix(suffix) {
            for tail in restore {
                let base = format!("{stem}{tail}");
                if is_stem(&base) {
                    return Some(tag);
                }
            }
            // "tries" -> "try", "carried" -> "carry"
            if let Some(inner) = stem.strip_suffix('i').or_else(|| stem.strip_suffix("ie")) {
                if is_stem(&format!("{inner}y")) {
                    return Some(tag);
                }
            }
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if is_stem(stem) {
            return Some("VBZ");
        }
    }
    None
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>> {
        let mut tags: Vec<&'static str> = tokens.iter().map(|t| Self::tag_word(t)).collect();

        for i in 1..tags.len() {
            let prev = tags[i - 1];
            // A gerund right after a noun or adjective heads a nominal compound.
            if tags[i] == "VBG"
                && is_noun_or_adjective(prev)
                && !LEXICON.contains_key(tokens[i].to_lowercase().as_str())
            {
                tags[i] = "NN";
            }
            // "the use", "good work": a bare verb stem after a determiner or
            // nominal is a noun.
            if tags[i] == "VB" && (prev == "DT" || prev == "PRP$" || is_noun_or_adjective(prev)) {
                tags[i] = "NN";
            }
        }

        Ok(tokens
            .iter()
            .zip(tags)
            .map(|(tok, tag)| (tok.to_string(), tag.to_string()))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// nlprule
// ---------------------------------------------------------------------------

/// Tagger backed by an nlprule tokenizer binary (`en_tokenizer.bin`).
#[cfg(feature = "nlprule")]
pub struct NlpruleTagger {
    tokenizer: nlprule::Tokenizer,
}

#[cfg(feature = "nlprule")]
impl std::fmt::Debug for NlpruleTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NlpruleTagger").finish_non_exhaustive()
    }
}

#[cfg(feature = "nlprule")]
impl NlpruleTagger {
    pub fn from_path(path: &std::path::Path) -> ConceptResult<Self> {
        let tokenizer =
            nlprule::Tokenizer::new(path).map_err(|e| ConceptError::TaggerModel {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        tracing::info!(path = %path.display(), "loaded nlprule tagger");
        Ok(Self { tokenizer })
    }

    /// Word tokens of `text` with their first tag, sentence markers skipped.
    fn tag_text(&self, text: &str) -> Vec<TaggedToken> {
        let mut tagged = Vec::new();
        for sentence in self.tokenizer.pipe(text) {
            for token in sentence.tokens() {
                let word = token.word().text().as_str().trim();
                if word.is_empty() {
                    continue;
                }
                let tag = token
                    .word()
                    .tags()
                    .first()
                    .map(|data| data.pos().as_str())
                    .unwrap_or_default();
                tagged.push((word.to_string(), tag.to_string()));
            }
        }
        tagged
    }
}

#[cfg(feature = "nlprule")]
impl PosTagger for NlpruleTagger {
    fn tag(&self, tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>> {
        let tagged = self.tag_text(&tokens.join(" "));
        if tagged.len() == tokens.len() {
            return Ok(tagged);
        }
        // nlprule splits some tokens ("graph-based"); fall back to one word at a time.
        Ok(tokens
            .iter()
            .map(|tok| {
                let tag = match self.tag_text(tok).as_slice() {
                    [(_, tag)] if !tag.is_empty() => tag.clone(),
                    _ => LexiconTagger::tag_word(tok).to_string(),
                };
                (tok.to_string(), tag)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(phrase: &str) -> Vec<String> {
        let tokens: Vec<&str> = phrase.split_whitespace().collect();
        LexiconTagger
            .tag(&tokens)
            .unwrap()
            .into_iter()
            .map(|(_, t)| t)
            .collect()
    }

    #[test]
    fn closed_class_words() {
        assert_eq!(tags("the fox and a dog"), vec!["DT", "NN", "CC", "DT", "NN"]);
    }

    #[test]
    fn adjectives_and_plural_nouns() {
        assert_eq!(tags("quick foxes"), vec!["JJ", "NNS"]);
        assert_eq!(tags("quick brown fox"), vec!["JJ", "JJ", "NN"]);
    }

    #[test]
    fn verb_inflections() {
        assert_eq!(tags("jumps"), vec!["VBZ"]);
        assert_eq!(tags("jumped"), vec!["VBD"]);
        assert_eq!(tags("produces"), vec!["VBZ"]);
        assert_eq!(tags("tries"), vec!["VBZ"]);
    }

    #[test]
    fn nominal_gerund_compound() {
        assert_eq!(tags("machine learning"), vec!["NN", "NN"]);
        assert_eq!(tags("learning"), vec!["VBG"]);
    }

    #[test]
    fn bare_verb_after_nominal_is_noun() {
        assert_eq!(tags("the use"), vec!["DT", "NN"]);
        assert_eq!(tags("research work"), vec!["NN", "NN"]);
        assert_eq!(tags("work"), vec!["VB"]);
    }

    #[test]
    fn suffix_rules() {
        assert_eq!(tags("quickly"), vec!["RB"]);
        assert_eq!(tags("dangerous"), vec!["JJ"]);
        assert_eq!(tags("analysis"), vec!["NN"]);
        assert_eq!(tags("42"), vec!["CD"]);
    }

    #[test]
    fn only_nouns_and_adjectives_filters_verbs() {
        assert!(only_nouns_and_adjectives(&LexiconTagger, "quick brown fox").unwrap());
        assert!(!only_nouns_and_adjectives(&LexiconTagger, "quick brown fox jumps").unwrap());
    }

    struct ShortTagger;

    impl PosTagger for ShortTagger {
        fn tag(&self, _tokens: &[&str]) -> ConceptResult<Vec<TaggedToken>> {
            Ok(vec![("x".into(), "NN".into())])
        }
    }

    #[test]
    fn tag_count_mismatch_is_an_extraction_error() {
        let err = only_nouns_and_adjectives(&ShortTagger, "two words").unwrap_err();
        assert!(matches!(err, ConceptError::Extraction { .. }));
    }
}
