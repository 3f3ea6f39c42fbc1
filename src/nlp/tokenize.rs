//! Word tokenization and punctuation splitting.
//!
//! Text is NFKC-normalized and lower-cased before tokenizing, so visually
//! identical words ("ﬁle" vs "file") land on the same vocabulary entry.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Alphanumeric runs, allowing inner apostrophes and hyphens ("self-aware").
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*").unwrap()
});

/// A word as above, or one symbol character standing on its own.
static RE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]").unwrap()
});

/// Punctuation that breaks keyphrase candidates apart.
pub const DEFAULT_PUNCTUATION: &[char] = &['.', ',', '?', '!', '-', ':', ';', '"', '\'', '(', ')'];

/// NFKC-normalize and lower-case `text`.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Lower-cased word tokens in order of appearance; punctuation is dropped.
pub fn words(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    RE_WORD
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Split `text` into punctuation-free fragments, each a list of lower-cased
/// words.
///
/// Words are the same tokens [`words`] yields, so "self-aware" stays one
/// word. A symbol outside a word ends the fragment when it is in
/// `punctuation` and is dropped otherwise. Empty fragments are dropped.
pub fn fragments(text: &str, punctuation: &[char]) -> Vec<Vec<String>> {
    let normalized = normalize(text);
    let mut fragments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for token in RE_TOKEN.find_iter(&normalized).map(|m| m.as_str()) {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_alphanumeric() => {
                if punctuation.contains(&c) && !current.is_empty() {
                    fragments.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token.to_string()),
        }
    }
    if !current.is_empty() {
        fragments.push(current);
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_lowercase_and_drop_punctuation() {
        assert_eq!(
            words("The quick, brown fox!"),
            vec!["the", "quick", "brown", "fox"]
        );
    }

    #[test]
    fn words_keep_inner_hyphen() {
        assert_eq!(words("self-knowledge matters"), vec!["self-knowledge", "matters"]);
    }

    #[test]
    fn fragments_keep_hyphenated_compounds() {
        let frags = fragments(
            "Deep convolutional-recurrent architectures. Graph-based ranking - revisited.",
            DEFAULT_PUNCTUATION,
        );
        assert_eq!(
            frags,
            vec![
                vec!["deep", "convolutional-recurrent", "architectures"],
                vec!["graph-based", "ranking"],
                vec!["revisited"],
            ]
        );
    }

    #[test]
    fn fragments_drop_symbols_outside_the_punctuation_set() {
        let frags = fragments("input & output", &['.']);
        assert_eq!(frags, vec![vec!["input", "output"]]);
    }

    #[test]
    fn normalize_folds_compatibility_forms() {
        assert_eq!(normalize("ﬁle"), "file");
    }

    #[test]
    fn fragments_split_on_punctuation() {
        let frags = fragments("Quick foxes; lazy dogs. (Agile)", DEFAULT_PUNCTUATION);
        assert_eq!(
            frags,
            vec![
                vec!["quick".to_string(), "foxes".to_string()],
                vec!["lazy".to_string(), "dogs".to_string()],
                vec!["agile".to_string()],
            ]
        );
    }
}
