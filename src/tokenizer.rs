//! Text tokenization: Unicode folding, punctuation stripping, and
//! whole-word prefix expansion.
//!
//! Normalization pipeline (spec.md §4.1):
//! 1. Fold arbitrary Unicode to an ASCII approximation (`Blögged` → `Blogged`).
//! 2. Lowercase.
//! 3. Split on any run of non-alphanumeric characters.
//! 4. Drop empty terms.

use unicode_normalization::UnicodeNormalization;

/// Default longest word considered for prefix expansion; bounds
/// worst-case posting-list fan-out per spec.md §9 ("prefix explosion").
/// Overridable via `TYPEAHEAD_MAX_WORD_LEN` (see [`crate::config::Config`]).
pub const MAX_WORD_LEN: usize = 30;

fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

fn split_words(s: &str) -> Vec<String> {
    s.split(is_word_boundary)
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

/// Fold a string to its ASCII-approximate, diacritic-stripped, lowercase
/// form. `café` → `cafe`, `Blögged` → `blogged`.
pub fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Tokenize a string into normalized, folded word terms (spec.md §4.1).
/// Pure-punctuation input tokenizes to the empty sequence; numeric words
/// are preserved.
pub fn tokenize(s: &str) -> Vec<String> {
    split_words(&fold(s))
}

/// Tokenize into raw (un-folded) lowercase words, used to support
/// queries typed with the original diacritics (spec.md §4.1, §4.4).
pub fn tokenize_raw(s: &str) -> Vec<String> {
    split_words(&s.to_lowercase())
}

/// All non-empty prefixes of `word`, capped at `max_word_len` characters.
pub fn prefixes_of(word: &str, max_word_len: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().take(max_word_len).collect();
    (1..=chars.len())
        .map(|k| chars[..k].iter().collect())
        .collect()
}

/// The full set of prefixes a title indexes under: every prefix of
/// every folded token, plus every prefix of every raw token where the
/// raw form differs from the folded form (spec.md §4.3 step 2).
pub fn index_prefixes(title: &str, max_word_len: usize) -> std::collections::HashSet<String> {
    let mut prefixes = std::collections::HashSet::new();
    for word in tokenize(title) {
        prefixes.extend(prefixes_of(&word, max_word_len));
    }
    let folded_words: std::collections::HashSet<String> = tokenize(title).into_iter().collect();
    for word in tokenize_raw(title) {
        if !folded_words.contains(&word) {
            prefixes.extend(prefixes_of(&word, max_word_len));
        }
    }
    prefixes
}

/// Terms to echo back to the client for a query string: the folded
/// terms, or (if the raw form differs) the raw terms followed by the
/// folded terms, deduplicated with raw first (spec.md §4.4).
pub fn echo_terms(q: &str) -> Vec<String> {
    let folded = tokenize(q);
    let raw = tokenize_raw(q);
    if raw == folded {
        return folded;
    }
    let mut out = Vec::new();
    for t in raw.iter().chain(folded.iter()) {
        if !out.contains(t) {
            out.push(t.clone());
        }
    }
    out
}
