//! Textual conventions of the rule language.

/// Matches exactly one word.
pub const WILDCARD_ONE: &str = "_";
/// Matches zero or more words.
pub const WILDCARD_MANY: &str = "*";
pub const WORD_DELIMITER: &str = " ";
/// Separates the two parts of an [`Index`](super::Index).
pub const INDEX_SEPARATOR: char = ',';
/// Predicate holding the pseudo-stack, top word first.
pub const TOPIC_PREDICATE: &str = "topic";

pub fn is_wildcard(word: &str) -> bool {
  word == WILDCARD_ONE || word == WILDCARD_MANY
}

/// Splits on any whitespace and drops empty words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
  text.split_whitespace()
}

/// Rejoins `text` with single delimiters.
pub fn normalize(text: &str) -> String {
  words(text).collect::<Vec<_>>().join(WORD_DELIMITER)
}

/// Joins words or phrases, skipping empty parts.
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
  parts
    .into_iter()
    .filter(|p| !p.trim().is_empty())
    .collect::<Vec<_>>()
    .join(WORD_DELIMITER)
}
