use crate::error::{Error, Result};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use std::collections::HashSet;

/// A parsed query. Words borrow from the raw query text: they are only ever
/// looked up in the index, so queries never grow the interner.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query<'q> {
    pub plus_words: Vec<&'q str>,
    pub minus_words: Vec<&'q str>,
}

impl<'q> Query<'q> {
    /// Parse `raw` into deduplicated plus and minus words.
    ///
    /// Minus words that are stop words are dropped since they could never
    /// exclude anything.
    pub fn parse(raw: &'q str, stop_words: &StopWords) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid_query("query is empty"));
        }
        if !is_valid_word(raw) {
            return Err(Error::invalid_query("query contains control characters"));
        }

        let mut query = Query::default();
        let mut seen_plus = HashSet::new();
        let mut seen_minus = HashSet::new();
        for word in split_into_words(raw) {
            match word.strip_prefix('-') {
                None => {
                    if seen_plus.insert(word) {
                        query.plus_words.push(word);
                    }
                }
                Some(minus) => {
                    if minus.is_empty() || minus.starts_with('-') {
                        return Err(Error::invalid_query(format!("malformed minus word {word:?}")));
                    }
                    if !stop_words.contains(minus) && seen_minus.insert(minus) {
                        query.minus_words.push(minus);
                    }
                }
            }
        }
        Ok(query)
    }
}
