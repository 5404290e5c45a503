use crate::error::{Error, Result};
use crate::interner::{Interner, Word};
use std::collections::HashSet;

/// Split text into words on runs of the space character. Tokens keep their
/// case and every other byte untouched.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid when it has no control characters (bytes below `' '`).
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|b| b < b' ')
}

/// The set of words that are never indexed and never used to exclude.
#[derive(Debug, Default, Clone)]
pub struct StopWords {
    words: HashSet<Word>,
}

impl StopWords {
    /// Build from any collection of strings. Each item is split exactly like
    /// document text, so `"in the"`, `["in", "the"]` and `["in the"]` are all
    /// the same two stop words, and blank items contribute nothing.
    pub fn new<I, S>(items: I, interner: &Interner) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for item in items {
            for word in split_into_words(item.as_ref()) {
                if !is_valid_word(word) {
                    return Err(Error::InvalidStopWord(word.to_string()));
                }
                words.insert(interner.intern(word));
            }
        }
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &Word> { self.words.iter() }
}

/// Split document text into its indexable words, rejecting the whole text if
/// any token is invalid.
pub fn split_into_words_no_stop<'t>(
    text: &'t str,
    stop_words: &StopWords,
) -> std::result::Result<Vec<&'t str>, &'t str> {
    let mut words = Vec::new();
    for word in split_into_words(text) {
        if !is_valid_word(word) {
            return Err(word);
        }
        if !stop_words.contains(word) {
            words.push(word);
        }
    }
    Ok(words)
}
