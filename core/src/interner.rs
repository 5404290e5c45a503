use parking_lot::RwLock;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Handle to a word owned by an [`Interner`].
///
/// Equal words interned by the same interner share one allocation, so a
/// handle is as cheap to copy around as a pointer and can never dangle.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Arc<str>);

impl Word {
    pub fn as_str(&self) -> &str { &self.0 }

    /// True when both handles point at the same interned allocation.
    pub fn ptr_eq(&self, other: &Word) -> bool { Arc::ptr_eq(&self.0, &other.0) }
}

impl Deref for Word {
    type Target = str;
    fn deref(&self) -> &str { &self.0 }
}

// Lets maps keyed by `Word` be queried with a plain `&str`.
impl Borrow<str> for Word {
    fn borrow(&self) -> &str { &self.0 }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str { &self.0 }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool { &*self.0 == other }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool { &*self.0 == *other }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Debug::fmt(&*self.0, f) }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Canonical store for every word the engine has seen. Words are never
/// removed, which is what makes it safe to hand out [`Word`]s freely.
#[derive(Default)]
pub struct Interner {
    words: RwLock<HashSet<Arc<str>>>,
}

impl Interner {
    pub fn new() -> Self { Self::default() }

    pub fn intern(&self, word: &str) -> Word {
        if let Some(existing) = self.words.read().get(word) {
            return Word(Arc::clone(existing));
        }
        let mut words = self.words.write();
        // Another thread may have inserted it between the two locks.
        if let Some(existing) = words.get(word) {
            return Word(Arc::clone(existing));
        }
        let owned: Arc<str> = Arc::from(word);
        words.insert(Arc::clone(&owned));
        Word(owned)
    }

    /// Looks a word up without interning it.
    pub fn get(&self, word: &str) -> Option<Word> {
        self.words.read().get(word).map(|w| Word(Arc::clone(w)))
    }

    pub fn len(&self) -> usize { self.words.read().len() }

    pub fn is_empty(&self) -> bool { self.words.read().is_empty() }
}

impl fmt::Debug for Interner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interner").field("len", &self.len()).finish()
    }
}
