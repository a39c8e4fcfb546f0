use crate::error::IndexError;
use crate::DocId;
use std::collections::hash_map::{self, HashMap};

/// Occurrence counts of one word, keyed by document.
/// Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    counts: HashMap<DocId, u32>,
}

impl PostingList {
    pub fn new() -> Self { Self::default() }

    /// Count for `doc_id`, 0 when the word never occurs there.
    pub fn count(&self, doc_id: DocId) -> u32 {
        self.counts.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, doc_id: DocId) {
        *self.counts.entry(doc_id).or_insert(0) += 1;
    }

    /// Store a count verbatim. Returns the previous count, if any.
    pub(crate) fn set(&mut self, doc_id: DocId, count: u32) -> Option<u32> {
        self.counts.insert(doc_id, count)
    }

    pub fn len(&self) -> usize { self.counts.len() }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.counts.iter().map(|(d, c)| (*d, *c))
    }
}

/// Inverted index: normalized word -> posting list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexStore {
    words: HashMap<String, PostingList>,
}

impl IndexStore {
    /// Empty store sized for roughly `capacity` distinct words.
    pub fn new(capacity: usize) -> Result<Self, IndexError> {
        if capacity == 0 {
            return Err(IndexError::ZeroCapacity);
        }
        Ok(Self { words: HashMap::with_capacity(capacity) })
    }

    /// Count one more occurrence of `word` in `doc_id`.
    pub fn increment(&mut self, word: &str, doc_id: DocId) -> Result<(), IndexError> {
        if word.is_empty() {
            return Err(IndexError::EmptyWord);
        }
        if doc_id == 0 {
            return Err(IndexError::InvalidDocId);
        }
        match self.words.get_mut(word) {
            Some(postings) => postings.increment(doc_id),
            None => {
                let mut postings = PostingList::new();
                postings.increment(doc_id);
                self.words.insert(word.to_string(), postings);
            }
        }
        Ok(())
    }

    pub fn lookup(&self, word: &str) -> Option<&PostingList> {
        self.words.get(word)
    }

    pub fn occurrences(&self, word: &str, doc_id: DocId) -> u32 {
        self.lookup(word).map_or(0, |p| p.count(doc_id))
    }

    /// Install a fully built posting list. Used by the codec, which stores
    /// counts verbatim rather than recounting. Empty lists are ignored.
    pub(crate) fn insert_postings(&mut self, word: String, postings: PostingList) -> bool {
        if postings.is_empty() || self.words.contains_key(&word) {
            return false;
        }
        self.words.insert(word, postings);
        true
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> hash_map::Iter<'_, String, PostingList> {
        self.words.iter()
    }

    pub fn for_each<F: FnMut(&str, &PostingList)>(&self, mut visit: F) {
        for (word, postings) in &self.words {
            visit(word, postings);
        }
    }
}

impl<'a> IntoIterator for &'a IndexStore {
    type Item = (&'a String, &'a PostingList);
    type IntoIter = hash_map::Iter<'a, String, PostingList>;

    fn into_iter(self) -> Self::IntoIter { self.words.iter() }
}
