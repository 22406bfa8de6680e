use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    /// External document key, e.g. `LA010189-0001`.
    pub docno: String,
    pub doc_id: DocId,
    pub headline: String,
    pub date: String,
    /// Number of terms in the indexable text.
    pub length: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32, // occurrences within the document, always >= 1
}

/// Postings for one term, sorted by strictly increasing doc_id.
pub type PostingsList = Vec<Posting>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvertedIndex {
    postings: HashMap<TermId, PostingsList>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Append a posting at the tail of `term_id`'s list.
    ///
    /// Callers commit documents in increasing doc_id order, so appending
    /// keeps every list sorted.
    pub fn append(&mut self, term_id: TermId, posting: Posting) {
        let list = self.postings.entry(term_id).or_default();
        debug_assert!(list.last().map_or(true, |p| p.doc_id < posting.doc_id));
        list.push(posting);
    }

    pub fn get(&self, term_id: TermId) -> Option<&PostingsList> {
        self.postings.get(&term_id)
    }

    pub fn contains(&self, term_id: TermId) -> bool {
        self.postings.contains_key(&term_id)
    }

    /// Number of terms with at least one posting.
    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &PostingsList)> + '_ {
        self.postings.iter().map(|(t, p)| (*t, p))
    }
}
