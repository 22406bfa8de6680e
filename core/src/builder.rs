//! Index construction.
//!
//! [`IndexBuilder`] consumes documents one at a time, in ingestion order,
//! and maintains the lexicon, document register, inverted index and
//! collection frequencies together. Ingestion order is load-bearing: doc ids
//! are assigned from it and postings are appended in it, which is what keeps
//! every postings list sorted without a separate sort step.

use crate::bundle::{IndexBundle, IndexMaps};
use crate::tokenizer::tokenize;
use crate::{DocId, DocumentRegister, InvertedIndex, Lexicon, Posting, SourceDocument, SourceError, TermId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A docno registered more than once during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateKey {
    pub docno: String,
    /// Earlier doc id, no longer reachable through the docno map.
    pub displaced: DocId,
    pub doc_id: DocId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub documents: usize,
    pub terms: usize,
    pub tokens: u64,
    pub duplicate_keys: usize,
}

#[derive(Debug, Default)]
pub struct IndexBuilder {
    lexicon: Lexicon,
    register: DocumentRegister,
    index: InvertedIndex,
    df: Vec<u32>,
    duplicate_keys: Vec<DuplicateKey>,
    tokens: u64,
}

impl IndexBuilder {
    pub fn new() -> Self { Self::default() }

    /// Build a bundle from a document source, aborting on the first error.
    ///
    /// Nothing built before the failing record is returned.
    pub fn build<I>(source: I) -> Result<IndexBundle, SourceError>
    where
        I: IntoIterator<Item = Result<SourceDocument, SourceError>>,
    {
        let mut builder = Self::new();
        for doc in source {
            builder.process(&doc?);
        }
        Ok(builder.finish())
    }

    /// Index one document and return the doc id it was assigned.
    pub fn process(&mut self, doc: &SourceDocument) -> DocId {
        let text = doc.indexable_text();
        let tokens: Vec<&str> = tokenize(&text).collect();

        let registration = self.register.register(&doc.docno, &doc.headline, &doc.date, tokens.len() as u32);
        let doc_id = registration.doc_id;
        if let Some(displaced) = registration.displaced {
            let docno = self.register.get(doc_id).map(|m| m.docno.clone()).unwrap_or_default();
            tracing::warn!(%docno, displaced, doc_id, "duplicate docno; key now resolves to the later document");
            self.duplicate_keys.push(DuplicateKey { docno, displaced, doc_id });
        }

        let mut tf_counts: HashMap<TermId, u32> = HashMap::new();
        for token in &tokens {
            if let Some(tid) = self.lexicon.resolve(token, true) {
                *tf_counts.entry(tid).or_insert(0) += 1;
            }
        }
        self.tokens += tokens.len() as u64;
        self.commit(doc_id, tf_counts);
        doc_id
    }

    // One posting and one collection-frequency increment per distinct term.
    fn commit(&mut self, doc_id: DocId, tf_counts: HashMap<TermId, u32>) {
        for (tid, tf) in tf_counts {
            self.index.append(tid, Posting { doc_id, tf });
            let slot = tid as usize;
            if self.df.len() <= slot {
                self.df.resize(slot + 1, 0);
            }
            self.df[slot] += 1;
        }
    }

    pub fn lexicon(&self) -> &Lexicon { &self.lexicon }

    pub fn register(&self) -> &DocumentRegister { &self.register }

    pub fn index(&self) -> &InvertedIndex { &self.index }

    /// Number of documents containing `term_id` so far.
    pub fn collection_frequency(&self, term_id: TermId) -> u32 {
        self.df.get(term_id as usize).copied().unwrap_or(0)
    }

    pub fn stats(&self) -> BuildStats {
        BuildStats {
            documents: self.register.len(),
            terms: self.lexicon.len(),
            tokens: self.tokens,
            duplicate_keys: self.duplicate_keys.len(),
        }
    }

    /// Freeze the build into an immutable bundle.
    pub fn finish(self) -> IndexBundle {
        let (docs, doc_id_map) = self.register.into_parts();
        IndexBundle::new(IndexMaps { docs, doc_id_map, index: self.index }, self.lexicon, self.df, self.duplicate_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_frequency_counts_documents_not_occurrences() {
        let mut builder = IndexBuilder::new();
        builder.process(&SourceDocument::new("A").with_text(["spam spam spam"]));
        builder.process(&SourceDocument::new("B").with_text(["spam eggs"]));
        let spam = builder.lexicon().get("spam").unwrap();
        assert_eq!(builder.collection_frequency(spam), 2);
        assert_eq!(builder.index().get(spam).unwrap()[0], Posting { doc_id: 0, tf: 3 });
        assert_eq!(builder.stats().tokens, 5);
    }

    #[test]
    fn unknown_term_has_zero_frequency() {
        let builder = IndexBuilder::new();
        assert_eq!(builder.collection_frequency(42), 0);
        assert_eq!(builder.stats(), BuildStats::default());
    }
}
