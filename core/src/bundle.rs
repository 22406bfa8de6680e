use crate::{DocId, DocMeta, DuplicateKey, InvertedIndex, Lexicon, PostingsList, TermId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three maps every persisted index carries: document metadata by doc
/// id, docno to doc id, and the inverted index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexMaps {
    pub docs: HashMap<DocId, DocMeta>,
    pub doc_id_map: HashMap<String, DocId>,
    pub index: InvertedIndex,
}

/// The finished index: everything needed to answer "which documents contain
/// term t" and "what is document d's metadata". Immutable once built.
///
/// Alongside [`IndexMaps`] it keeps the lexicon and document frequencies so
/// term strings resolve after a reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexBundle {
    maps: IndexMaps,
    lexicon: Lexicon,
    df: Vec<u32>,
    duplicate_keys: Vec<DuplicateKey>,
}

impl IndexBundle {
    pub(crate) fn new(maps: IndexMaps, lexicon: Lexicon, df: Vec<u32>, duplicate_keys: Vec<DuplicateKey>) -> Self {
        Self { maps, lexicon, df, duplicate_keys }
    }

    pub fn maps(&self) -> &IndexMaps { &self.maps }

    pub fn num_docs(&self) -> usize { self.maps.docs.len() }

    pub fn num_terms(&self) -> usize { self.lexicon.len() }

    pub fn lexicon(&self) -> &Lexicon { &self.lexicon }

    pub fn index(&self) -> &InvertedIndex { &self.maps.index }

    pub fn postings(&self, term_id: TermId) -> Option<&PostingsList> { self.maps.index.get(term_id) }

    /// Postings for a term string. Unknown terms yield `None`; the lexicon
    /// is never grown by a lookup.
    pub fn postings_for_term(&self, term: &str) -> Option<&PostingsList> {
        self.lexicon.get(term).and_then(|tid| self.maps.index.get(tid))
    }

    pub fn document_frequency(&self, term_id: TermId) -> u32 {
        self.df.get(term_id as usize).copied().unwrap_or(0)
    }

    pub fn document(&self, doc_id: DocId) -> Option<&DocMeta> { self.maps.docs.get(&doc_id) }

    pub fn document_by_key(&self, docno: &str) -> Option<&DocMeta> {
        self.maps.doc_id_map.get(docno).and_then(|id| self.maps.docs.get(id))
    }

    pub fn doc_id(&self, docno: &str) -> Option<DocId> { self.maps.doc_id_map.get(docno).copied() }

    pub fn documents(&self) -> &HashMap<DocId, DocMeta> { &self.maps.docs }

    pub fn doc_id_map(&self) -> &HashMap<String, DocId> { &self.maps.doc_id_map }

    pub fn duplicate_keys(&self) -> &[DuplicateKey] { &self.duplicate_keys }
}

#[cfg(test)]
mod tests {
    use crate::{IndexBuilder, Posting, SourceDocument};

    #[test]
    fn term_lookup_by_string() {
        let mut builder = IndexBuilder::new();
        builder.process(&SourceDocument::new("D0").with_headline("Quake").with_text(["Quake shakes city"]));
        let bundle = builder.finish();
        assert_eq!(bundle.postings_for_term("Quake"), Some(&vec![Posting { doc_id: 0, tf: 2 }]));
        assert_eq!(bundle.postings_for_term("quake"), None);
        assert_eq!(bundle.document_by_key("D0").unwrap().headline, "Quake");
        assert_eq!(bundle.num_terms(), 3);
        assert_eq!(bundle.maps().docs.len(), 1);
        assert_eq!(bundle.maps().index.len(), 3);
    }
}
