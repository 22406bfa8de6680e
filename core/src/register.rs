use crate::document::join_paragraphs;
use crate::{DocId, DocMeta};
use std::collections::HashMap;

/// Outcome of registering a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration {
    pub doc_id: DocId,
    /// Doc id previously bound to the same docno, now only reachable by id.
    pub displaced: Option<DocId>,
}

/// Assigns sequential doc ids and owns per-document metadata.
#[derive(Debug, Default)]
pub struct DocumentRegister {
    next_doc_id: DocId,
    docs: HashMap<DocId, DocMeta>,
    doc_id_map: HashMap<String, DocId>,
}

impl DocumentRegister {
    pub fn new() -> Self { Self::default() }

    /// Register a document under the next doc id.
    ///
    /// A docno seen before is rebound to the new doc id; the earlier
    /// metadata is kept and reported back through `Registration::displaced`.
    pub fn register(&mut self, docno: &str, headline: &[String], date: &[String], length: u32) -> Registration {
        let doc_id = self.next_doc_id;
        self.next_doc_id += 1;

        let docno = docno.trim().to_string();
        let displaced = self.doc_id_map.insert(docno.clone(), doc_id);
        self.docs.insert(doc_id, DocMeta {
            docno,
            doc_id,
            headline: join_paragraphs(headline),
            date: join_paragraphs(date),
            length,
        });
        Registration { doc_id, displaced }
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(&doc_id) }

    pub fn doc_id(&self, docno: &str) -> Option<DocId> { self.doc_id_map.get(docno).copied() }

    /// Number of documents registered so far.
    pub fn len(&self) -> usize { self.next_doc_id as usize }

    pub fn is_empty(&self) -> bool { self.next_doc_id == 0 }

    pub(crate) fn into_parts(self) -> (HashMap<DocId, DocMeta>, HashMap<String, DocId>) {
        (self.docs, self.doc_id_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paras(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn assigns_sequential_ids_and_joins_fields() {
        let mut reg = DocumentRegister::new();
        let a = reg.register(" LA010189-0001 ", &paras(&[" Storm ", "Hits Coast "]), &paras(&["January 1, 1989 "]), 5);
        let b = reg.register("LA010189-0002", &[], &[], 0);
        assert_eq!(a, Registration { doc_id: 0, displaced: None });
        assert_eq!(b.doc_id, 1);
        let meta = reg.get(0).unwrap();
        assert_eq!(meta.docno, "LA010189-0001");
        assert_eq!(meta.headline, "Storm\nHits Coast");
        assert_eq!(meta.date, "January 1, 1989");
        assert_eq!(meta.length, 5);
        assert_eq!(reg.doc_id("LA010189-0001"), Some(0));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_docno_rebinds_key_and_keeps_metadata() {
        let mut reg = DocumentRegister::new();
        reg.register("DUP", &paras(&["first"]), &[], 1);
        let second = reg.register("DUP", &paras(&["second"]), &[], 1);
        assert_eq!(second, Registration { doc_id: 1, displaced: Some(0) });
        assert_eq!(reg.doc_id("DUP"), Some(1));
        assert_eq!(reg.get(0).unwrap().headline, "first");
        assert_eq!(reg.get(1).unwrap().headline, "second");
    }
}
