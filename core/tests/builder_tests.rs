use index_core::{DocId, IndexBuilder, Posting, SourceDocument, SourceError, TermId};

fn body(docno: &str, text: &str) -> SourceDocument {
    SourceDocument::new(docno).with_text([text])
}

fn assert_frequencies_match_postings(builder: &IndexBuilder) {
    for (tid, _) in builder.lexicon().iter() {
        let postings = builder.index().get(tid).expect("every lexicon term has postings");
        assert_eq!(builder.collection_frequency(tid) as usize, postings.len(), "term {tid}");
    }
    assert_eq!(builder.index().len(), builder.lexicon().len());
}

#[test]
fn scenario_two_documents() {
    let mut builder = IndexBuilder::new();
    builder.process(&body("D1", "cat dog cat"));
    builder.process(&body("D2", "dog bird"));

    let lex = builder.lexicon();
    assert_eq!(lex.get("cat"), Some(0));
    assert_eq!(lex.get("dog"), Some(1));
    assert_eq!(lex.get("bird"), Some(2));
    assert_eq!(lex.len(), 3);

    let index = builder.index();
    assert_eq!(index.get(0).unwrap(), &vec![Posting { doc_id: 0, tf: 2 }]);
    assert_eq!(index.get(1).unwrap(), &vec![Posting { doc_id: 0, tf: 1 }, Posting { doc_id: 1, tf: 1 }]);
    assert_eq!(index.get(2).unwrap(), &vec![Posting { doc_id: 1, tf: 1 }]);

    assert_eq!(builder.collection_frequency(0), 1);
    assert_eq!(builder.collection_frequency(1), 2);
    assert_eq!(builder.collection_frequency(2), 1);
}

#[test]
fn headline_only_document_is_registered() {
    let mut builder = IndexBuilder::new();
    let doc_id = builder.process(&SourceDocument::new("LA010189-0007").with_headline("Breaking News"));
    assert_eq!(doc_id, 0);

    let meta = builder.register().get(0).unwrap();
    assert_eq!(meta.length, 2);
    assert_eq!(meta.headline, "Breaking News");
    assert_eq!(builder.lexicon().len(), 2);
    assert!(builder.lexicon().get("").is_none());
}

#[test]
fn empty_document_gets_an_id_and_no_postings() {
    let mut builder = IndexBuilder::new();
    assert_eq!(builder.process(&SourceDocument::new("EMPTY")), 0);
    assert_eq!(builder.process(&body("NEXT", "word")), 1);
    assert_eq!(builder.register().get(0).unwrap().length, 0);
    assert_eq!(builder.index().len(), 1);
}

#[test]
fn aborts_on_source_error() {
    let docs = vec![
        Ok(body("D1", "alpha beta")),
        Ok(body("D2", "beta gamma")),
        Err(SourceError::Malformed("bad third record".into())),
        Ok(body("D4", "never seen")),
    ];
    let result = IndexBuilder::build(docs);
    assert!(matches!(result, Err(SourceError::Malformed(_))));
}

#[test]
fn duplicate_docno_keeps_both_documents() {
    let mut builder = IndexBuilder::new();
    let first = builder.process(&body("LA010189-0001", "first version"));
    let second = builder.process(&body("LA010189-0001", "second version"));
    assert_eq!((first, second), (0, 1));

    let bundle = builder.finish();
    assert_eq!(bundle.doc_id("LA010189-0001"), Some(1));
    assert_eq!(bundle.document(0).unwrap().docno, "LA010189-0001");
    assert_eq!(bundle.document(1).unwrap().docno, "LA010189-0001");
    let version: Vec<DocId> = bundle.postings_for_term("version").unwrap().iter().map(|p| p.doc_id).collect();
    assert_eq!(version, vec![0, 1]);

    assert_eq!(bundle.duplicate_keys().len(), 1);
    let dup = &bundle.duplicate_keys()[0];
    assert_eq!((dup.displaced, dup.doc_id), (0, 1));
}

#[test]
fn invariants_hold_after_every_commit() {
    let texts = [
        "the quick brown fox",
        "jumps over the lazy dog",
        "the dog barks; the fox runs",
        "",
        "quick quick quick",
        "brand new words appear here",
    ];
    let mut builder = IndexBuilder::new();
    let mut first_seen: Vec<String> = Vec::new();

    for (i, text) in texts.iter().enumerate() {
        let doc_id = builder.process(&body(&format!("DOC{i:04}"), text));
        assert_eq!(doc_id, i as DocId);
        for term in text.split(|c: char| !c.is_alphanumeric()).filter(|t| !t.is_empty()) {
            if !first_seen.iter().any(|t| t == term) {
                first_seen.push(term.to_string());
            }
        }
        assert_frequencies_match_postings(&builder);
    }

    for (expected, term) in first_seen.iter().enumerate() {
        assert_eq!(builder.lexicon().get(term), Some(expected as TermId));
    }

    for (_, postings) in builder.index().iter() {
        assert!(postings.windows(2).all(|w| w[0].doc_id < w[1].doc_id));
        assert!(postings.iter().all(|p| p.tf >= 1));
    }

    let stats = builder.stats();
    assert_eq!(stats.documents, texts.len());
    assert_eq!(stats.terms, first_seen.len());

    let bundle = builder.finish();
    let mut ids: Vec<DocId> = bundle.documents().keys().copied().collect();
    ids.sort();
    assert_eq!(ids, (0..texts.len() as DocId).collect::<Vec<_>>());
}

#[test]
fn independent_builds_do_not_share_state() {
    let mut a = IndexBuilder::new();
    let mut b = IndexBuilder::new();
    a.process(&body("A", "shared alpha"));
    b.process(&body("B", "beta shared"));
    assert_eq!(a.lexicon().get("shared"), Some(0));
    assert_eq!(b.lexicon().get("shared"), Some(1));
    assert_eq!(b.process(&body("B2", "x")), 1);
}

#[test]
fn documents_without_docno_are_indexed_and_reported() {
    let docs = index_core::source::TrecReader::new(
        "<DOC><TEXT><P>first untitled</P></TEXT></DOC><DOC><TEXT><P>second untitled</P></TEXT></DOC>".as_bytes(),
    );
    let bundle = IndexBuilder::build(docs).unwrap();
    assert_eq!(bundle.num_docs(), 2);
    assert_eq!(bundle.doc_id(""), Some(1));
    assert_eq!(bundle.postings_for_term("untitled").unwrap().len(), 2);
    let dup = &bundle.duplicate_keys()[0];
    assert_eq!((dup.docno.as_str(), dup.displaced, dup.doc_id), ("", 0, 1));
}
