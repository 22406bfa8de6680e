use crate::TermId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bidirectional mapping between terms and dense term ids.
///
/// Ids are handed out in first-occurrence order starting at 0 and are never
/// reassigned. Serialized as the id-ordered term list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Lexicon {
    ids: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Lexicon {
    pub fn new() -> Self { Self::default() }

    /// Look up `term`, assigning the next id when it is unknown and
    /// `allow_insert` is set. Returns `None` for an unknown term in
    /// read-only mode.
    pub fn resolve(&mut self, term: &str, allow_insert: bool) -> Option<TermId> {
        if let Some(&id) = self.ids.get(term) {
            return Some(id);
        }
        if !allow_insert {
            return None;
        }
        let id = self.terms.len() as TermId;
        self.ids.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        Some(id)
    }

    /// Read-only lookup; never grows the vocabulary.
    pub fn get(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Terms in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i as TermId, t.as_str()))
    }
}

impl From<Vec<String>> for Lexicon {
    fn from(terms: Vec<String>) -> Self {
        let ids = terms.iter().enumerate().map(|(i, t)| (t.clone(), i as TermId)).collect();
        Self { ids, terms }
    }
}

impl From<Lexicon> for Vec<String> {
    fn from(lexicon: Lexicon) -> Self { lexicon.terms }
}
