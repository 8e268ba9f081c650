use crate::DocumentId;
use std::collections::{BTreeMap, HashMap};

/// Term -> (document id -> normalized term frequency).
///
/// A document's frequencies are `occurrences / indexed word count`, so they sum
/// to 1.0 over all terms the document contributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, BTreeMap<DocumentId, f64>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one document's words (stop words already removed) into the index.
    pub fn add_document<'a, I>(&mut self, id: DocumentId, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words: Vec<&str> = words.into_iter().collect();
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(id)
                .or_insert(0.0) += inv_word_count;
        }
    }

    /// Documents containing `term`, with their frequency of it.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocumentId, f64>> {
        self.word_to_document_freqs.get(term)
    }

    pub fn contains(&self, term: &str, id: DocumentId) -> bool {
        self.postings(term).map_or(false, |docs| docs.contains_key(&id))
    }

    /// Every indexed term of one document. Empty for unknown ids.
    pub fn term_frequencies(&self, id: DocumentId) -> BTreeMap<&str, f64> {
        self.word_to_document_freqs
            .iter()
            .filter_map(|(term, docs)| docs.get(&id).map(|&tf| (term.as_str(), tf)))
            .collect()
    }

    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }
}
