//! The search engine: ingestion, ranked retrieval and per-document matching.

use crate::document::DocumentData;
use crate::error::{DocumentError, Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::store::DocumentStore;
use crate::tokenizer::{is_valid_text, StopWords};
use crate::{DocumentId, DocumentResult, DocumentStatus, SearchConfig};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
    config: SearchConfig,
}

impl SearchServer {
    /// Engine whose stop words are the space-separated words of `stop_words`.
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(Self::from_stop_words(StopWords::parse(stop_words)?))
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_stop_words(StopWords::from_words(stop_words)?))
    }

    pub fn from_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Index a document. All checks run before anything is stored, so a
    /// rejected document leaves the engine untouched.
    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(DocumentError::NegativeId(id).into());
        }
        if self.documents.contains(id) {
            return Err(DocumentError::DuplicateId(id).into());
        }
        if !is_valid_text(text) {
            return Err(DocumentError::InvalidCharacters(id).into());
        }

        self.index.add_document(id, self.stop_words.split_no_stop(text));
        self.documents.insert(id, status, ratings);
        tracing::debug!(id, ?status, documents = self.documents.len(), "added document");
        Ok(())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Id of the `position`-th ingested document.
    pub fn document_id_at(&self, position: usize) -> Result<DocumentId> {
        self.documents.id_at(position)
    }

    /// Ids in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.documents.ids()
    }

    /// Normalized term frequencies of one document; empty if the id is unknown.
    pub fn word_frequencies(&self, id: DocumentId) -> BTreeMap<&str, f64> {
        self.index.term_frequencies(id)
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        Ok(Query::parse(raw_query, &self.stop_words)?)
    }

    /// Top documents with status ACTUAL.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<DocumentResult>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<DocumentResult>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, most relevant
    /// first, at most `config().max_results` of them.
    pub fn find_top_documents_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<DocumentResult>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let mut matched = self.find_all_documents(&query, predicate);
        let epsilon = self.config.relevance_epsilon;
        matched.sort_by(|a, b| compare_results(a, b, epsilon));
        matched.truncate(self.config.max_results);
        tracing::debug!(query = raw_query, hits = matched.len(), "ranked documents");
        Ok(matched)
    }

    /// Plus-terms of `raw_query` found in document `id`, or nothing when the
    /// document holds any minus-term. Also returns the document's status.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = self.parse_query(raw_query)?;
        let status = self.documents.status(id).ok_or(SearchError::DocumentNotFound(id))?;

        if query.minus_words.iter().any(|word| self.index.contains(word, id)) {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|word| self.index.contains(word, id))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    fn inverse_document_freq(&self, documents_with_word: usize) -> f64 {
        (self.document_count() as f64 / documents_with_word as f64).ln()
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<DocumentResult>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let mut relevance: HashMap<DocumentId, f64> = HashMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(postings.len());
            tracing::trace!(word = word.as_str(), idf, documents = postings.len(), "plus word");
            for (&id, &tf) in postings {
                *relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }

        for word in &query.minus_words {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    relevance.remove(id);
                }
            }
        }

        relevance
            .into_iter()
            .filter_map(|(id, score)| {
                let DocumentData { rating, status } = self.documents.get(id)?;
                predicate(id, status, rating).then(|| DocumentResult::new(id, score, rating))
            })
            .collect()
    }
}

/// Relevance descending, with relevances inside one `epsilon` bucket ordered by
/// rating descending, then id ascending. This is a total order.
///
/// Buckets are `round(relevance / epsilon)`, so two relevances closer than
/// `epsilon` that straddle a rounding boundary are still ordered by relevance
/// rather than by rating.
fn compare_results(a: &DocumentResult, b: &DocumentResult, epsilon: f64) -> Ordering {
    compare_relevance(a.relevance, b.relevance, epsilon)
        .then_with(|| b.rating.cmp(&a.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Descending. Falls back to exact comparison when `epsilon` is not positive or
/// a bucket overflows to infinity.
fn compare_relevance(a: f64, b: f64, epsilon: f64) -> Ordering {
    if epsilon > 0.0 {
        let (bucket_a, bucket_b) = ((a / epsilon).round(), (b / epsilon).round());
        if bucket_a.is_finite() && bucket_b.is_finite() {
            return bucket_b.total_cmp(&bucket_a);
        }
    }
    b.total_cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and in on").unwrap();
        server
            .add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])
            .unwrap();
        server
            .add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])
            .unwrap();
        server
            .add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])
            .unwrap();
        server
            .add_document(3, "groomed starling eugene", DocumentStatus::Banned, &[9])
            .unwrap();
        server
    }

    #[test]
    fn ranks_by_tf_idf() {
        let server = server();
        let results = server.find_top_documents("fluffy groomed cat").unwrap();
        let ids: Vec<_> = results.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 0, 2]);

        // doc 1: fluffy tf 0.5 * ln(4/1) + cat tf 0.25 * ln(4/2)
        let expected = 0.5 * 4f64.ln() + 0.25 * 2f64.ln();
        assert!((results[0].relevance - expected).abs() < 1e-12);
        assert_eq!(results[0].rating, 5);
    }

    #[test]
    fn status_and_predicate_filters() {
        let server = server();
        let banned = server
            .find_top_documents_by_status("groomed", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);

        let even = server
            .find_top_documents_with("fluffy groomed cat", |id, _, _| id % 2 == 0)
            .unwrap();
        assert_eq!(even.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn equal_relevance_breaks_on_rating() {
        let mut server = SearchServer::new("").unwrap();
        server.add_document(5, "cat", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(6, "cat", DocumentStatus::Actual, &[9]).unwrap();
        server.add_document(7, "dog", DocumentStatus::Actual, &[3]).unwrap();
        let results = server.find_top_documents("cat").unwrap();
        assert_eq!(results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![6, 5]);
    }

    #[test]
    fn result_count_follows_config() {
        let mut server = SearchServer::new("")
            .unwrap()
            .with_config(SearchConfig::default().with_max_results(2));
        for id in 0..6 {
            server.add_document(id, "cat", DocumentStatus::Actual, &[id]).unwrap();
        }
        server.add_document(6, "dog", DocumentStatus::Actual, &[]).unwrap();
        let results = server.find_top_documents("cat").unwrap();
        assert_eq!(results.iter().map(|d| d.id).collect::<Vec<_>>(), vec![5, 4]);
    }

    #[test]
    fn match_reports_sorted_plus_terms() {
        let server = server();
        let (words, status) = server.match_document("white fluffy cat collar", 0).unwrap();
        assert_eq!(words, vec!["cat", "collar", "white"]);
        assert_eq!(status, DocumentStatus::Actual);

        let (words, status) = server.match_document("groomed -eugene", 3).unwrap();
        assert!(words.is_empty());
        assert_eq!(status, DocumentStatus::Banned);
    }

    #[test]
    fn match_unknown_document_is_not_found() {
        let err = server().match_document("cat", 42).unwrap_err();
        assert_eq!(err, SearchError::DocumentNotFound(42));
        assert!(err.is_not_found());
    }

    #[test]
    fn bucket_order_is_total() {
        let a = DocumentResult::new(1, 0.5, 1);
        let b = DocumentResult::new(2, 0.5 + 1e-9, 4);
        let c = DocumentResult::new(3, 0.7, 0);
        let mut v = vec![a, b, c];
        v.sort_by(|x, y| compare_results(x, y, 1e-6));
        assert_eq!(v.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 2, 1]);
        v.sort_by(|x, y| compare_results(x, y, 0.0));
        assert_eq!(v.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn tiny_epsilon_keeps_relevance_order() {
        for epsilon in [1e-6, 1e-12, 1e-20, 1e-300, f64::MIN_POSITIVE] {
            let mut server = SearchServer::new("")
                .unwrap()
                .with_config(SearchConfig::default().with_relevance_epsilon(epsilon));
            server.add_document(0, "cat", DocumentStatus::Actual, &[1]).unwrap();
            server.add_document(1, "cat dog dog dog", DocumentStatus::Actual, &[9]).unwrap();
            server.add_document(2, "bird", DocumentStatus::Actual, &[5]).unwrap();
            let results = server.find_top_documents("cat").unwrap();
            assert_eq!(
                results.iter().map(|d| d.id).collect::<Vec<_>>(),
                vec![0, 1],
                "epsilon {epsilon}"
            );
            assert!(results[0].relevance > results[1].relevance);
        }
    }

    #[test]
    fn overflowing_bucket_compares_exactly() {
        assert_eq!(compare_relevance(1e300, 1.0, 1e-300), Ordering::Less);
        assert_eq!(compare_relevance(1.0, 1e300, 1e-300), Ordering::Greater);
        assert_eq!(compare_relevance(0.5, 0.5 + 1e-9, 1e-6), Ordering::Equal);
    }
}
