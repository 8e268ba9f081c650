//! A cloneable handle for sharing one engine between threads.

use crate::error::Result;
use crate::{DocumentId, DocumentResult, DocumentStatus, SearchServer};
use parking_lot::RwLock;
use std::sync::Arc;

/// Ingestion takes the write lock; every query takes a read lock.
#[derive(Debug, Clone)]
pub struct SharedSearchServer {
    inner: Arc<RwLock<SearchServer>>,
}

impl SharedSearchServer {
    pub fn new(server: SearchServer) -> Self {
        Self { inner: Arc::new(RwLock::new(server)) }
    }

    pub fn add_document(
        &self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        self.inner.write().add_document(id, text, status, ratings)
    }

    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<DocumentResult>> {
        self.inner.read().find_top_documents(raw_query)
    }

    pub fn find_top_documents_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<DocumentResult>>
    where
        P: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        self.inner.read().find_top_documents_with(raw_query, predicate)
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        self.inner.read().match_document(raw_query, id)
    }

    pub fn document_count(&self) -> usize {
        self.inner.read().document_count()
    }

    /// Run `f` against the engine under one read lock.
    pub fn read<R>(&self, f: impl FnOnce(&SearchServer) -> R) -> R {
        f(&self.inner.read())
    }
}

impl From<SearchServer> for SharedSearchServer {
    fn from(server: SearchServer) -> Self {
        Self::new(server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn concurrent_writers_and_readers() {
        let shared = SharedSearchServer::new(SearchServer::new("the").unwrap());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        let id = t * 25 + i;
                        shared
                            .add_document(id, "the quick fox", DocumentStatus::Actual, &[id])
                            .unwrap();
                        let _ = shared.find_top_documents("fox").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(shared.document_count(), 100);
        let (words, _) = shared.match_document("fox -the", 99).unwrap();
        assert_eq!(words, vec!["fox"]);
        assert!(shared.read(|s| s.document_id_at(0).is_ok()));
    }
}
