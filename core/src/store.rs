use crate::document::{average_rating, DocumentData};
use crate::error::{Result, SearchError};
use crate::{DocumentId, DocumentStatus};
use std::collections::HashMap;

/// Rating and status per document, plus insertion order for positional lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    documents: HashMap<DocumentId, DocumentData>,
    insertion_order: Vec<DocumentId>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DocumentId, status: DocumentStatus, ratings: &[i32]) {
        let data = DocumentData { rating: average_rating(ratings), status };
        if self.documents.insert(id, data).is_none() {
            self.insertion_order.push(id);
        }
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn rating(&self, id: DocumentId) -> Option<i32> {
        self.documents.get(&id).map(|d| d.rating)
    }

    pub fn status(&self, id: DocumentId) -> Option<DocumentStatus> {
        self.documents.get(&id).map(|d| d.status)
    }

    pub(crate) fn get(&self, id: DocumentId) -> Option<DocumentData> {
        self.documents.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.insertion_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.insertion_order.is_empty()
    }

    pub fn id_at(&self, position: usize) -> Result<DocumentId> {
        self.insertion_order
            .get(position)
            .copied()
            .ok_or(SearchError::PositionOutOfRange { position, count: self.len() })
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.insertion_order.iter().copied()
    }
}
