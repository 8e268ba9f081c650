use serde::{Deserialize, Serialize};

/// Caller-assigned document id. Signed so that negative ids can be rejected explicitly.
pub type DocumentId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    #[default]
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl DocumentStatus {
    /// Ordinal used by textual reports (ACTUAL = 0 .. REMOVED = 3).
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

/// One ranked hit, built fresh for every query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentResult {
    pub id: DocumentId,
    pub relevance: f64,
    pub rating: i32,
}

impl DocumentResult {
    pub fn new(id: DocumentId, relevance: f64, rating: i32) -> Self {
        Self { id, relevance, rating }
    }
}

/// Stored per document after ingestion; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Floored mean of the ratings, 0 when there are none.
pub(crate) fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    // the mean of i32 values always fits back into i32
    sum.div_euclid(ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_floors() {
        assert_eq!(average_rating(&[]), 0);
        assert_eq!(average_rating(&[7, 2, 7]), 5);
        assert_eq!(average_rating(&[8, -3]), 2);
        assert_eq!(average_rating(&[-1, -2]), -2);
        assert_eq!(average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn status_serializes_upper_case() {
        let s: DocumentStatus = serde_json::from_str("\"BANNED\"").unwrap();
        assert_eq!(s, DocumentStatus::Banned);
        assert_eq!(serde_json::to_string(&DocumentStatus::Actual).unwrap(), "\"ACTUAL\"");
        assert_eq!(DocumentStatus::Removed.ordinal(), 3);
    }
}
