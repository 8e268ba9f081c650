//! Query syntax: space-separated `term` (required) and `-term` (excluded).

use crate::error::QueryError;
use crate::tokenizer::{is_valid_text, split_into_words, StopWords};
use std::collections::BTreeSet;

/// Parsed query. Both sets are deduplicated, stop-word free and sorted;
/// match results report plus-terms in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(word: &str) -> Result<QueryWord<'_>, QueryError> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() {
        return Err(QueryError::EmptyNegation);
    }
    if data.starts_with('-') {
        return Err(QueryError::DoubleNegation(word.to_string()));
    }
    if !is_valid_text(data) {
        return Err(QueryError::InvalidCharacters(word.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

impl Query {
    /// Parse raw query text. Stop words are dropped whatever their sign.
    pub fn parse(text: &str, stop_words: &StopWords) -> Result<Self, QueryError> {
        let mut query = Query::default();
        for word in split_into_words(text) {
            let word = parse_query_word(word)?;
            if stop_words.contains(word.data) {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        tracing::trace!(
            plus = query.plus_words.len(),
            minus = query.minus_words.len(),
            "parsed query"
        );
        Ok(query)
    }

    pub fn is_empty(&self) -> bool {
        self.plus_words.is_empty() && self.minus_words.is_empty()
    }
}
