//! In-memory full-text search over short documents.
//!
//! Documents are ingested with a rating list and a lifecycle status, indexed by
//! normalized term frequency, and queried with `term` / `-term` syntax. Ranking
//! is TF-IDF; minus-terms exclude a document outright.

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod server;
pub mod shared;
pub mod store;
pub mod tokenizer;

pub use config::SearchConfig;
pub use document::{DocumentId, DocumentResult, DocumentStatus};
pub use error::{DocumentError, QueryError, Result, SearchError};
pub use query::Query;
pub use server::SearchServer;
pub use shared::SharedSearchServer;
pub use tokenizer::StopWords;
