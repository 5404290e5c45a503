//! In-memory full-text search with TF-IDF ranking.
//!
//! ```
//! use sift_core::{DocumentStatus, SearchServer};
//!
//! let server = SearchServer::new("in the").unwrap();
//! server.add_document(1, "cat in the city", DocumentStatus::Actual, &[1, 2, 3]).unwrap();
//! server.add_document(2, "dog in the big city", DocumentStatus::Actual, &[5, 4, 2]).unwrap();
//!
//! let top = server.find_top_documents("cat city -dog").unwrap();
//! assert_eq!(top.len(), 1);
//! assert_eq!(top[0].id, 1);
//! assert_eq!(top[0].rating, 2);
//! ```

pub mod concurrent_map;
pub mod dedup;
pub mod document;
pub mod error;
pub mod execution;
pub mod index;
pub mod interner;
pub mod paginate;
pub mod process_queries;
pub mod query;
pub mod ranking;
pub mod relevance;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub use concurrent_map::ConcurrentMap;
pub use dedup::remove_duplicates;
pub use document::{Document, DocumentId, DocumentStatus};
pub use error::{Error, Result};
pub use execution::{ExecutionPolicy, Parallel, Sequential, PAR, SEQ};
pub use interner::{Interner, Word};
pub use paginate::{paginate, Page, Paginator};
pub use process_queries::{process_queries, process_queries_joined};
pub use ranking::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
pub use request_queue::RequestQueue;
pub use server::SearchServer;
