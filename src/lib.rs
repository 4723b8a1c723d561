//! bibdex - a literature search engine for bibliographic reference datasets.
//!
//! bibdex loads a JSON dataset of references, normalizes each entry into a
//! [`Record`] with a stable content-derived id, builds an in-memory TF-IDF
//! index over unigrams and bigrams, and answers ranked similarity queries
//! with fully deterministic ordering.
//!
//! # Quick start
//!
//! ```
//! use bibdex::{SearchIndex, dataset, search};
//!
//! let records = dataset::parse_records(r#"{
//!     "references": [
//!         {"id": 1, "title": "Graph Neural Networks", "year": 2019,
//!          "authors": ["Kipf"]},
//!         {"id": 2, "title": "Convolutional Networks", "year": 2021,
//!          "authors": ["LeCun"]}
//!     ]
//! }"#).unwrap();
//!
//! let index = SearchIndex::build(records);
//! let results = search::search(&index, "neural", Some(10));
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].title, "Graph Neural Networks");
//! ```

pub mod cli;
pub mod collections;
pub mod dataset;
pub mod error;
pub mod index;
pub mod record;
pub mod record_id;
pub mod search;
pub mod shell;
pub mod text;
pub mod vectorizer;

pub use collections::CollectionStore;
pub use error::{Error, Result};
pub use index::SearchIndex;
pub use record::Record;
pub use record_id::RecordId;
