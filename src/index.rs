use tracing::debug;

use crate::{
    record::Record,
    text,
    vectorizer::{SparseVector, TfidfVectorizer},
};

/// An immutable search index over a set of records.
///
/// Owns the fitted vectorizer, one weighted vector per record, and the
/// records themselves, position-aligned. The index never mutates: when the
/// corpus changes, build a fresh one and swap it in.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
    records: Vec<Record>,
}

impl SearchIndex {
    /// Build an index over `records`.
    ///
    /// Identical input produces an identical index. An empty input
    /// produces a valid index that answers every query with no results.
    pub fn build(records: Vec<Record>) -> Self {
        let documents: Vec<String> =
            records.iter().map(text::flatten).collect();
        let vectorizer = TfidfVectorizer::fit(&documents);
        let vectors = documents
            .iter()
            .map(|document| vectorizer.transform(document))
            .collect();

        debug!(
            "indexed {} records ({} vocabulary terms)",
            records.len(),
            vectorizer.vocabulary_size()
        );

        Self {
            vectorizer,
            vectors,
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cosine similarity of `query` against every record, position-aligned
    /// with [`records`](Self::records).
    pub fn scores(&self, query: &str) -> Vec<f32> {
        let query_vector = self.vectorizer.transform(query);
        if query_vector.is_empty() {
            return vec![0.0; self.records.len()];
        }
        self.vectors
            .iter()
            .map(|vector| query_vector.dot(vector))
            .collect()
    }

    /// Find a record by id: full hex or a prefix of it, with or without a
    /// leading '#'. The first match in dataset order wins.
    pub fn resolve(&self, reference: &str) -> Option<&Record> {
        let reference = reference.strip_prefix('#').unwrap_or(reference);
        if reference.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.id.as_str().starts_with(reference))
    }
}
