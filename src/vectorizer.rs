use std::collections::{BTreeMap, BTreeSet};

use crate::text::tokenize;

/// A sparse vector of (column, weight) pairs, sorted by column.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector(Vec<(u32, f32)>);

impl SparseVector {
    /// Dot product with another sparse vector, as a merge walk over the
    /// two sorted column lists.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.0.len() && j < other.0.len() {
            match self.0[i].0.cmp(&other.0[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.0[i].1 * other.0[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// L2 norm of the weights.
    pub fn norm(&self) -> f32 {
        self.0.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.0 {
                *w /= norm;
            }
        }
    }
}

/// A fitted TF-IDF model over unigrams and bigrams.
///
/// Columns are assigned in lexicographic term order, so fitting the same
/// corpus twice yields a bit-identical model.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, u32>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF weights over the given documents.
    ///
    /// Every term appearing in at least one document enters the
    /// vocabulary. IDF is smoothed: ln((1 + docs) / (1 + df)) + 1, which
    /// keeps corpus-wide terms at weight 1 instead of zeroing them out.
    pub fn fit(documents: &[String]) -> Self {
        let mut document_frequency: BTreeMap<String, u32> = BTreeMap::new();
        for document in documents {
            let unique: BTreeSet<String> =
                terms(document).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let doc_count = documents.len() as f32;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (column, (term, df)) in
            document_frequency.into_iter().enumerate()
        {
            vocabulary.insert(term, column as u32);
            idf.push(((1.0 + doc_count) / (1.0 + df as f32)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    /// Weight a single text against the fitted vocabulary.
    ///
    /// Counts in-vocabulary terms, multiplies by IDF, and L2-normalizes.
    /// Terms outside the vocabulary contribute nothing; a text with no
    /// known terms yields the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<u32, f32> = BTreeMap::new();
        for term in terms(text) {
            if let Some(&column) = self.vocabulary.get(&term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut vector = SparseVector(
            counts
                .into_iter()
                .map(|(column, count)| {
                    (column, count * self.idf[column as usize])
                })
                .collect(),
        );
        vector.normalize();
        vector
    }

    /// IDF weight for a vocabulary term, if present.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary
            .get(term)
            .map(|&column| self.idf[column as usize])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Unigrams followed by adjacent-pair bigrams, in document order.
fn terms(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let bigrams: Vec<String> =
        tokens.windows(2).map(|pair| pair.join(" ")).collect();
    let mut terms = tokens;
    terms.extend(bigrams);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit(documents: &[&str]) -> TfidfVectorizer {
        let owned: Vec<String> =
            documents.iter().map(|d| d.to_string()).collect();
        TfidfVectorizer::fit(&owned)
    }

    #[test]
    fn vocabulary_includes_bigrams() {
        let model = fit(&["deep learning"]);
        // "deep", "learning", and "deep learning"
        assert_eq!(model.vocabulary_size(), 3);
        assert!(model.idf("deep learning").is_some());
    }

    #[test]
    fn smooth_idf_values() {
        let model = fit(&["apple", "apple banana"]);
        // df("apple") = 2 of 2 docs: ln(3/3) + 1 = 1
        let apple = model.idf("apple").unwrap();
        assert!((apple - 1.0).abs() < 1e-6);
        // df("banana") = 1 of 2 docs: ln(3/2) + 1
        let banana = model.idf("banana").unwrap();
        assert!((banana - 1.405_465_1).abs() < 1e-6);
    }

    #[test]
    fn rare_terms_outweigh_common_ones() {
        let model = fit(&["shared apple", "shared banana", "shared cherry"]);
        assert!(model.idf("apple").unwrap() > model.idf("shared").unwrap());
    }

    #[test]
    fn unknown_terms_drop_out() {
        let model = fit(&["alpha beta"]);
        assert!(model.transform("gamma delta").is_empty());
    }

    #[test]
    fn transform_is_unit_length() {
        let model = fit(&["alpha beta", "beta gamma delta"]);
        let vector = model.transform("beta gamma");
        assert!((vector.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn empty_text_transforms_to_zero_vector() {
        let model = fit(&["alpha beta"]);
        assert!(model.transform("").is_empty());
        assert!(model.transform("???").is_empty());
    }

    #[test]
    fn empty_corpus_fits_empty_vocabulary() {
        let model = fit(&[]);
        assert_eq!(model.vocabulary_size(), 0);
        assert!(model.transform("anything").is_empty());
    }

    #[test]
    fn identical_texts_have_cosine_one() {
        let model = fit(&["graph neural networks", "deep learning"]);
        let a = model.transform("graph neural networks");
        let b = model.transform("graph neural networks");
        assert!((a.dot(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn disjoint_texts_have_cosine_zero() {
        let model = fit(&["graph neural networks", "cooking pasta"]);
        let a = model.transform("graph neural");
        let b = model.transform("cooking pasta");
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn fitting_twice_is_bit_identical() {
        let documents = vec![
            "graph neural networks".to_string(),
            "convolutional networks for images".to_string(),
        ];
        let a = TfidfVectorizer::fit(&documents);
        let b = TfidfVectorizer::fit(&documents);
        assert_eq!(a, b);
        assert_eq!(a.transform("networks"), b.transform("networks"));
    }
}
