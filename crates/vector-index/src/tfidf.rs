use crate::error::{IndexError, Result};
use crate::tokenize::tokenize;
use ndarray::{Array1, Array2};
use std::collections::{BTreeMap, HashMap};

/// Frozen TF-IDF weighting fitted once over the catalog corpus.
///
/// Dimension ids are assigned in ascending lexicographic term order and the
/// idf uses smoothed document frequencies, `ln((1 + n) / (1 + df)) + 1`, so a
/// restored model reproduces the exact vector space it was fitted as. After
/// construction the vocabulary is never re-fitted; [`transform`] maps unknown
/// terms to zero weight.
///
/// [`transform`]: TfidfModel::transform
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl TfidfModel {
    /// Fit the weighting over all documents and produce one L2-normalized
    /// row per document. Fails if there are no documents or the documents
    /// contain no terms.
    pub fn fit(documents: &[&str]) -> Result<(Self, Array2<f32>)> {
        if documents.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d)).collect();

        // BTreeMap keeps terms sorted, which fixes the dimension order.
        let mut document_frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let mut unique: Vec<&str> = tokens.iter().map(String::as_str).collect();
            unique.sort_unstable();
            unique.dedup();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(IndexError::EmptyVocabulary);
        }

        let n = documents.len() as f32;
        let mut terms = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in &document_frequency {
            terms.push((*term).to_string());
            idf.push(((1.0 + n) / (1.0 + *df as f32)).ln() + 1.0);
        }
        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let model = Self {
            vocabulary,
            terms,
            idf,
        };

        let mut rows = Array2::<f32>::zeros((documents.len(), model.dimensions()));
        for (row, tokens) in tokenized.iter().enumerate() {
            let mut vector = rows.row_mut(row);
            for token in tokens {
                if let Some(&dim) = model.vocabulary.get(token.as_str()) {
                    vector[dim] += model.idf[dim];
                }
            }
            normalize(vector);
        }

        Ok((model, rows))
    }

    /// Vectorize free text against the frozen vocabulary. Out-of-vocabulary
    /// terms contribute zero weight; text with no known terms yields the
    /// all-zero vector.
    #[must_use]
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut vector = Array1::<f32>::zeros(self.dimensions());
        for token in tokenize(text) {
            if let Some(&dim) = self.vocabulary.get(token.as_str()) {
                vector[dim] += self.idf[dim];
            }
        }
        normalize(vector.view_mut());
        vector
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }

    /// Terms in dimension order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Reassemble a model from persisted parts. Lengths must agree.
    pub(crate) fn from_parts(terms: Vec<String>, idf: Vec<f32>) -> Result<Self> {
        if terms.len() != idf.len() {
            return Err(IndexError::CorruptSnapshot(format!(
                "{} terms but {} idf weights",
                terms.len(),
                idf.len()
            )));
        }
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Ok(Self {
            vocabulary,
            terms,
            idf,
        })
    }
}

fn normalize(mut vector: ndarray::ArrayViewMut1<'_, f32>) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.mapv_inplace(|weight| weight / norm);
    }
}
