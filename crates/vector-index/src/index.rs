use crate::error::{IndexError, Result};
use crate::snapshot::{IndexSnapshot, SNAPSHOT_SCHEMA_VERSION};
use crate::tfidf::TfidfModel;
use advisor_catalog::Catalog;
use ndarray::Array2;
use sha2::{Digest, Sha256};
use std::path::Path;

/// One nearest-neighbor match: a catalog row and its squared Euclidean
/// distance to the query vector. Lower distance means more similar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetrievalHit {
    pub row: usize,
    pub distance: f32,
}

/// TF-IDF vector index over a catalog. Immutable after construction; the
/// vector row at index `i` always corresponds to catalog row `i`.
#[derive(Debug)]
pub struct TfidfIndex {
    model: TfidfModel,
    vectors: Array2<f32>,
    fingerprint: [u8; 32],
}

impl TfidfIndex {
    /// Fit the vector space over the catalog's combined texts. Fails on an
    /// empty catalog or a catalog producing no terms.
    pub fn build(catalog: &Catalog) -> Result<Self> {
        if catalog.is_empty() {
            return Err(IndexError::EmptyCorpus);
        }
        let texts: Vec<&str> = catalog.combined_texts().collect();
        let (model, vectors) = TfidfModel::fit(&texts)?;
        log::info!(
            "Fitted TF-IDF space over {} items ({} terms)",
            vectors.nrows(),
            model.dimensions()
        );
        Ok(Self {
            model,
            vectors,
            fingerprint: corpus_fingerprint(catalog),
        })
    }

    /// Nearest-neighbor search: vectorize `query` against the frozen
    /// vocabulary, rank every row by squared L2 distance, return the `k`
    /// closest in ascending order with ties broken by ascending row index.
    ///
    /// A query whose terms are all out-of-vocabulary degenerates to an
    /// all-zero vector; the search still runs and ranks by distance to the
    /// origin, which carries little relevance. `k` larger than the catalog
    /// returns every row once; `k == 0` is an error.
    pub fn search(&self, query: &str, k: usize) -> Result<Vec<RetrievalHit>> {
        if k == 0 {
            return Err(IndexError::InvalidLimit);
        }

        let query_vector = self.model.transform(query);
        let mut hits: Vec<RetrievalHit> = self
            .vectors
            .outer_iter()
            .enumerate()
            .map(|(row, vector)| {
                let distance = vector
                    .iter()
                    .zip(query_vector.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                RetrievalHit { row, distance }
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.row.cmp(&b.row))
        });
        hits.truncate(k.min(self.len()));
        Ok(hits)
    }

    /// Number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.model.dimensions()
    }

    /// Write the fitted space to a binary snapshot (atomic tmp + rename).
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let snapshot = IndexSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            fingerprint: self.fingerprint,
            terms: self.model.terms().to_vec(),
            idf: self.model.idf().to_vec(),
            rows: self.vectors.nrows(),
            dims: self.vectors.ncols(),
            data: self.vectors.iter().copied().collect(),
        };
        snapshot.write(path).await?;
        log::info!("Persisted index snapshot to {}", path.display());
        Ok(())
    }

    /// Restore a fitted space from a snapshot. Search over the restored
    /// index is bit-for-bit identical to the freshly built one.
    pub async fn restore(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let snapshot = IndexSnapshot::read(path).await?;
        let model = TfidfModel::from_parts(snapshot.terms, snapshot.idf)?;
        let vectors = Array2::from_shape_vec((snapshot.rows, snapshot.dims), snapshot.data)
            .map_err(|err| IndexError::CorruptSnapshot(err.to_string()))?;
        log::info!(
            "Restored index snapshot from {} ({} rows, {} terms)",
            path.display(),
            vectors.nrows(),
            model.dimensions()
        );
        Ok(Self {
            model,
            vectors,
            fingerprint: snapshot.fingerprint,
        })
    }

    /// Prefer an existing snapshot over refitting; fall back to a fresh
    /// build (persisted for next time) when the snapshot is absent,
    /// unreadable, or was built from a different catalog. The fingerprint
    /// check means a changed catalog triggers a rebuild instead of silently
    /// serving stale vectors.
    pub async fn load_or_build(catalog: &Catalog, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            match Self::restore(path).await {
                Ok(index) if index.fingerprint == corpus_fingerprint(catalog) => {
                    return Ok(index);
                }
                Ok(_) => log::warn!(
                    "Snapshot at {} was built from a different catalog; rebuilding",
                    path.display()
                ),
                Err(err) => log::warn!(
                    "Failed to restore snapshot at {}: {err}; rebuilding",
                    path.display()
                ),
            }
        }

        let index = Self::build(catalog)?;
        index.persist(path).await?;
        Ok(index)
    }
}

/// Digest of the corpus the index was fitted over: row count plus every
/// combined text, NUL-separated so shifted row boundaries change the digest.
fn corpus_fingerprint(catalog: &Catalog) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update((catalog.len() as u64).to_le_bytes());
    for text in catalog.combined_texts() {
        hasher.update(text.as_bytes());
        hasher.update([0u8]);
    }
    hasher.finalize().into()
}
