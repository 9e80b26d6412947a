use crate::error::{IndexError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub(crate) const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Serialized form of a fitted index. The fingerprint ties the snapshot to
/// the catalog it was built from; `data` is the vector space in row-major
/// order.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct IndexSnapshot {
    pub schema_version: u32,
    pub fingerprint: [u8; 32],
    pub terms: Vec<String>,
    pub idf: Vec<f32>,
    pub rows: usize,
    pub dims: usize,
    pub data: Vec<f32>,
}

impl IndexSnapshot {
    pub async fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let bytes = bincode::serialize(self)?;
        let tmp = path.with_extension("bin.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    pub async fn read(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path.as_ref()).await?;
        let snapshot: Self = bincode::deserialize(&bytes)?;
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(IndexError::SchemaVersion(snapshot.schema_version));
        }
        if snapshot.data.len() != snapshot.rows * snapshot.dims {
            return Err(IndexError::CorruptSnapshot(format!(
                "{} values for a {}x{} vector space",
                snapshot.data.len(),
                snapshot.rows,
                snapshot.dims
            )));
        }
        Ok(snapshot)
    }
}
