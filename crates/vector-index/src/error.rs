use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexError>;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Cannot fit an index over an empty catalog")]
    EmptyCorpus,

    #[error("Catalog text produced no indexable terms")]
    EmptyVocabulary,

    #[error("Search limit must be at least 1")]
    InvalidLimit,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Encoding(#[from] Box<bincode::ErrorKind>),

    #[error("Unsupported snapshot schema_version {0}")]
    SchemaVersion(u32),

    #[error("Snapshot payload is inconsistent: {0}")]
    CorruptSnapshot(String),
}
