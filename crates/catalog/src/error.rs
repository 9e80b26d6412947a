use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog header is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Catalog at {0} contains no usable rows")]
    Empty(String),
}
