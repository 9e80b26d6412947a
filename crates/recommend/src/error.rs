use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendError>;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Retrieval error: {0}")]
    Index(#[from] advisor_vector_index::IndexError),

    #[error("Text generation service error: {0}")]
    Service(#[from] advisor_llm::LlmError),
}
