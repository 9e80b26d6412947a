use thiserror::Error;

pub type Result<T> = std::result::Result<T, DialogueError>;

#[derive(Error, Debug)]
pub enum DialogueError {
    #[error("Text generation service error: {0}")]
    Service(#[from] advisor_llm::LlmError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
