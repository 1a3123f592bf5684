use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The document is valid JSON but does not have the expected shape.
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}
