use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Client storage is not available")]
    Unavailable,

    #[error("Storage backend rejected the operation: {0}")]
    Backend(String),

    #[error("Could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}
