use thiserror::Error;

/// Failures while moving answer payloads between rows and API models.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
