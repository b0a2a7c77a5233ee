use thiserror::Error;

/// Error type for the engine's structural boundaries.
///
/// Engine computations themselves are total and never fail; errors only
/// arise where external data crosses into the crate (snapshot JSON, window
/// construction).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
