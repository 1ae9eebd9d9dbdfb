//! Error types for Planboard

use thiserror::Error;

/// Main error type for Planboard operations
#[derive(Error, Debug)]
pub enum PlanboardError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for Planboard operations
pub type Result<T> = std::result::Result<T, PlanboardError>;
