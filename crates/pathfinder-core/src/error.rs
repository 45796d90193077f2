//! Error types for the Pathfinder core
//!
//! Storage and serialization failures are typed here with `thiserror`.
//! Form validation has its own field-scoped type in [`crate::form`] since
//! those errors are shown inline rather than propagated.

use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug)]
pub enum PathfinderError {
    /// The backing key/value store could not be read or written
    #[error("Storage error for key '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No usable data directory could be determined
    #[error("Could not determine data directory")]
    NoDataDir,
}

impl PathfinderError {
    pub fn storage(key: &str, source: std::io::Error) -> Self {
        Self::Storage {
            key: key.to_string(),
            source,
        }
    }
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, PathfinderError>;
