//! Error types for the persistence layer.
//!
//! Reads never fail on malformed data (it is treated as empty); these
//! errors come from the filesystem or from serializing on write.

/// Errors that can occur while persisting simulations or branch records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing a store file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: String,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A value could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
