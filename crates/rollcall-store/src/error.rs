use thiserror::Error;

/// Errors produced by the store layer.
///
/// Callers of the typed [`crate::Store`] adapter never see these -- it
/// recovers by substituting an empty collection -- but the raw [`crate::KvStore`]
/// implementations surface them.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to determine a platform data directory.
    #[error("Could not determine application data directory")]
    NoDataDir,

    /// Generic I/O error (reading or writing a collection blob).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored blob could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
