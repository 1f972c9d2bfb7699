//! Error types for the analytics pipeline

use thiserror::Error;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Document store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// General error
    #[error("{0}")]
    General(String),
}

/// Document store errors
///
/// Fetches are one-shot with no retry: a failed fetch is logged and the
/// previous cache is kept, so these errors surface only as diagnostics.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store is unreachable (network failure, timeout)
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The caller is not permitted to read the collection
    #[error("Permission denied for collection '{collection}': {message}")]
    PermissionDenied {
        /// Collection the read was attempted against
        collection: String,
        /// Backend-provided detail
        message: String,
    },

    /// The named collection does not exist
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be parsed as TOML
    #[error("Failed to parse config file {path}: {message}")]
    Parse {
        /// Path that was attempted
        path: String,
        /// Parser detail
        message: String,
    },

    /// Config values failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
