//! Error types for the workflow crate.
//!
//! This module defines the centralized error type [`WorkflowError`] and a type alias
//! [`Result`] for the fallible edges of the crate: loading configuration, loading the
//! seed catalog, and constructing a workflow. The state machine itself never returns
//! an error; events it cannot handle are ignored and logged.

use crate::domain::ItemId;
use thiserror::Error;

/// The main error type for workflow setup operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion.
///
/// # Examples
///
/// ```
/// use pruneflow::domain::WorkflowError;
/// use pruneflow::Config;
///
/// let err = Config::from_toml_str("delete_latency_ms = 120000").unwrap_err();
/// assert!(matches!(err, WorkflowError::Config(_)));
/// ```
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Filesystem or I/O operation failed.
    ///
    /// Raised when a configuration or seed file cannot be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML or contains unknown keys.
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Seed catalog is not a valid JSON array of items.
    #[error("Seed parse error: {0}")]
    Seed(#[from] serde_json::Error),

    /// Configuration is semantically invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two items in the initial collection share an id.
    ///
    /// Item ids must be unique within the collection at all times.
    #[error("Duplicate item id: {0}")]
    DuplicateItemId(ItemId),
}

/// A specialized `Result` type for workflow setup operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
