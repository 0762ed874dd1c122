//! The delete operation the workflow invokes on entering `deleting`.
//!
//! The workflow depends only on [`DeleteOperation`]: one method that takes the
//! selection and returns a future settling with success or failure. The outcome
//! is opaque to the workflow; it only distinguishes `Ok` from `Err`.
//!
//! # Modules
//!
//! - `simulated`: latency-based stand-in transport used by the demo binary

pub mod simulated;

pub use simulated::SimulatedDelete;

use crate::domain::Item;
use futures_util::future::BoxFuture;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result of one delete invocation.
pub type DeleteOutcome = std::result::Result<DeleteReceipt, DeleteError>;

/// Success value of a delete invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReceipt {
    /// Number of items the transport reports as deleted.
    pub deleted: usize,
    /// Human-readable confirmation.
    pub message: String,
}

/// Failure of a delete invocation.
///
/// Recoverable and user-facing: the workflow routes it to the error prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DeleteError {
    message: String,
}

impl DeleteError {
    /// Creates an error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Asynchronous capability that deletes a selection.
///
/// Implementations are started once per entry into `deleting` and are never
/// retried automatically. The returned future must be `'static` so the runtime
/// can drive it independently of the workflow.
///
/// # Example
///
/// ```rust
/// use futures_util::future::{self, BoxFuture};
/// use pruneflow::delete::{DeleteOperation, DeleteOutcome, DeleteReceipt};
/// use pruneflow::domain::Item;
///
/// struct AlwaysOk;
///
/// impl DeleteOperation for AlwaysOk {
///     fn execute(&self, selection: Vec<Item>) -> BoxFuture<'static, DeleteOutcome> {
///         let deleted = selection.len();
///         Box::pin(future::ready(Ok(DeleteReceipt {
///             deleted,
///             message: format!("{deleted} items deleted successfully"),
///         })))
///     }
/// }
/// ```
pub trait DeleteOperation: Send + Sync {
    /// Starts deleting `selection`.
    fn execute(&self, selection: Vec<Item>) -> BoxFuture<'static, DeleteOutcome>;
}

impl<T: DeleteOperation + ?Sized> DeleteOperation for Arc<T> {
    fn execute(&self, selection: Vec<Item>) -> BoxFuture<'static, DeleteOutcome> {
        (**self).execute(selection)
    }
}

impl<T: DeleteOperation + ?Sized> DeleteOperation for Box<T> {
    fn execute(&self, selection: Vec<Item>) -> BoxFuture<'static, DeleteOutcome> {
        (**self).execute(selection)
    }
}
