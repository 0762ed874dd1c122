//! Latency-based stand-in for a real delete transport.
//!
//! Waits a fixed delay, then succeeds or fails depending on configuration. Used
//! by the demo binary; tests inject deterministic doubles instead.

use super::{DeleteError, DeleteOperation, DeleteOutcome, DeleteReceipt};
use crate::domain::Item;
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Simulated delete transport.
#[derive(Debug, Clone)]
pub struct SimulatedDelete {
    latency: Duration,
    fail: bool,
}

impl SimulatedDelete {
    /// Creates a transport that settles after `latency`, failing every call if
    /// `fail` is set.
    #[must_use]
    pub const fn new(latency: Duration, fail: bool) -> Self {
        Self { latency, fail }
    }

    /// Builds the transport from configuration.
    #[must_use]
    pub const fn from_config(config: &crate::Config) -> Self {
        Self::new(
            Duration::from_millis(config.delete_latency_ms),
            config.fail_deletes,
        )
    }
}

impl DeleteOperation for SimulatedDelete {
    fn execute(&self, selection: Vec<Item>) -> BoxFuture<'static, DeleteOutcome> {
        let latency = self.latency;
        let fail = self.fail;
        let count = selection.len();

        Box::pin(async move {
            tracing::debug!(count, latency_ms = latency.as_millis() as u64, "simulated delete started");
            tokio::time::sleep(latency).await;

            if fail {
                Err(DeleteError::new(format!(
                    "Error deleting the {count} selected item(s). Please try again later."
                )))
            } else {
                Ok(DeleteReceipt {
                    deleted: count,
                    message: format!("{count} items deleted successfully"),
                })
            }
        })
    }
}
