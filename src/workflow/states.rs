//! Top-level states of the workflow.
//!
//! The workflow is always in exactly one of four states:
//! - **Browsing**: nothing is selected
//! - **Selecting**: at least one selection event has been accepted
//! - **Deleting**: a delete operation is in flight for the current selection
//! - **Prompting**: the last delete failed and the error prompt is open
//!
//! # Example
//!
//! ```rust
//! use pruneflow::WorkflowState;
//!
//! let state = WorkflowState::default();
//! assert_eq!(state, WorkflowState::Browsing);
//! assert_eq!(state.to_string(), "browsing");
//! ```

use serde::Serialize;
use std::fmt;

/// Current state of the workflow.
///
/// Determines which events are accepted; see the transition table in
/// [`crate::workflow::table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    /// Default state, empty selection.
    ///
    /// Accepts `SELECT_ITEM` and `SELECT_ALL_ITEMS`.
    #[default]
    Browsing,

    /// One or more items are selected.
    ///
    /// Accepts selection changes, `RESET_SELECTION`, and `DELETE_SELECTION`.
    Selecting,

    /// Waiting for the delete operation to settle.
    ///
    /// Accepts no user events; only the settlement of the active invocation.
    Deleting,

    /// Showing the error prompt after a failed delete.
    ///
    /// Accepts `DISMISS_PROMPT` (forwarded to the prompt) and `DELETE_SELECTION`
    /// (retry with the unchanged selection).
    Prompting,
}

impl WorkflowState {
    /// Lowercase state name as exposed to the view layer.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::Selecting => "selecting",
            Self::Deleting => "deleting",
            Self::Prompting => "prompting",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
