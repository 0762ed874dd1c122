//! Effects emitted by the workflow for the runtime to execute.
//!
//! The workflow never performs I/O. Entering or leaving `deleting` records an
//! [`Action`] in the workflow's outbox; the runtime drains the outbox after every
//! `send` and carries the actions out (see [`crate::runtime::Coordinator`]).
//!
//! # Example
//!
//! ```rust
//! use pruneflow::{Action, Event, Workflow};
//! use pruneflow::domain::Item;
//!
//! let mut workflow = Workflow::new(Item::demo_catalog())?;
//! workflow.send(Event::SelectAllItems);
//! workflow.send(Event::DeleteSelection);
//!
//! let actions = workflow.drain_actions();
//! assert!(matches!(actions.as_slice(), [Action::StartDelete { .. }]));
//! # Ok::<(), pruneflow::WorkflowError>(())
//! ```

use super::events::InvocationId;
use crate::domain::Item;

/// Commands for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the delete operation for `selection`.
    ///
    /// Emitted exactly once per entry into `deleting`. The outcome must be sent
    /// back as [`Event::DeleteSettled`](crate::Event::DeleteSettled) tagged with
    /// the same `invocation`.
    StartDelete {
        /// Generation id of this invocation.
        invocation: InvocationId,
        /// Selection captured on entry.
        selection: Vec<Item>,
    },

    /// Abandon the invocation; its outcome will be ignored if it still arrives.
    ///
    /// Emitted when `deleting` is left before the invocation settled.
    CancelDelete {
        /// Invocation to abandon.
        invocation: InvocationId,
    },
}
