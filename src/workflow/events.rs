//! Events accepted by the workflow.
//!
//! User-originated events carry the names of the external interface
//! (`SELECT_ITEM`, `DELETE_SELECTION`, ...). Two further events are internal:
//! they report the settlement of a delete invocation and the completion of a
//! prompt instance, and each carries the generation id of the invocation it
//! belongs to so late arrivals can be recognized and dropped.

use crate::delete::DeleteOutcome;
use crate::domain::Item;
use serde::Serialize;
use std::fmt;

/// Generation id of one delete invocation.
///
/// A new id is issued on every entry into `deleting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct InvocationId(pub u64);

/// Generation id of one prompt instance.
///
/// A new id is issued on every entry into `prompting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PromptId(pub u64);

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delete#{}", self.0)
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "prompt#{}", self.0)
    }
}

/// Events processed by [`Workflow::send`](crate::Workflow::send).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Adds one item to the selection.
    SelectItem {
        /// Item to select; must be part of the collection.
        item: Item,
    },
    /// Selects every item.
    SelectAllItems,
    /// Removes one item from the selection.
    DeselectItem {
        /// Item to deselect, matched by id.
        item: Item,
    },
    /// Clears the selection.
    ResetSelection,
    /// Deletes the current selection, or retries after a failure.
    DeleteSelection,
    /// Dismisses the error prompt.
    DismissPrompt,

    /// Internal: the delete operation started for `invocation` has settled.
    DeleteSettled {
        /// Invocation this outcome belongs to.
        invocation: InvocationId,
        /// Success or failure of the operation; the content is not inspected.
        outcome: DeleteOutcome,
    },

    /// Internal: the prompt instance `prompt` reached its terminal state.
    PromptDone {
        /// Prompt instance that completed.
        prompt: PromptId,
    },
}

impl Event {
    /// Convenience constructor for [`Event::SelectItem`].
    #[must_use]
    pub fn select(item: &Item) -> Self {
        Self::SelectItem { item: item.clone() }
    }

    /// Convenience constructor for [`Event::DeselectItem`].
    #[must_use]
    pub fn deselect(item: &Item) -> Self {
        Self::DeselectItem { item: item.clone() }
    }

    /// Returns the table key for this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SelectItem { .. } => EventKind::SelectItem,
            Self::SelectAllItems => EventKind::SelectAllItems,
            Self::DeselectItem { .. } => EventKind::DeselectItem,
            Self::ResetSelection => EventKind::ResetSelection,
            Self::DeleteSelection => EventKind::DeleteSelection,
            Self::DismissPrompt => EventKind::DismissPrompt,
            Self::DeleteSettled { outcome: Ok(_), .. } => EventKind::DeleteSucceeded,
            Self::DeleteSettled { outcome: Err(_), .. } => EventKind::DeleteFailed,
            Self::PromptDone { .. } => EventKind::PromptDone,
        }
    }

    /// Item payload of `SELECT_ITEM` and `DESELECT_ITEM`.
    #[must_use]
    pub const fn item(&self) -> Option<&Item> {
        match self {
            Self::SelectItem { item } | Self::DeselectItem { item } => Some(item),
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`Event`], used as the transition table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SelectItem,
    SelectAllItems,
    DeselectItem,
    ResetSelection,
    DeleteSelection,
    DismissPrompt,
    DeleteSucceeded,
    DeleteFailed,
    PromptDone,
}

impl EventKind {
    /// Wire-style name of the event.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SelectItem => "SELECT_ITEM",
            Self::SelectAllItems => "SELECT_ALL_ITEMS",
            Self::DeselectItem => "DESELECT_ITEM",
            Self::ResetSelection => "RESET_SELECTION",
            Self::DeleteSelection => "DELETE_SELECTION",
            Self::DismissPrompt => "DISMISS_PROMPT",
            Self::DeleteSucceeded => "done.invoke.delete",
            Self::DeleteFailed => "error.invoke.delete",
            Self::PromptDone => "done.invoke.prompt",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
