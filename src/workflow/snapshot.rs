//! Immutable snapshots of the workflow for the view layer.
//!
//! A [`Snapshot`] is produced after every processed event. It owns copies of the
//! items and the selection, so holding one never borrows the workflow and the view
//! layer has no path to mutate the context.
//!
//! Besides raw data it offers the derived, read-only projections a list view needs:
//! whether an item is selected, whether everything is selected, and which event a
//! click on a row or on the select-all checkbox should send.

use super::events::{Event, InvocationId, PromptId};
use super::states::WorkflowState;
use crate::domain::{Item, ItemId};
use serde::Serialize;

/// The active prompt as seen by the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptSnapshot {
    pub id: PromptId,
    pub message: String,
}

/// Read-only view of the workflow after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Current state.
    pub state: WorkflowState,
    /// Items in display order.
    pub items: Vec<Item>,
    /// Selected items in selection order.
    pub selected_items: Vec<Item>,
    /// Active prompt, present only while `prompting`.
    pub prompt: Option<PromptSnapshot>,
    /// Delete invocation in flight, present only while `deleting`.
    pub pending_delete: Option<InvocationId>,
    /// Number of events that changed the workflow so far.
    ///
    /// Unchanged when an event was ignored, so a view can skip re-rendering.
    pub revision: u64,
}

impl Snapshot {
    /// Returns `true` if the workflow is in `state`.
    #[must_use]
    pub fn matches(&self, state: WorkflowState) -> bool {
        self.state == state
    }

    /// Returns the item with `id`, if present.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns `true` if the item with `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected_items.iter().any(|item| item.id == id)
    }

    /// Returns `true` if the selection covers a non-empty collection.
    #[must_use]
    pub fn all_selected(&self) -> bool {
        !self.items.is_empty() && self.selected_items.len() == self.items.len()
    }

    /// Number of selected items.
    #[must_use]
    pub fn selection_len(&self) -> usize {
        self.selected_items.len()
    }

    /// Event a click on the row of `id` should send: deselect if selected,
    /// otherwise select. `None` if no such item exists.
    #[must_use]
    pub fn toggle_item_event(&self, id: ItemId) -> Option<Event> {
        let item = self.item(id)?;
        Some(if self.is_selected(id) {
            Event::deselect(item)
        } else {
            Event::select(item)
        })
    }

    /// Event the select-all checkbox should send: reset if everything is
    /// selected, otherwise select all.
    #[must_use]
    pub fn toggle_all_event(&self) -> Event {
        if self.all_selected() {
            Event::ResetSelection
        } else {
            Event::SelectAllItems
        }
    }

    /// Checks the context invariants: the selection is a subset of the items by
    /// id, and `browsing` implies an empty selection.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let subset = self
            .selected_items
            .iter()
            .all(|selected| self.items.iter().any(|item| item.id == selected.id));
        let browsing_empty = self.state != WorkflowState::Browsing || self.selected_items.is_empty();
        subset && browsing_empty
    }

    /// Computes the list view model for this snapshot.
    #[must_use]
    pub fn compute_viewmodel(&self) -> crate::ui::viewmodel::ListViewModel {
        crate::ui::viewmodel::ListViewModel::from_snapshot(self)
    }
}
