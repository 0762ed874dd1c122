//! View model types representing the renderable list view.
//!
//! A [`ListViewModel`] is computed from a [`Snapshot`] and consumed by the
//! renderer. It holds display-ready data only: titles, per-row flags, and the
//! event each control sends.
//!
//! # Example
//!
//! ```rust
//! use pruneflow::{Event, Workflow};
//! use pruneflow::domain::Item;
//!
//! let items = Item::demo_catalog();
//! let mut workflow = Workflow::new(items.clone())?;
//!
//! let vm = workflow.send(Event::select(&items[0])).compute_viewmodel();
//! assert_eq!(vm.header.title, "1 selected");
//! assert!(vm.rows[0].is_selected);
//! # Ok::<(), pruneflow::WorkflowError>(())
//! ```

use crate::domain::ItemId;
use crate::workflow::{Event, Snapshot, WorkflowState};
use serde::Serialize;

/// Complete view model for the item list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListViewModel {
    /// Title bar and its single toolbar action.
    pub header: HeaderInfo,

    /// One row per item, in display order.
    pub rows: Vec<DisplayRow>,

    /// Whether checkboxes are shown (every state except `browsing`).
    pub show_checkboxes: bool,

    /// Whether the select-all checkbox is ticked.
    pub all_selected: bool,

    /// Shown while a delete invocation is in flight.
    pub busy: bool,

    /// Error dialog, present only while `prompting`.
    pub dialog: Option<DialogInfo>,
}

/// Title bar information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    /// `"My files"` or `"<n> selected"`.
    pub title: String,
    /// Toolbar action.
    pub action: ToolbarAction,
}

/// The toolbar button shown next to the title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ToolbarAction {
    /// Shown while nothing is selected.
    Search,
    /// Sends `DELETE_SELECTION`.
    Delete,
}

impl ToolbarAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::Delete => "Delete",
        }
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub id: ItemId,
    pub title: String,
    /// `"<owner> · <updated date>"`.
    pub subtitle: String,
    pub is_selected: bool,
}

/// Error dialog shown after a failed delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogInfo {
    pub title: String,
    pub message: String,
    /// Buttons in display order: `Ok` dismisses, `Retry` deletes again.
    pub actions: Vec<DialogAction>,
}

/// A dialog button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogAction {
    Ok,
    Retry,
}

impl DialogAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "Ok",
            Self::Retry => "Retry",
        }
    }

    /// Event the button sends.
    #[must_use]
    pub const fn event(self) -> Event {
        match self {
            Self::Ok => Event::DismissPrompt,
            Self::Retry => Event::DeleteSelection,
        }
    }
}

impl ListViewModel {
    /// Projects a snapshot into a view model.
    #[must_use]
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let count = snapshot.selection_len();
        let header = if count == 0 {
            HeaderInfo {
                title: "My files".to_string(),
                action: ToolbarAction::Search,
            }
        } else {
            HeaderInfo {
                title: format!("{count} selected"),
                action: ToolbarAction::Delete,
            }
        };

        let rows = snapshot
            .items
            .iter()
            .map(|item| DisplayRow {
                id: item.id,
                title: item.title.clone(),
                subtitle: format!("{} · {}", item.owner, item.updated_label()),
                is_selected: snapshot.is_selected(item.id),
            })
            .collect();

        let dialog = snapshot.prompt.as_ref().map(|prompt| DialogInfo {
            title: "Error deleting selection".to_string(),
            message: prompt.message.clone(),
            actions: vec![DialogAction::Ok, DialogAction::Retry],
        });

        Self {
            header,
            rows,
            show_checkboxes: !snapshot.matches(WorkflowState::Browsing),
            all_selected: snapshot.all_selected(),
            busy: snapshot.matches(WorkflowState::Deleting),
            dialog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::workflow::{PromptId, PromptSnapshot};

    fn snapshot(state: WorkflowState, selected: &[usize]) -> Snapshot {
        let items = Item::demo_catalog();
        let selected_items = selected.iter().map(|&i| items[i].clone()).collect();
        Snapshot {
            state,
            items,
            selected_items,
            prompt: None,
            pending_delete: None,
            revision: 0,
        }
    }

    #[test]
    fn browsing_shows_plain_list() {
        let vm = ListViewModel::from_snapshot(&snapshot(WorkflowState::Browsing, &[]));
        assert_eq!(vm.header.title, "My files");
        assert_eq!(vm.header.action, ToolbarAction::Search);
        assert!(!vm.show_checkboxes);
        assert!(!vm.all_selected);
        assert!(vm.rows.iter().all(|row| !row.is_selected));
        assert_eq!(vm.rows[0].subtitle, "Anthony Stevens · Wed Jul 12 2017");
    }

    #[test]
    fn selecting_counts_selection() {
        let vm = ListViewModel::from_snapshot(&snapshot(WorkflowState::Selecting, &[1, 4]));
        assert_eq!(vm.header.title, "2 selected");
        assert_eq!(vm.header.action, ToolbarAction::Delete);
        assert!(vm.show_checkboxes);
        assert!(vm.rows[1].is_selected);
        assert!(vm.rows[4].is_selected);
        assert!(!vm.rows[0].is_selected);
    }

    #[test]
    fn checkbox_agrees_with_toggle_event() {
        let mut empty = snapshot(WorkflowState::Browsing, &[]);
        empty.items.clear();
        assert!(!ListViewModel::from_snapshot(&empty).all_selected);
        assert_eq!(empty.toggle_all_event(), Event::SelectAllItems);

        let all = snapshot(WorkflowState::Selecting, &[0, 1, 2, 3, 4, 5]);
        assert!(ListViewModel::from_snapshot(&all).all_selected);
        assert_eq!(all.toggle_all_event(), Event::ResetSelection);
    }

    #[test]
    fn prompting_shows_dialog() {
        let mut snap = snapshot(WorkflowState::Prompting, &[0]);
        snap.prompt = Some(PromptSnapshot {
            id: PromptId(1),
            message: "try later".to_string(),
        });

        let dialog = ListViewModel::from_snapshot(&snap).dialog.unwrap();
        assert_eq!(dialog.title, "Error deleting selection");
        assert_eq!(dialog.message, "try later");
        assert_eq!(dialog.actions[0].event(), Event::DismissPrompt);
        assert_eq!(dialog.actions[1].event(), Event::DeleteSelection);
    }
}
