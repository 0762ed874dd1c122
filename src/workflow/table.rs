//! Declarative transition table.
//!
//! Every legal move of the workflow is one [`Transition`] row: source state, event
//! kind, optional [`Guard`], the [`Step`]s to run, and a [`Target`]. The dispatcher
//! in [`crate::workflow::machine`] looks up the rows for `(state, event)` in table
//! order and takes the first whose guard holds. A pair with no row, or whose
//! guards all fail, is ignored.
//!
//! | State | Event | Guard | Steps | Target |
//! |---|---|---|---|---|
//! | browsing | `SELECT_ITEM` | known item | add item | selecting |
//! | browsing | `SELECT_ALL_ITEMS` | | add all | selecting |
//! | selecting | `SELECT_ITEM` | known item | add item | stay |
//! | selecting | `SELECT_ALL_ITEMS` | | add all | stay |
//! | selecting | `DESELECT_ITEM` | last selected | remove item | browsing |
//! | selecting | `DESELECT_ITEM` | one of many | remove item | stay |
//! | selecting | `RESET_SELECTION` | | reset | browsing |
//! | selecting | `DELETE_SELECTION` | | | deleting |
//! | deleting | delete succeeded | | delete selection | browsing |
//! | deleting | delete failed | | | prompting |
//! | prompting | `DISMISS_PROMPT` | | forward to prompt | stay |
//! | prompting | `DELETE_SELECTION` | | | deleting |
//! | prompting | prompt done | | | selecting |

use super::context::WorkflowContext;
use super::events::{Event, EventKind};
use super::states::WorkflowState;

/// Predicate over the context (and the event payload) gating a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The event's item exists in the collection.
    KnownItem,
    /// The event's item is selected and is the only selected entry.
    LastSelected,
    /// The event's item is selected and other entries remain.
    OneOfMany,
}

impl Guard {
    /// Evaluates the guard.
    #[must_use]
    pub fn holds(self, ctx: &WorkflowContext, event: &Event) -> bool {
        let Some(item) = event.item() else {
            return false;
        };

        match self {
            Self::KnownItem => ctx.contains_item(item.id),
            Self::LastSelected => ctx.is_selected(item.id) && ctx.selected_items.len() == 1,
            Self::OneOfMany => ctx.is_selected(item.id) && ctx.selected_items.len() > 1,
        }
    }
}

/// One action executed while taking a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AddItemToSelection,
    AddAllItemsToSelection,
    RemoveItemFromSelection,
    ResetSelection,
    DeleteSelection,
    /// Forwards `DISMISS_PROMPT` to the active prompt instance.
    ForwardDismissToPrompt,
}

/// Where a transition leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Internal transition: no exit or entry effects.
    Stay,
    /// Leave the source state and enter the given one.
    Enter(WorkflowState),
}

/// A row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub source: WorkflowState,
    pub event: EventKind,
    pub guard: Option<Guard>,
    pub steps: &'static [Step],
    pub target: Target,
}

const fn row(
    source: WorkflowState,
    event: EventKind,
    guard: Option<Guard>,
    steps: &'static [Step],
    target: Target,
) -> Transition {
    Transition {
        source,
        event,
        guard,
        steps,
        target,
    }
}

use EventKind as E;
use WorkflowState as S;

/// The complete transition table, in evaluation order.
pub const TRANSITIONS: &[Transition] = &[
    row(S::Browsing, E::SelectItem, Some(Guard::KnownItem), &[Step::AddItemToSelection], Target::Enter(S::Selecting)),
    row(S::Browsing, E::SelectAllItems, None, &[Step::AddAllItemsToSelection], Target::Enter(S::Selecting)),
    row(S::Selecting, E::SelectItem, Some(Guard::KnownItem), &[Step::AddItemToSelection], Target::Stay),
    row(S::Selecting, E::SelectAllItems, None, &[Step::AddAllItemsToSelection], Target::Stay),
    row(S::Selecting, E::DeselectItem, Some(Guard::LastSelected), &[Step::RemoveItemFromSelection], Target::Enter(S::Browsing)),
    row(S::Selecting, E::DeselectItem, Some(Guard::OneOfMany), &[Step::RemoveItemFromSelection], Target::Stay),
    row(S::Selecting, E::ResetSelection, None, &[Step::ResetSelection], Target::Enter(S::Browsing)),
    row(S::Selecting, E::DeleteSelection, None, &[], Target::Enter(S::Deleting)),
    row(S::Deleting, E::DeleteSucceeded, None, &[Step::DeleteSelection], Target::Enter(S::Browsing)),
    row(S::Deleting, E::DeleteFailed, None, &[], Target::Enter(S::Prompting)),
    row(S::Prompting, E::DismissPrompt, None, &[Step::ForwardDismissToPrompt], Target::Stay),
    row(S::Prompting, E::DeleteSelection, None, &[], Target::Enter(S::Deleting)),
    row(S::Prompting, E::PromptDone, None, &[], Target::Enter(S::Selecting)),
];

/// Rows registered for `(state, kind)`, in evaluation order.
pub fn candidates(state: WorkflowState, kind: EventKind) -> impl Iterator<Item = &'static Transition> {
    TRANSITIONS
        .iter()
        .filter(move |transition| transition.source == state && transition.event == kind)
}

/// Returns the first row for `(state, event)` whose guard holds.
#[must_use]
pub fn select(state: WorkflowState, ctx: &WorkflowContext, event: &Event) -> Option<&'static Transition> {
    candidates(state, event.kind()).find(|transition| {
        transition
            .guard
            .map_or(true, |guard| guard.holds(ctx, event))
    })
}

/// Returns `true` if `state` has at least one row for `kind`.
#[must_use]
pub fn accepts(state: WorkflowState, kind: EventKind) -> bool {
    candidates(state, kind).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Item;
    use crate::workflow::context::{add_item_to_selection, WorkflowContext};

    fn context() -> WorkflowContext {
        WorkflowContext::new(Item::demo_catalog()).unwrap()
    }

    #[test]
    fn deleting_accepts_only_settlements() {
        let user_events = [
            E::SelectItem,
            E::SelectAllItems,
            E::DeselectItem,
            E::ResetSelection,
            E::DeleteSelection,
            E::DismissPrompt,
        ];
        for kind in user_events {
            assert!(!accepts(S::Deleting, kind), "{kind} must not be accepted while deleting");
        }
        assert!(accepts(S::Deleting, E::DeleteSucceeded));
        assert!(accepts(S::Deleting, E::DeleteFailed));
    }

    #[test]
    fn deselect_guards_are_exclusive() {
        let ctx = context();
        let first = ctx.items[0].clone();
        let second = ctx.items[1].clone();

        let one = add_item_to_selection(&ctx, &first);
        let picked = select(S::Selecting, &one, &Event::deselect(&first)).unwrap();
        assert_eq!(picked.guard, Some(Guard::LastSelected));
        assert_eq!(picked.target, Target::Enter(S::Browsing));

        let two = add_item_to_selection(&one, &second);
        let picked = select(S::Selecting, &two, &Event::deselect(&first)).unwrap();
        assert_eq!(picked.guard, Some(Guard::OneOfMany));
        assert_eq!(picked.target, Target::Stay);
    }

    #[test]
    fn deselect_with_empty_selection_has_no_row() {
        let ctx = context();
        let item = ctx.items[0].clone();
        assert!(select(S::Selecting, &ctx, &Event::deselect(&item)).is_none());
    }

    #[test]
    fn deselect_of_unselected_item_has_no_row() {
        let ctx = context();
        let one = add_item_to_selection(&ctx, &ctx.items[0].clone());
        let other = ctx.items[3].clone();
        assert!(select(S::Selecting, &one, &Event::deselect(&other)).is_none());
    }

    #[test]
    fn unknown_item_cannot_be_selected() {
        let ctx = context();
        let stranger = Item::new(99, "Ghost", "Nobody", chrono::Utc::now());
        assert!(select(S::Browsing, &ctx, &Event::select(&stranger)).is_none());
    }

    #[test]
    fn prompting_transitions() {
        let ctx = context();
        let dismiss = select(S::Prompting, &ctx, &Event::DismissPrompt).unwrap();
        assert_eq!(dismiss.steps, &[Step::ForwardDismissToPrompt]);
        assert_eq!(dismiss.target, Target::Stay);

        let retry = select(S::Prompting, &ctx, &Event::DeleteSelection).unwrap();
        assert_eq!(retry.target, Target::Enter(S::Deleting));
    }
}
