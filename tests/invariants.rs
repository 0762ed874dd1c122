// Property-based checks of the context invariants under random event sequences.

use pruneflow::delete::{DeleteError, DeleteReceipt};
use pruneflow::domain::{Item, ItemId};
use pruneflow::workflow::{InvocationId, PromptId};
use pruneflow::{Event, Workflow, WorkflowState};
use proptest::prelude::*;

/// One randomly chosen input. Item ids 6 and 7 are outside the demo catalog.
#[derive(Debug, Clone)]
enum Input {
    Select(u64),
    Deselect(u64),
    SelectAll,
    Reset,
    Delete,
    Dismiss,
    Settle { ok: bool },
    StaleSettle { ok: bool },
    StalePromptDone,
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        3 => (0u64..8).prop_map(Input::Select),
        3 => (0u64..8).prop_map(Input::Deselect),
        1 => Just(Input::SelectAll),
        1 => Just(Input::Reset),
        2 => Just(Input::Delete),
        2 => Just(Input::Dismiss),
        2 => any::<bool>().prop_map(|ok| Input::Settle { ok }),
        1 => any::<bool>().prop_map(|ok| Input::StaleSettle { ok }),
        1 => Just(Input::StalePromptDone),
    ]
}

fn item_for(id: u64) -> Item {
    Item::demo_catalog()
        .into_iter()
        .find(|item| item.id == ItemId(id))
        .unwrap_or_else(|| Item::new(id, "Stranger", "Nobody", chrono::Utc::now()))
}

fn outcome(ok: bool) -> pruneflow::delete::DeleteOutcome {
    if ok {
        Ok(DeleteReceipt {
            deleted: 0,
            message: "done".to_string(),
        })
    } else {
        Err(DeleteError::new("failed"))
    }
}

/// Maps an input to an event, using the workflow's live ids for settlements.
fn to_event(workflow: &Workflow, input: &Input) -> Option<Event> {
    Some(match input {
        Input::Select(id) => Event::select(&item_for(*id)),
        Input::Deselect(id) => Event::deselect(&item_for(*id)),
        Input::SelectAll => Event::SelectAllItems,
        Input::Reset => Event::ResetSelection,
        Input::Delete => Event::DeleteSelection,
        Input::Dismiss => Event::DismissPrompt,
        Input::Settle { ok } => Event::DeleteSettled {
            invocation: workflow.pending_delete()?,
            outcome: outcome(*ok),
        },
        Input::StaleSettle { ok } => Event::DeleteSettled {
            invocation: InvocationId(workflow.pending_delete().map_or(0, |id| id.0) + 1_000),
            outcome: outcome(*ok),
        },
        Input::StalePromptDone => Event::PromptDone {
            prompt: PromptId(workflow.active_prompt().map_or(0, |id| id.0) + 1_000),
        },
    })
}

proptest! {
    #[test]
    fn invariants_hold_for_random_sequences(inputs in prop::collection::vec(input_strategy(), 1..60)) {
        let mut workflow = Workflow::new(Item::demo_catalog()).unwrap();
        let mut item_count = workflow.context().items.len();

        for input in &inputs {
            let Some(event) = to_event(&workflow, input) else {
                continue;
            };
            let stale = matches!(input, Input::StaleSettle { .. } | Input::StalePromptDone);
            let before = workflow.snapshot();
            let snapshot = workflow.send(event);
            workflow.drain_actions();

            prop_assert!(snapshot.invariants_hold(), "invariants broken after {input:?}: {snapshot:?}");
            prop_assert!(snapshot.items.len() <= item_count);
            item_count = snapshot.items.len();

            prop_assert_eq!(snapshot.pending_delete.is_some(), snapshot.state == WorkflowState::Deleting);
            prop_assert_eq!(snapshot.prompt.is_some(), snapshot.state == WorkflowState::Prompting);

            if stale {
                prop_assert_eq!(&snapshot, &before);
            }
        }
    }

    #[test]
    fn select_all_twice_matches_once(picks in prop::collection::vec(0u64..6, 0..6)) {
        let mut workflow = Workflow::new(Item::demo_catalog()).unwrap();
        for id in picks {
            workflow.send(Event::select(&item_for(id)));
        }

        let once = workflow.send(Event::SelectAllItems);
        let twice = workflow.send(Event::SelectAllItems);
        prop_assert_eq!(once.selected_items, twice.selected_items);
    }
}
