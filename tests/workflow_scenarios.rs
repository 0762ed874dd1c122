//! End-to-end scenarios driven through the public `Workflow` API.

use pruneflow::delete::{DeleteError, DeleteOutcome, DeleteReceipt};
use pruneflow::domain::Item;
use pruneflow::prompt::{PromptContext, PromptEvent, PromptStatus, PromptWorkflow};
use pruneflow::workflow::{InvocationId, PromptId};
use pruneflow::{Action, Event, Workflow, WorkflowState};

fn three_items() -> Vec<Item> {
    Item::demo_catalog().into_iter().take(3).collect()
}

fn succeeded(count: usize) -> DeleteOutcome {
    Ok(DeleteReceipt {
        deleted: count,
        message: format!("{count} items deleted successfully"),
    })
}

fn failed() -> DeleteOutcome {
    Err(DeleteError::new("storage unavailable"))
}

/// Returns the invocation and captured selection of the single pending start.
fn take_start(workflow: &mut Workflow) -> (InvocationId, Vec<Item>) {
    let mut actions = workflow.drain_actions();
    assert_eq!(actions.len(), 1, "expected exactly one action, got {actions:?}");
    match actions.remove(0) {
        Action::StartDelete { invocation, selection } => (invocation, selection),
        other => panic!("expected StartDelete, got {other:?}"),
    }
}

/// Prompt double that stays active after dismiss until completion is signalled.
#[derive(Debug)]
struct ClosingPrompt {
    message: String,
}

impl PromptWorkflow for ClosingPrompt {
    fn message(&self) -> &str {
        &self.message
    }

    fn handle(&mut self, _event: PromptEvent) -> PromptStatus {
        PromptStatus::Pending
    }

    fn status(&self) -> PromptStatus {
        PromptStatus::Pending
    }
}

fn closing_prompt(context: PromptContext) -> Box<dyn PromptWorkflow> {
    Box::new(ClosingPrompt {
        message: context.message,
    })
}

#[test]
fn scenario_a_select_one_item() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();

    let snapshot = workflow.send(Event::select(&items[1]));
    assert_eq!(snapshot.state, WorkflowState::Selecting);
    assert_eq!(snapshot.selected_items, vec![items[1].clone()]);
}

#[test]
fn scenario_b_deselect_last_item_returns_to_browsing() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::select(&items[1]));

    let snapshot = workflow.send(Event::deselect(&items[1]));
    assert_eq!(snapshot.state, WorkflowState::Browsing);
    assert!(snapshot.selected_items.is_empty());
}

#[test]
fn scenario_c_successful_delete_removes_items() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::select(&items[0]));
    workflow.send(Event::select(&items[1]));

    let snapshot = workflow.send(Event::DeleteSelection);
    assert_eq!(snapshot.state, WorkflowState::Deleting);
    let (invocation, selection) = take_start(&mut workflow);
    assert_eq!(selection, vec![items[0].clone(), items[1].clone()]);

    let snapshot = workflow.send(Event::DeleteSettled {
        invocation,
        outcome: succeeded(2),
    });
    assert_eq!(snapshot.state, WorkflowState::Browsing);
    assert_eq!(snapshot.items, vec![items[2].clone()]);
    assert!(snapshot.selected_items.is_empty());
}

#[test]
fn scenario_d_failure_prompt_then_back_to_selecting() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone())
        .unwrap()
        .with_prompt_factory(closing_prompt);
    workflow.send(Event::select(&items[0]));
    workflow.send(Event::DeleteSelection);
    let (invocation, _) = take_start(&mut workflow);

    let snapshot = workflow.send(Event::DeleteSettled {
        invocation,
        outcome: failed(),
    });
    assert_eq!(snapshot.state, WorkflowState::Prompting);

    let snapshot = workflow.send(Event::DismissPrompt);
    assert_eq!(snapshot.state, WorkflowState::Prompting);

    let prompt = workflow.active_prompt().unwrap();
    let snapshot = workflow.send(Event::PromptDone { prompt });
    assert_eq!(snapshot.state, WorkflowState::Selecting);
    assert_eq!(snapshot.selected_items, vec![items[0].clone()]);
    assert_eq!(snapshot.items, items);
}

#[test]
fn scenario_e_retry_reuses_selection() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::select(&items[2]));
    workflow.send(Event::select(&items[0]));
    workflow.send(Event::DeleteSelection);
    let (first, before) = take_start(&mut workflow);
    workflow.send(Event::DeleteSettled {
        invocation: first,
        outcome: failed(),
    });

    let snapshot = workflow.send(Event::DeleteSelection);
    assert_eq!(snapshot.state, WorkflowState::Deleting);
    assert!(snapshot.prompt.is_none());

    let (second, retried) = take_start(&mut workflow);
    assert_ne!(first, second);
    assert_eq!(retried, before);
    assert_eq!(snapshot.selected_items, before);
}

#[test]
fn select_all_is_idempotent() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();

    let once = workflow.send(Event::SelectAllItems);
    let twice = workflow.send(Event::SelectAllItems);
    assert_eq!(once.selected_items, items);
    assert_eq!(twice.selected_items, once.selected_items);
    assert_eq!(twice.state, WorkflowState::Selecting);
}

#[test]
fn select_then_deselect_round_trips() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    let initial = workflow.snapshot();

    workflow.send(Event::select(&items[0]));
    let back = workflow.send(Event::deselect(&items[0]));

    assert_eq!(back.state, initial.state);
    assert_eq!(back.items, initial.items);
    assert_eq!(back.selected_items, initial.selected_items);
}

#[test]
fn deselect_one_of_many_stays_selecting() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::select(&items[0]));
    workflow.send(Event::select(&items[1]));

    let snapshot = workflow.send(Event::deselect(&items[0]));
    assert_eq!(snapshot.state, WorkflowState::Selecting);
    assert_eq!(snapshot.selected_items, vec![items[1].clone()]);
}

#[test]
fn reset_clears_selection() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::SelectAllItems);

    let snapshot = workflow.send(Event::ResetSelection);
    assert_eq!(snapshot.state, WorkflowState::Browsing);
    assert!(snapshot.selected_items.is_empty());
}

#[test]
fn events_without_transition_are_ignored() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    let initial = workflow.snapshot();

    for event in [
        Event::deselect(&items[0]),
        Event::ResetSelection,
        Event::DeleteSelection,
        Event::DismissPrompt,
        Event::PromptDone { prompt: PromptId(1) },
        Event::DeleteSettled {
            invocation: InvocationId(1),
            outcome: succeeded(1),
        },
    ] {
        assert_eq!(workflow.send(event), initial);
    }
    assert!(workflow.drain_actions().is_empty());
}

#[test]
fn late_settlement_of_earlier_invocation_is_ignored() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::select(&items[0]));
    workflow.send(Event::DeleteSelection);
    let (first, _) = take_start(&mut workflow);
    workflow.send(Event::DeleteSettled {
        invocation: first,
        outcome: failed(),
    });
    workflow.send(Event::DeleteSelection);
    let (second, _) = take_start(&mut workflow);

    let stale = workflow.send(Event::DeleteSettled {
        invocation: first,
        outcome: succeeded(1),
    });
    assert_eq!(stale.state, WorkflowState::Deleting);
    assert_eq!(stale.items, items);

    let done = workflow.send(Event::DeleteSettled {
        invocation: second,
        outcome: succeeded(1),
    });
    assert_eq!(done.state, WorkflowState::Browsing);
    assert_eq!(done.items, items[1..].to_vec());
}

#[test]
fn failure_message_reaches_prompt() {
    let items = three_items();
    let mut workflow = Workflow::new(items.clone()).unwrap();
    workflow.send(Event::SelectAllItems);
    workflow.send(Event::DeleteSelection);
    let (invocation, _) = take_start(&mut workflow);

    let snapshot = workflow.send(Event::DeleteSettled {
        invocation,
        outcome: failed(),
    });
    let prompt = snapshot.prompt.unwrap();
    assert_eq!(
        prompt.message,
        "Error deleting the 3 selected item(s). Please try again later."
    );

    let vm = workflow.snapshot().compute_viewmodel();
    assert_eq!(vm.dialog.unwrap().message, prompt.message);
}
