//! The workflow core: event dispatch, invocations, and prompt composition.
//!
//! [`Workflow`] is an explicitly constructed, caller-owned state object. Its single
//! entry point, [`Workflow::send`], processes one event to completion and returns a
//! [`Snapshot`]:
//!
//! 1. Internal events are checked against the active invocation or prompt; stale
//!    ones are dropped.
//! 2. The transition table yields the first row whose guard holds, or nothing, in
//!    which case the event is ignored.
//! 3. The row's steps run in order (context transformations, prompt forwarding).
//! 4. If the row leaves the state, exit effects run for the old state and entry
//!    effects for the new one.
//!
//! Follow-up events raised while processing (a prompt that completes during a
//! forwarded dismiss) are queued and processed before `send` returns.
//!
//! # Invocations
//!
//! Entering `deleting` issues a fresh [`InvocationId`] and records
//! [`Action::StartDelete`] with the current selection. Only a
//! [`Event::DeleteSettled`] carrying that id, arriving while still in `deleting`,
//! is acted on. Leaving `deleting` any other way records [`Action::CancelDelete`].
//!
//! Entering `prompting` spawns one prompt instance with a fresh [`PromptId`]; it is
//! dropped on exit, and a completion for any other id is ignored.
//!
//! # Example
//!
//! ```rust
//! use pruneflow::{Event, Workflow, WorkflowState};
//! use pruneflow::domain::Item;
//!
//! let items = Item::demo_catalog();
//! let mut workflow = Workflow::new(items.clone())?;
//!
//! let snapshot = workflow.send(Event::select(&items[1]));
//! assert_eq!(snapshot.state, WorkflowState::Selecting);
//! assert!(snapshot.is_selected(items[1].id));
//! # Ok::<(), pruneflow::WorkflowError>(())
//! ```

use super::actions::Action;
use super::context::{self, WorkflowContext};
use super::events::{Event, InvocationId, PromptId};
use super::snapshot::{PromptSnapshot, Snapshot};
use super::states::WorkflowState;
use super::table::{self, Step, Target};
use crate::domain::{Item, Result};
use crate::prompt::{DefaultPrompt, PromptContext, PromptEvent, PromptFactory, PromptStatus, PromptWorkflow};
use std::collections::VecDeque;
use std::fmt;

/// A prompt instance owned by the workflow while `prompting`.
#[derive(Debug)]
struct ActivePrompt {
    id: PromptId,
    instance: Box<dyn PromptWorkflow>,
}

/// The selection and bulk-delete state machine.
pub struct Workflow {
    state: WorkflowState,
    context: WorkflowContext,
    revision: u64,
    next_invocation: u64,
    pending_delete: Option<InvocationId>,
    next_prompt: u64,
    prompt: Option<ActivePrompt>,
    prompt_factory: Box<dyn PromptFactory>,
    outbox: Vec<Action>,
}

impl Workflow {
    /// Creates a workflow in `browsing` with the given items and no selection.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::DuplicateItemId`](crate::WorkflowError::DuplicateItemId)
    /// if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let context = WorkflowContext::new(items)?;
        tracing::debug!(item_count = context.items.len(), "workflow created");

        Ok(Self {
            state: WorkflowState::Browsing,
            context,
            revision: 0,
            next_invocation: 0,
            pending_delete: None,
            next_prompt: 0,
            prompt: None,
            prompt_factory: Box::new(DefaultPrompt),
            outbox: Vec::new(),
        })
    }

    /// Replaces the factory used to start prompt instances.
    #[must_use]
    pub fn with_prompt_factory(mut self, factory: impl PromptFactory + 'static) -> Self {
        self.prompt_factory = Box::new(factory);
        self
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> WorkflowState {
        self.state
    }

    /// Current context.
    #[must_use]
    pub const fn context(&self) -> &WorkflowContext {
        &self.context
    }

    /// Delete invocation currently in flight.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<InvocationId> {
        self.pending_delete
    }

    /// Id of the active prompt instance.
    #[must_use]
    pub fn active_prompt(&self) -> Option<PromptId> {
        self.prompt.as_ref().map(|prompt| prompt.id)
    }

    /// Takes the actions recorded since the last call.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.outbox)
    }

    /// Builds a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            items: self.context.items.clone(),
            selected_items: self.context.selected_items.clone(),
            prompt: self.prompt.as_ref().map(|prompt| PromptSnapshot {
                id: prompt.id,
                message: prompt.instance.message().to_string(),
            }),
            pending_delete: self.pending_delete,
            revision: self.revision,
        }
    }

    /// Processes `event` (and any follow-up events it raises) to completion.
    ///
    /// Events with no matching transition are ignored.
    pub fn send(&mut self, event: Event) -> Snapshot {
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            if self.process(&event, &mut queue) {
                self.revision += 1;
            }
            debug_assert!(self.context.selection_is_subset());
            debug_assert!(self.state != WorkflowState::Browsing || self.context.selected_items.is_empty());
        }

        self.snapshot()
    }

    /// Runs one event through the table. Returns `true` if a transition was taken.
    fn process(&mut self, event: &Event, queue: &mut VecDeque<Event>) -> bool {
        let kind = event.kind();
        let _span = tracing::debug_span!("workflow_send", state = %self.state, event = %kind).entered();

        if !self.admit(event) {
            return false;
        }

        let Some(transition) = table::select(self.state, &self.context, event) else {
            if table::accepts(self.state, kind) {
                tracing::debug!(state = %self.state, event = %kind, "no guard matched, event ignored");
            } else {
                tracing::debug!(state = %self.state, event = %kind, "event not accepted in this state");
            }
            return false;
        };

        for step in transition.steps {
            self.apply(*step, event, queue);
        }

        if let Target::Enter(next) = transition.target {
            self.transition_to(next);
        }

        tracing::debug!(
            state = %self.state,
            selected = self.context.selected_items.len(),
            items = self.context.items.len(),
            "transition taken"
        );
        true
    }

    /// Filters internal events that belong to a finished invocation or prompt.
    fn admit(&mut self, event: &Event) -> bool {
        match event {
            Event::DeleteSettled { invocation, outcome } => {
                let current = self.state == WorkflowState::Deleting && self.pending_delete == Some(*invocation);
                if !current {
                    tracing::debug!(%invocation, pending = ?self.pending_delete, "stale delete settlement ignored");
                    return false;
                }
                self.pending_delete = None;
                match outcome {
                    Ok(receipt) => {
                        tracing::info!(%invocation, deleted = receipt.deleted, message = %receipt.message, "delete succeeded");
                    }
                    Err(error) => {
                        tracing::warn!(%invocation, error = %error, "delete failed");
                    }
                }
                true
            }
            Event::PromptDone { prompt } => {
                let current = self.active_prompt() == Some(*prompt);
                if !current {
                    tracing::debug!(%prompt, active = ?self.active_prompt(), "stale prompt completion ignored");
                }
                current
            }
            _ => true,
        }
    }

    fn apply(&mut self, step: Step, event: &Event, queue: &mut VecDeque<Event>) {
        match step {
            Step::AddItemToSelection => {
                if let Some(item) = event.item() {
                    self.context = context::add_item_to_selection(&self.context, item);
                }
            }
            Step::AddAllItemsToSelection => {
                self.context = context::add_all_items_to_selection(&self.context);
            }
            Step::RemoveItemFromSelection => {
                if let Some(item) = event.item() {
                    self.context = context::remove_item_from_selection(&self.context, item);
                }
            }
            Step::ResetSelection => {
                self.context = context::reset_selection(&self.context);
            }
            Step::DeleteSelection => {
                self.context = context::delete_selection(&self.context);
            }
            Step::ForwardDismissToPrompt => {
                let Some(prompt) = self.prompt.as_mut() else {
                    tracing::debug!("no active prompt to forward dismiss to");
                    return;
                };
                match prompt.instance.handle(PromptEvent::Dismiss) {
                    PromptStatus::Done => {
                        tracing::debug!(prompt = %prompt.id, "prompt reached terminal state");
                        queue.push_back(Event::PromptDone { prompt: prompt.id });
                    }
                    PromptStatus::Pending => {
                        tracing::debug!(prompt = %prompt.id, "prompt still active after dismiss");
                    }
                }
            }
        }
    }

    fn transition_to(&mut self, next: WorkflowState) {
        self.exit(self.state);
        tracing::debug!(from = %self.state, to = %next, "state changed");
        self.state = next;
        self.enter(next);
    }

    /// Moves to `next` through the regular exit and entry effects, bypassing the table.
    #[cfg(test)]
    pub(crate) fn force_transition(&mut self, next: WorkflowState) {
        self.transition_to(next);
    }

    fn exit(&mut self, state: WorkflowState) {
        match state {
            WorkflowState::Deleting => {
                if let Some(invocation) = self.pending_delete.take() {
                    tracing::debug!(%invocation, "leaving deleting before settlement, cancelling");
                    self.outbox.push(Action::CancelDelete { invocation });
                }
            }
            WorkflowState::Prompting => {
                if let Some(prompt) = self.prompt.take() {
                    tracing::debug!(prompt = %prompt.id, "prompt torn down");
                }
            }
            WorkflowState::Browsing | WorkflowState::Selecting => {}
        }
    }

    fn enter(&mut self, state: WorkflowState) {
        match state {
            WorkflowState::Deleting => {
                self.next_invocation += 1;
                let invocation = InvocationId(self.next_invocation);
                self.pending_delete = Some(invocation);
                tracing::info!(%invocation, count = self.context.selected_items.len(), "starting delete");
                self.outbox.push(Action::StartDelete {
                    invocation,
                    selection: self.context.selected_items.clone(),
                });
            }
            WorkflowState::Prompting => {
                self.next_prompt += 1;
                let id = PromptId(self.next_prompt);
                let message = failure_message(self.context.selected_items.len());
                tracing::debug!(prompt = %id, message = %message, "starting prompt");
                let instance = self.prompt_factory.spawn(PromptContext::new(message));
                self.prompt = Some(ActivePrompt { id, instance });
            }
            WorkflowState::Browsing | WorkflowState::Selecting => {}
        }
    }
}

/// Message handed to the prompt after a failed delete of `count` items.
#[must_use]
pub fn failure_message(count: usize) -> String {
    format!("Error deleting the {count} selected item(s). Please try again later.")
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("revision", &self.revision)
            .field("pending_delete", &self.pending_delete)
            .field("prompt", &self.prompt)
            .field("outbox", &self.outbox)
            .finish_non_exhaustive()
    }
}
