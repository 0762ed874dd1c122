//! Prompt sub-workflow shown after a failed delete.
//!
//! The parent workflow treats the prompt as an opaque child machine. It needs only
//! three things from it:
//!
//! 1. an instance created with contextual data ([`PromptContext`]) on entering
//!    `prompting`,
//! 2. a way to forward `DISMISS_PROMPT` to that instance
//!    ([`PromptWorkflow::handle`]),
//! 3. a completion signal once the instance reaches its terminal state.
//!
//! Completion is reported through the return value of `handle`
//! ([`PromptStatus::Done`]). A prompt that finishes later (for example after a
//! closing animation) returns [`PromptStatus::Pending`], and its owner reports the
//! completion afterwards with [`Event::PromptDone`](crate::Event::PromptDone).
//!
//! # Example
//!
//! ```rust
//! use pruneflow::prompt::{PromptContext, PromptEvent, PromptMachine, PromptStatus, PromptWorkflow};
//!
//! let mut prompt = PromptMachine::new(PromptContext::new("Error deleting the 1 selected item(s)."));
//! assert_eq!(prompt.status(), PromptStatus::Pending);
//! assert_eq!(prompt.handle(PromptEvent::Dismiss), PromptStatus::Done);
//! ```

use serde::Serialize;
use std::fmt;

/// Data handed to a prompt instance when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    /// Message describing the failed delete.
    pub message: String,
}

impl PromptContext {
    /// Creates a context carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Events the parent forwards to a prompt instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    /// The user dismissed the prompt.
    Dismiss,
}

/// Whether a prompt instance has reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStatus {
    /// Still active.
    Pending,
    /// Terminal state reached; the parent may leave `prompting`.
    Done,
}

/// A running prompt instance.
pub trait PromptWorkflow: fmt::Debug + Send {
    /// Message shown by this instance.
    fn message(&self) -> &str;

    /// Processes a forwarded event and reports the resulting status.
    fn handle(&mut self, event: PromptEvent) -> PromptStatus;

    /// Current status without processing an event.
    fn status(&self) -> PromptStatus;
}

/// Creates prompt instances on entry into `prompting`.
///
/// Implemented for closures so tests can inject their own prompt machines.
pub trait PromptFactory: Send {
    /// Starts a new prompt instance.
    fn spawn(&self, context: PromptContext) -> Box<dyn PromptWorkflow>;
}

impl<F> PromptFactory for F
where
    F: Fn(PromptContext) -> Box<dyn PromptWorkflow> + Send,
{
    fn spawn(&self, context: PromptContext) -> Box<dyn PromptWorkflow> {
        self(context)
    }
}

/// Factory for the built-in [`PromptMachine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrompt;

impl PromptFactory for DefaultPrompt {
    fn spawn(&self, context: PromptContext) -> Box<dyn PromptWorkflow> {
        Box::new(PromptMachine::new(context))
    }
}

/// States of the built-in prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Dialog is visible.
    Open,
    /// Terminal.
    Dismissed,
}

/// Built-in prompt: `Open` until dismissed, then `Dismissed` (terminal).
#[derive(Debug, Clone)]
pub struct PromptMachine {
    state: PromptState,
    context: PromptContext,
}

impl PromptMachine {
    /// Creates an open prompt.
    #[must_use]
    pub const fn new(context: PromptContext) -> Self {
        Self {
            state: PromptState::Open,
            context,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PromptState {
        self.state
    }
}

impl PromptWorkflow for PromptMachine {
    fn message(&self) -> &str {
        &self.context.message
    }

    fn handle(&mut self, event: PromptEvent) -> PromptStatus {
        match (self.state, event) {
            (PromptState::Open, PromptEvent::Dismiss) => {
                tracing::debug!("prompt dismissed");
                self.state = PromptState::Dismissed;
            }
            (PromptState::Dismissed, _) => {}
        }
        self.status()
    }

    fn status(&self) -> PromptStatus {
        match self.state {
            PromptState::Open => PromptStatus::Pending,
            PromptState::Dismissed => PromptStatus::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_reaches_terminal_state() {
        let mut prompt = PromptMachine::new(PromptContext::new("boom"));
        assert_eq!(prompt.state(), PromptState::Open);

        assert_eq!(prompt.handle(PromptEvent::Dismiss), PromptStatus::Done);
        assert_eq!(prompt.state(), PromptState::Dismissed);
    }

    #[test]
    fn dismiss_after_terminal_is_ignored() {
        let mut prompt = PromptMachine::new(PromptContext::new("boom"));
        prompt.handle(PromptEvent::Dismiss);
        assert_eq!(prompt.handle(PromptEvent::Dismiss), PromptStatus::Done);
    }

    #[test]
    fn default_factory_carries_message() {
        let prompt = DefaultPrompt.spawn(PromptContext::new("try again"));
        assert_eq!(prompt.message(), "try again");
        assert_eq!(prompt.status(), PromptStatus::Pending);
    }

    #[test]
    fn closures_act_as_factories() {
        let factory = |context: PromptContext| -> Box<dyn PromptWorkflow> {
            Box::new(PromptMachine::new(PromptContext::new(context.message.to_uppercase())))
        };
        let prompt = factory.spawn(PromptContext::new("oops"));
        assert_eq!(prompt.message(), "OOPS");
    }
}
