//! Async execution of workflow actions on tokio.
//!
//! The [`Workflow`] only records what should happen. The [`Coordinator`] owns a
//! workflow together with a [`DeleteOperation`] and carries the recorded actions
//! out after every `send`:
//!
//! - [`Action::StartDelete`] spawns the delete future. When it settles, the outcome
//!   is posted as [`Event::DeleteSettled`] on the [`Signals`] channel.
//! - [`Action::CancelDelete`] aborts the spawned task. If the outcome was already
//!   posted, the workflow drops it as stale.
//!
//! Signals are fed back with [`Coordinator::settle`]. Keeping the receiver
//! separate from the coordinator lets an event loop wait on it while still
//! sending user events:
//!
//! ```rust,no_run
//! use pruneflow::delete::SimulatedDelete;
//! use pruneflow::domain::Item;
//! use pruneflow::runtime::Coordinator;
//! use pruneflow::{Event, Workflow};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> pruneflow::Result<()> {
//! let workflow = Workflow::new(Item::demo_catalog())?;
//! let deleter = Arc::new(SimulatedDelete::new(Duration::from_millis(50), false));
//! let (mut coordinator, mut signals) = Coordinator::new(workflow, deleter);
//!
//! coordinator.send(Event::SelectAllItems);
//! coordinator.send(Event::DeleteSelection);
//! let snapshot = coordinator.settle(&mut signals).await;
//! assert!(snapshot.is_some_and(|s| s.items.is_empty()));
//! # Ok(())
//! # }
//! ```

use crate::delete::DeleteOperation;
use crate::workflow::{Action, Event, InvocationId, Snapshot, Workflow};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receiving end of the internal events produced by spawned invocations.
#[derive(Debug)]
pub struct Signals {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl Signals {
    /// Waits for the next internal event.
    ///
    /// Never returns `None` while the coordinator that created it is alive.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Returns an internal event if one is already queued.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// Runs a [`Workflow`] and executes its actions.
pub struct Coordinator {
    workflow: Workflow,
    deleter: Arc<dyn DeleteOperation>,
    tx: mpsc::UnboundedSender<Event>,
    in_flight: Option<(InvocationId, JoinHandle<()>)>,
}

impl Coordinator {
    /// Creates a coordinator and the channel its invocations report on.
    pub fn new(workflow: Workflow, deleter: Arc<dyn DeleteOperation>) -> (Self, Signals) {
        let (tx, rx) = mpsc::unbounded_channel();
        let coordinator = Self {
            workflow,
            deleter,
            tx,
            in_flight: None,
        };
        (coordinator, Signals { rx })
    }

    /// Sends `event` to the workflow, then executes the resulting actions.
    ///
    /// Must be called from within a tokio runtime.
    pub fn send(&mut self, event: Event) -> Snapshot {
        let snapshot = self.workflow.send(event);
        for action in self.workflow.drain_actions() {
            self.execute(action);
        }
        snapshot
    }

    /// Waits for the next internal event and feeds it to the workflow.
    ///
    /// Returns `None` if the signal channel is closed.
    pub async fn settle(&mut self, signals: &mut Signals) -> Option<Snapshot> {
        let event = signals.recv().await?;
        Some(self.send(event))
    }

    /// Current snapshot without processing an event.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.workflow.snapshot()
    }

    /// The wrapped workflow.
    #[must_use]
    pub const fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    /// Returns `true` while a delete invocation awaits its settlement.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.workflow.pending_delete().is_some()
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::StartDelete { invocation, selection } => {
                tracing::debug!(%invocation, count = selection.len(), "spawning delete");
                let future = self.deleter.execute(selection);
                let tx = self.tx.clone();

                let handle = tokio::spawn(async move {
                    let outcome = future.await;
                    if tx.send(Event::DeleteSettled { invocation, outcome }).is_err() {
                        tracing::debug!(%invocation, "coordinator gone, settlement dropped");
                    }
                });

                if let Some((previous, old)) = self.in_flight.replace((invocation, handle)) {
                    if !old.is_finished() {
                        tracing::debug!(invocation = %previous, "replacing unfinished delete task");
                    }
                }
            }
            Action::CancelDelete { invocation } => {
                match self.in_flight.take() {
                    Some((current, handle)) if current == invocation => {
                        tracing::debug!(%invocation, "aborting delete task");
                        handle.abort();
                    }
                    other => {
                        tracing::debug!(%invocation, "cancel for unknown invocation");
                        self.in_flight = other;
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("workflow", &self.workflow)
            .field("in_flight", &self.in_flight.as_ref().map(|(id, _)| *id))
            .finish_non_exhaustive()
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}
