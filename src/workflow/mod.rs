//! Selection and bulk-delete state machine.
//!
//! # States
//!
//! ```text
//!              SELECT_ITEM / SELECT_ALL_ITEMS
//!   browsing ─────────────────────────────────► selecting ◄──┐
//!      ▲  ▲      DESELECT_ITEM (last) / RESET       │        │
//!      │  └─────────────────────────────────────────┘        │
//!      │                                     DELETE_SELECTION │ prompt done
//!      │ delete succeeded                         ▼          │
//!      └────────────────────────────────────── deleting ──► prompting
//!                                                 ▲  delete   │
//!                                                 │  failed   │
//!                                                 └───────────┘
//!                                              DELETE_SELECTION (retry)
//! ```
//!
//! # Modules
//!
//! - [`context`]: `WorkflowContext` and the pure selection transformations
//! - [`states`]: the four workflow states
//! - [`events`]: inbound events and generation ids
//! - [`table`]: the transition table
//! - [`actions`]: effects for the runtime
//! - [`machine`]: the `Workflow` dispatcher
//! - [`snapshot`]: read-only output of every `send`

pub mod actions;
pub mod context;
pub mod events;
pub mod machine;
pub mod snapshot;
pub mod states;
pub mod table;

pub use actions::Action;
pub use context::WorkflowContext;
pub use events::{Event, EventKind, InvocationId, PromptId};
pub use machine::{failure_message, Workflow};
pub use snapshot::{PromptSnapshot, Snapshot};
pub use states::WorkflowState;
