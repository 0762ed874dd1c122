//! Pruneflow: a selection and bulk-delete workflow driven by an explicit
//! finite-state machine.
//!
//! Pruneflow models the interaction of a list view in which a user selects items,
//! deletes them through an asynchronous operation, and recovers from failure via
//! an error prompt:
//! - Four states: `browsing`, `selecting`, `deleting`, `prompting`
//! - Pure, immutable context transformations for the selection
//! - A declarative transition table with guards
//! - Generation-tagged async invocations whose stale results are ignored
//! - A composable prompt sub-workflow

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Demo binary (main.rs)                              │  ← stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio tasks
//! │  - Executes StartDelete / CancelDelete              │
//! │  - Routes settlements back as events                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Workflow core (workflow/)                          │  ← no I/O
//! │  - Transition table and dispatcher                  │
//! │  - Context transformations                          │
//! │  - Snapshots                                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Prompt        │   │ Delete        │   │ UI            │
//! │ (prompt/)     │   │ (delete/)     │   │ (ui/)         │
//! │ - Child FSM   │   │ - Async op    │   │ - View model  │
//! │ - Factory     │   │ - Simulated   │   │ - Text render │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/), seed loading (seed)              │
//! │  Observability (observability/)                     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: `Item`, `ItemId`, error types
//! - [`workflow`]: the state machine
//! - [`prompt`]: error prompt sub-workflow
//! - [`delete`]: the async delete capability
//! - [`runtime`]: tokio-based action execution
//! - [`ui`]: view model and text rendering
//! - [`seed`]: initial catalog loading
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! ```toml
//! trace_level = "debug"
//! trace_file = "/tmp/pruneflow-spans.jsonl"
//! seed_file = "items.json"
//! delete_latency_ms = 1500
//! fail_deletes = false
//! ```
//!
//! # Example
//!
//! ```rust
//! use pruneflow::{Action, Event, Workflow, WorkflowState};
//! use pruneflow::delete::{DeleteError, DeleteReceipt};
//! use pruneflow::domain::Item;
//!
//! let items = Item::demo_catalog();
//! let mut workflow = Workflow::new(items.clone())?;
//!
//! workflow.send(Event::select(&items[0]));
//! workflow.send(Event::DeleteSelection);
//!
//! let Some(Action::StartDelete { invocation, .. }) = workflow.drain_actions().pop() else {
//!     unreachable!();
//! };
//! let failed = workflow.send(Event::DeleteSettled {
//!     invocation,
//!     outcome: Err(DeleteError::new("offline")),
//! });
//! assert_eq!(failed.state, WorkflowState::Prompting);
//!
//! let back = workflow.send(Event::DismissPrompt);
//! assert_eq!(back.state, WorkflowState::Selecting);
//! assert_eq!(back.selected_items, vec![items[0].clone()]);
//! # let _ = DeleteReceipt { deleted: 0, message: String::new() };
//! # Ok::<(), pruneflow::WorkflowError>(())
//! ```

pub mod delete;
pub mod domain;
pub mod observability;
pub mod prompt;
pub mod runtime;
pub mod seed;
pub mod ui;
pub mod workflow;

pub use domain::{Item, ItemId, Result, WorkflowError};
pub use workflow::{Action, Event, Snapshot, Workflow, WorkflowState};

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default latency of the simulated delete transport.
pub const DEFAULT_DELETE_LATENCY_MS: u64 = 3000;

/// Upper bound accepted for `delete_latency_ms`.
pub const MAX_DELETE_LATENCY_MS: u64 = 60_000;

/// Runtime configuration, usually read from a TOML file.
///
/// Every key is optional; unknown keys are rejected.
///
/// # Example
///
/// ```rust
/// use pruneflow::Config;
///
/// let config = Config::from_toml_str("delete_latency_ms = 250\nfail_deletes = true")?;
/// assert_eq!(config.delete_latency_ms, 250);
/// assert!(config.fail_deletes);
/// assert!(config.seed_file.is_none());
/// # Ok::<(), pruneflow::WorkflowError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,

    /// File receiving exported spans as JSON lines. Export is off when unset.
    pub trace_file: Option<PathBuf>,

    /// JSON file with the initial items. The demo catalog is used when unset.
    pub seed_file: Option<PathBuf>,

    /// Latency of the simulated delete transport, in milliseconds.
    pub delete_latency_ms: u64,

    /// Makes every simulated delete fail.
    pub fail_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trace_level: None,
            trace_file: None,
            seed_file: None,
            delete_latency_ms: DEFAULT_DELETE_LATENCY_MS,
            fail_deletes: false,
        }
    }
}

impl Config {
    /// Parses configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Toml`] for malformed TOML, wrong value types, or
    /// unknown keys, and [`WorkflowError::Config`] if [`Config::validate`] fails.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Config`] if `delete_latency_ms` exceeds
    /// [`MAX_DELETE_LATENCY_MS`].
    pub fn validate(&self) -> Result<()> {
        if self.delete_latency_ms > MAX_DELETE_LATENCY_MS {
            return Err(WorkflowError::Config(format!(
                "delete_latency_ms = {} exceeds the maximum of {MAX_DELETE_LATENCY_MS}",
                self.delete_latency_ms
            )));
        }
        Ok(())
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// Relative `seed_file` and `trace_file` paths are resolved against the
    /// directory containing the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = ?path, "loading configuration");
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let Some(base) = path.parent() {
            config.seed_file = config.seed_file.map(|p| resolve(base, p));
            config.trace_file = config.trace_file.map(|p| resolve(base, p));
        }
        Ok(config)
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

/// Builds a workflow from configuration.
///
/// Loads the seed file if one is configured, otherwise starts from the demo
/// catalog. Does not install tracing; see [`observability::init_tracing`].
///
/// # Errors
///
/// Returns an error if the seed file cannot be loaded or contains duplicate ids.
///
/// # Example
///
/// ```rust
/// use pruneflow::{initialize, Config, WorkflowState};
///
/// let workflow = initialize(&Config::default())?;
/// assert_eq!(workflow.state(), WorkflowState::Browsing);
/// assert_eq!(workflow.context().items.len(), 6);
/// # Ok::<(), pruneflow::WorkflowError>(())
/// ```
pub fn initialize(config: &Config) -> Result<Workflow> {
    tracing::debug!(seed_file = ?config.seed_file, "initializing workflow");

    let items = seed::items_or_demo(config.seed_file.as_deref())?;
    Workflow::new(items)
}
