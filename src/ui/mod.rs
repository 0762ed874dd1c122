//! Presentation layer for the demo binary.
//!
//! ```text
//! Snapshot → compute_viewmodel → ListViewModel → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready projection of a snapshot
//! - [`renderer`]: plain-text rendering of the view model

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel};
pub use viewmodel::{DialogAction, DialogInfo, DisplayRow, HeaderInfo, ListViewModel, ToolbarAction};
