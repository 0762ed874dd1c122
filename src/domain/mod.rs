//! Domain layer: the item model and error types.
//!
//! These types are independent of the state machine and of any runtime; every
//! other layer depends on them.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Item model and the demonstration catalog
//!
//! # Examples
//!
//! ```
//! use pruneflow::domain::{Item, Result};
//!
//! fn first_item() -> Result<Item> {
//!     Ok(Item::demo_catalog().remove(0))
//! }
//! assert_eq!(first_item().unwrap().title, "Summer Photos");
//! ```

pub mod error;
pub mod item;

pub use error::{Result, WorkflowError};
pub use item::{Item, ItemId};
