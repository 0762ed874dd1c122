//! Loading the initial item catalog.
//!
//! A seed file is a JSON array of items with camelCase keys:
//!
//! ```json
//! [
//!   { "id": 0, "title": "Summer Photos", "owner": "Anthony Stevens", "updatedAt": "2017-07-12T00:00:00Z" }
//! ]
//! ```
//!
//! Without a seed file the built-in [`Item::demo_catalog`] is used.

use crate::domain::{Item, Result, WorkflowError};
use std::collections::HashSet;
use std::path::Path;

/// Reads and validates a seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a JSON array of items,
/// or contains two items with the same id.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    tracing::debug!(path = ?path, "loading seed file");

    let contents = std::fs::read_to_string(path)?;
    let items = parse_items(&contents)?;

    tracing::debug!(item_count = items.len(), "seed loaded");
    Ok(items)
}

/// Parses a JSON seed document.
///
/// # Errors
///
/// Returns [`WorkflowError::Seed`] for malformed JSON and
/// [`WorkflowError::DuplicateItemId`] if ids repeat.
pub fn parse_items(json: &str) -> Result<Vec<Item>> {
    let items: Vec<Item> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(items.len());
    if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id)) {
        return Err(WorkflowError::DuplicateItemId(duplicate.id));
    }

    Ok(items)
}

/// Loads `path` if given, otherwise returns the demo catalog.
///
/// # Errors
///
/// Propagates errors from [`load_items`].
pub fn items_or_demo(path: Option<&Path>) -> Result<Vec<Item>> {
    path.map_or_else(|| Ok(Item::demo_catalog()), load_items)
}
