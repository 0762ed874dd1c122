//! Extended state of the workflow and the pure transformations over it.
//!
//! [`WorkflowContext`] holds the item collection and the current selection. It is
//! changed only through the five transformation functions in this module, each of
//! which takes the current context and returns a new one. None of them fail.
//!
//! # Invariants
//!
//! - Item ids are unique within `items`.
//! - Every entry of `selected_items` has an id present in `items`.
//!
//! The transformations preserve both: selection only ever copies entries out of
//! `items`, and deletion clears the selection.

use crate::domain::{Item, ItemId, Result, WorkflowError};
use serde::Serialize;
use std::collections::HashSet;

/// Items plus the current selection.
///
/// `selected_items` is semantically a set keyed by item id; insertion order is
/// kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowContext {
    pub items: Vec<Item>,
    pub selected_items: Vec<Item>,
}

impl WorkflowContext {
    /// Creates a context with the given items and an empty selection.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::DuplicateItemId`] if two items share an id.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.id)) {
            return Err(WorkflowError::DuplicateItemId(duplicate.id));
        }

        Ok(Self {
            items,
            selected_items: Vec::new(),
        })
    }

    /// Returns `true` if an item with `id` is part of the collection.
    #[must_use]
    pub fn contains_item(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Returns `true` if an item with `id` is currently selected.
    #[must_use]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected_items.iter().any(|item| item.id == id)
    }

    /// Returns `true` if every selected id is present in `items`.
    #[must_use]
    pub fn selection_is_subset(&self) -> bool {
        self.selected_items
            .iter()
            .all(|selected| self.contains_item(selected.id))
    }
}

/// Appends the collection entry with `item.id` to the selection.
///
/// The stored record is the one from `items`, not the event payload. An id that is
/// already selected or absent from the collection leaves the context unchanged.
#[must_use]
pub fn add_item_to_selection(ctx: &WorkflowContext, item: &Item) -> WorkflowContext {
    let mut next = ctx.clone();
    if !ctx.is_selected(item.id) {
        if let Some(entry) = ctx.items.iter().find(|entry| entry.same_id(item)) {
            next.selected_items.push(entry.clone());
        }
    }
    next
}

/// Selects every item in the collection.
#[must_use]
pub fn add_all_items_to_selection(ctx: &WorkflowContext) -> WorkflowContext {
    WorkflowContext {
        items: ctx.items.clone(),
        selected_items: ctx.items.clone(),
    }
}

/// Removes every selected entry whose id equals `item.id`.
#[must_use]
pub fn remove_item_from_selection(ctx: &WorkflowContext, item: &Item) -> WorkflowContext {
    WorkflowContext {
        items: ctx.items.clone(),
        selected_items: ctx
            .selected_items
            .iter()
            .filter(|selected| !selected.same_id(item))
            .cloned()
            .collect(),
    }
}

/// Clears the selection.
#[must_use]
pub fn reset_selection(ctx: &WorkflowContext) -> WorkflowContext {
    WorkflowContext {
        items: ctx.items.clone(),
        selected_items: Vec::new(),
    }
}

/// Drops every selected item from the collection and clears the selection.
///
/// This is the only transformation that shrinks `items`.
#[must_use]
pub fn delete_selection(ctx: &WorkflowContext) -> WorkflowContext {
    let doomed: HashSet<ItemId> = ctx.selected_items.iter().map(|item| item.id).collect();

    WorkflowContext {
        items: ctx
            .items
            .iter()
            .filter(|item| !doomed.contains(&item.id))
            .cloned()
            .collect(),
        selected_items: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> WorkflowContext {
        WorkflowContext::new(Item::demo_catalog()).unwrap()
    }

    fn item(ctx: &WorkflowContext, index: usize) -> Item {
        ctx.items[index].clone()
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let mut items = Item::demo_catalog();
        items.push(items[2].clone());

        let err = WorkflowContext::new(items).unwrap_err();
        assert!(matches!(err, WorkflowError::DuplicateItemId(ItemId(2))));
    }

    #[test]
    fn add_item_appends_in_order() {
        let ctx = context();
        let ctx = add_item_to_selection(&ctx, &item(&ctx, 3));
        let ctx = add_item_to_selection(&ctx, &item(&ctx, 1));

        let ids: Vec<u64> = ctx.selected_items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn add_item_twice_keeps_one_entry() {
        let ctx = context();
        let once = add_item_to_selection(&ctx, &item(&ctx, 0));
        let twice = add_item_to_selection(&once, &item(&ctx, 0));
        assert_eq!(once, twice);
    }

    #[test]
    fn add_item_stores_collection_entry() {
        let ctx = context();
        let mut stale = item(&ctx, 2);
        stale.title = "Old Title".to_string();

        let ctx = add_item_to_selection(&ctx, &stale);
        assert_eq!(ctx.selected_items, vec![item(&ctx, 2)]);
    }

    #[test]
    fn add_unknown_item_is_ignored() {
        let ctx = context();
        let stranger = Item::new(42, "Ghost", "Nobody", chrono::Utc::now());
        assert_eq!(add_item_to_selection(&ctx, &stranger), ctx);
    }

    #[test]
    fn add_all_selects_every_item() {
        let ctx = context();
        let ctx = add_all_items_to_selection(&ctx);
        assert_eq!(ctx.selected_items, ctx.items);
    }

    #[test]
    fn remove_matches_by_id_not_by_value() {
        let ctx = context();
        let ctx = add_item_to_selection(&ctx, &item(&ctx, 2));

        let mut renamed = item(&ctx, 2);
        renamed.title = "Something Else".to_string();

        let ctx = remove_item_from_selection(&ctx, &renamed);
        assert!(ctx.selected_items.is_empty());
    }

    #[test]
    fn reset_clears_selection_and_keeps_items() {
        let ctx = context();
        let ctx = reset_selection(&add_all_items_to_selection(&ctx));
        assert!(ctx.selected_items.is_empty());
        assert_eq!(ctx.items.len(), 6);
    }

    #[test]
    fn delete_selection_removes_selected_items_only() {
        let ctx = context();
        let ctx = add_item_to_selection(&ctx, &item(&ctx, 0));
        let ctx = add_item_to_selection(&ctx, &item(&ctx, 4));

        let ctx = delete_selection(&ctx);

        let ids: Vec<u64> = ctx.items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 5]);
        assert!(ctx.selected_items.is_empty());
        assert!(ctx.selection_is_subset());
    }

    #[test]
    fn transformations_leave_input_untouched() {
        let ctx = add_all_items_to_selection(&context());
        let before = ctx.clone();
        let _ = delete_selection(&ctx);
        let _ = reset_selection(&ctx);
        assert_eq!(ctx, before);
    }
}
