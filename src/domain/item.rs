//! Item domain model.
//!
//! An [`Item`] is the deletable unit the workflow operates on. Items are created
//! externally (seed data), never mutated in place, and removed only by a
//! successful delete.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, unique identifier of an [`Item`].
///
/// Selection membership and deletion are decided by id equality, never by
/// comparing whole items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A deletable unit shown in the list.
///
/// # Fields
///
/// - `id`: Unique identifier within the collection
/// - `title`: Display title
/// - `owner`: Display name of the owner
/// - `updated_at`: Last modification time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub owner: String,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new item.
    ///
    /// # Examples
    ///
    /// ```
    /// use pruneflow::domain::{Item, ItemId};
    ///
    /// let item = Item::new(7, "Tide Pools", "Ana Ruiz", chrono::Utc::now());
    /// assert_eq!(item.id, ItemId(7));
    /// ```
    #[must_use]
    pub fn new(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        owner: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            owner: owner.into(),
            updated_at,
        }
    }

    /// Returns `true` if both items carry the same id.
    #[must_use]
    pub fn same_id(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Returns the built-in demonstration catalog.
    ///
    /// Six shared folders with fixed 2017 modification dates, used when no seed
    /// file is configured.
    #[must_use]
    pub fn demo_catalog() -> Vec<Self> {
        let date = |month: u32, day: u32| {
            Utc.with_ymd_and_hms(2017, month, day, 0, 0, 0)
                .single()
                .unwrap_or_default()
        };

        vec![
            Self::new(0, "Summer Photos", "Anthony Stevens", date(7, 12)),
            Self::new(1, "Surfing", "Scott Masterson", date(7, 16)),
            Self::new(2, "Beach Concerts", "Jonathan Lee", date(2, 16)),
            Self::new(3, "Sandcastles", "Aaron Bennett", date(6, 5)),
            Self::new(4, "Boardwalk", "Mary Johnson", date(6, 1)),
            Self::new(5, "Beach Picnics", "Janet Perkins", date(5, 7)),
        ]
    }

    /// Formats `updated_at` the way the list displays it, e.g. `Wed Jul 12 2017`.
    #[must_use]
    pub fn updated_label(&self) -> String {
        self.updated_at.format("%a %b %d %Y").to_string()
    }
}
