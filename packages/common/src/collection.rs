//! In-memory filter/sort/paginate pipeline over seasoning list items.
//!
//! Every operation consumes the collection and returns a new one, so a
//! collection value is never observed half-filtered.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::expiry::ExpiryStatus;
use crate::pagination::calculate_offset;
use crate::query::{ListSeasoningsQuery, SortOrder};

/// Read-only projection of a seasoning used for listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeasoningListItem {
    pub id: i32,
    pub name: String,
    pub type_id: i32,
    pub image_id: Option<i32>,
    pub best_before_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub purchased_at: Option<DateTime<Utc>>,
    /// Present exactly when an effective expiry date exists.
    pub days_until_expiry: Option<i64>,
    pub expiry_status: ExpiryStatus,
}

/// One page sliced out of a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<SeasoningListItem>,
    /// Size of the collection before slicing.
    pub total_items: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeasoningCollection {
    items: Vec<SeasoningListItem>,
}

impl SeasoningCollection {
    pub fn from_items(items: impl IntoIterator<Item = SeasoningListItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn as_slice(&self) -> &[SeasoningListItem] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<SeasoningListItem> {
        self.items.clone()
    }

    pub fn into_vec(self) -> Vec<SeasoningListItem> {
        self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filter_by_type(self, type_id: i32) -> Self {
        self.retain(|item| item.type_id == type_id)
    }

    /// Case-insensitive substring match on the name (Unicode lowercase).
    pub fn search_by_name(self, term: &str) -> Self {
        let needle = term.to_lowercase();
        self.retain(|item| item.name.to_lowercase().contains(&needle))
    }

    /// Keep items whose day count is known and at most `max_days`.
    pub fn filter_by_expiry_days(self, max_days: i64) -> Self {
        self.retain(|item| item.days_until_expiry.is_some_and(|days| days <= max_days))
    }

    /// Stable sort. Items without a day count always go last for the
    /// expiry orders, whichever the direction.
    pub fn sort_by(self, order: SortOrder) -> Self {
        let mut items = self.items;
        match order {
            SortOrder::ExpiryAsc => items.sort_by(|a, b| {
                compare_expiry(a.days_until_expiry, b.days_until_expiry, false)
            }),
            SortOrder::ExpiryDesc => items.sort_by(|a, b| {
                compare_expiry(a.days_until_expiry, b.days_until_expiry, true)
            }),
            SortOrder::NameAsc => items.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::NameDesc => items.sort_by(|a, b| b.name.cmp(&a.name)),
        }
        Self { items }
    }

    /// Type filter, then name search, then expiry window, then sort.
    /// Pagination is left to the caller.
    pub fn apply_query(self, query: &ListSeasoningsQuery) -> Self {
        let mut collection = self;
        if let Some(type_id) = query.type_id {
            collection = collection.filter_by_type(type_id);
        }
        if let Some(ref search) = query.search {
            collection = collection.search_by_name(search);
        }
        if let Some(days) = query.expires_within_days {
            collection = collection.filter_by_expiry_days(days);
        }
        if let Some(order) = query.sort {
            collection = collection.sort_by(order);
        }
        collection
    }

    /// Slice out `page` (1-based). Pages past the end are empty.
    pub fn paginate(self, page: u64, page_size: u64) -> Page {
        let total_items = self.items.len() as u64;
        let offset = usize::try_from(calculate_offset(page, page_size)).unwrap_or(usize::MAX);
        let take = usize::try_from(page_size).unwrap_or(usize::MAX);
        Page {
            items: self.items.into_iter().skip(offset).take(take).collect(),
            total_items,
        }
    }

    fn retain(self, keep: impl Fn(&SeasoningListItem) -> bool) -> Self {
        Self {
            items: self.items.into_iter().filter(|item| keep(item)).collect(),
        }
    }
}

impl FromIterator<SeasoningListItem> for SeasoningCollection {
    fn from_iter<I: IntoIterator<Item = SeasoningListItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

fn compare_expiry(a: Option<i64>, b: Option<i64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
