//! List-query pipeline shared by every listing operation.
//!
//! Rows go through `filter -> sort -> count -> paginate -> project`. The
//! total is always taken after filtering and before pagination.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use rbac_shared::constants::SORT_DESCENDING;

/// One-based page request. Pagination applies only when both values are
/// present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_no: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    pub fn new(page_no: Option<u32>, page_size: Option<u32>) -> Self {
        Self { page_no, page_size }
    }

    /// `(skip, take)` or `None` when the full set is requested.
    pub fn bounds(&self) -> Option<(usize, usize)> {
        match (self.page_no, self.page_size) {
            (Some(page_no), Some(page_size)) => {
                let page_no = page_no.max(1) as usize;
                let page_size = page_size as usize;
                Some(((page_no - 1) * page_size, page_size))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `"DESC"` in any case is descending, everything else ascending.
    pub fn parse(order: Option<&str>) -> Self {
        match order {
            Some(o) if o.trim().eq_ignore_ascii_case(SORT_DESCENDING) => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// A sortable column of some listing.
pub trait SortKey: Copy {
    /// Parses a lower-cased column name such as `"firstname"`.
    fn parse(raw: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<K> {
    pub key: K,
    pub direction: SortDirection,
    /// Whether the caller supplied a sort column or order at all.
    pub explicit: bool,
}

impl<K: SortKey> SortSpec<K> {
    /// Unknown or missing columns fall back to `default_key`.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>, default_key: K) -> Self {
        let sort_by = sort_by.map(str::trim).filter(|s| !s.is_empty());
        let sort_order = sort_order.map(str::trim).filter(|s| !s.is_empty());
        let key = sort_by
            .and_then(|s| K::parse(&s.to_lowercase()))
            .unwrap_or(default_key);
        Self {
            key,
            direction: SortDirection::parse(sort_order),
            explicit: sort_by.is_some() || sort_order.is_some(),
        }
    }
}

/// Case-insensitive ordering for text columns.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Treats empty and whitespace-only filter values as absent.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// One page of results plus the size of the filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total_records: usize,
}

impl<T> Paged<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_records: self.total_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ListQuery<T> {
    rows: Vec<T>,
}

impl<T> ListQuery<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn filter<F: FnMut(&T) -> bool>(mut self, predicate: F) -> Self {
        self.rows.retain(predicate);
        self
    }

    /// Applies `predicate` only when a filter value is present.
    pub fn filter_when<V, F>(self, value: Option<V>, mut predicate: F) -> Self
    where
        F: FnMut(&T, &V) -> bool,
    {
        match value {
            Some(v) => self.filter(|row| predicate(row, &v)),
            None => self,
        }
    }

    /// Stable sort.
    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(mut self, compare: F) -> Self {
        self.rows.sort_by(compare);
        self
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn paginate(self, page: &PageRequest) -> Paged<T> {
        let total_records = self.rows.len();
        let items = match page.bounds() {
            Some((skip, take)) => self.rows.into_iter().skip(skip).take(take).collect(),
            None => self.rows,
        };
        Paged { items, total_records }
    }
}
