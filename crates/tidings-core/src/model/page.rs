use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Offset/limit window over a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub offset: u64,
    /// `None` returns every remaining record.
    pub limit: Option<u64>,
}

impl Pagination {
    /// Every record.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            offset: 0,
            limit: None,
        }
    }

    /// ## Summary
    /// Builds a window from 1-based page numbering.
    ///
    /// Missing values use the first page and the default size; the size is
    /// capped at the maximum page size.
    #[must_use]
    pub fn from_page(page: Option<u32>, per_page: Option<u32>) -> Self {
        let per_page = per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = page.unwrap_or(1).max(1);
        Self {
            offset: u64::from(page - 1) * u64::from(per_page),
            limit: Some(u64::from(per_page)),
        }
    }

    /// Applies the window to an in-memory slice.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset)
            .unwrap_or(usize::MAX)
            .min(items.len());
        let end = match self.limit {
            Some(limit) => start
                .saturating_add(usize::try_from(limit).unwrap_or(usize::MAX))
                .min(items.len()),
            None => items.len(),
        };
        &items[start..end]
    }
}

/// One page of a list plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
