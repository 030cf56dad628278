//! Page slicing over an ordered listing.
//!
//! Page numbers are 1-indexed. A page past the end of the data is not
//! clamped: it yields an empty slice that still points back to the
//! previous page.

use crate::error::{CoreError, Result};
use serde::Serialize;

pub const DEFAULT_PER_PAGE: usize = 10;

/// A validated request for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    /// Creates a page request. Both `page` and `per_page` must be at least 1.
    pub fn new(page: usize, per_page: usize) -> Result<Self> {
        if page == 0 {
            return Err(CoreError::InvalidPageRequest(
                "page must be greater than 0".to_string(),
            ));
        }
        if per_page == 0 {
            return Err(CoreError::InvalidPageRequest(
                "per_page must be greater than 0".to_string(),
            ));
        }
        Ok(Self { page, per_page })
    }

    /// Requests `page` with the default page size.
    pub fn page(page: usize) -> Result<Self> {
        Self::new(page, DEFAULT_PER_PAGE)
    }

    pub fn number(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Index of the first item on this page.
    pub fn start(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Index one past the last item on this page.
    pub fn end(&self) -> usize {
        self.start().saturating_add(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of an ordered listing together with its navigation cursors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

/// Slices `items` down to the page described by `request`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = request.start();
    let end = request.end();

    let has_prev = start > 0;
    let has_next = end < total;

    let items = items
        .into_iter()
        .skip(start)
        .take(request.per_page())
        .collect();

    Page {
        items,
        page: request.number(),
        per_page: request.per_page(),
        total,
        has_prev,
        has_next,
        prev_page: has_prev.then(|| request.number() - 1),
        next_page: has_next.then(|| request.number() + 1),
    }
}
