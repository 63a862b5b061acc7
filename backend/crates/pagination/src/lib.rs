//! Shared pagination primitives for paged listing endpoints.
//!
//! Listing endpoints accept one-based `page` and `limit` query parameters and
//! respond with an envelope that carries the page of items alongside
//! collection totals. This crate centralises the validation and arithmetic so
//! every endpoint reports identical envelope semantics.
//!
//! # Overview
//!
//! - [`PageRequest`] validates a `page`/`limit` pair and derives the row
//!   offset for the backing store.
//! - [`Paged`] wraps one page of results with total-item, total-page, and
//!   current-page bookkeeping.
//!
//! # Example
//!
//! ```
//! use pagination::{PageRequest, Paged};
//!
//! let request = PageRequest::new(2, 5).expect("valid page request");
//! assert_eq!(request.offset(), 5);
//!
//! let paged = Paged::new(vec!["f", "g"], 11, request);
//! assert_eq!(paged.total_pages, 3);
//! assert_eq!(paged.current_page, 2);
//! ```

use serde::Serialize;
use thiserror::Error;

/// Validation failures for [`PageRequest::new`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PageRequestError {
    /// The requested page number was zero; pages are one-based.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The requested page size was zero.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// A validated one-based page selection.
///
/// Both `page` and `limit` are guaranteed to be at least 1, so offset and
/// page-count arithmetic never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validates a `page`/`limit` pair.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] or
    /// [`PageRequestError::ZeroLimit`] when the corresponding value is zero.
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(self) -> u32 {
        self.limit
    }

    /// Number of rows to skip before this page begins.
    ///
    /// Widened to `u64` so the multiplication cannot overflow for any valid
    /// `page`/`limit` pair.
    #[must_use]
    pub fn offset(self) -> u64 {
        (u64::from(self.page) - 1) * u64::from(self.limit)
    }
}

/// One page of results together with collection totals.
///
/// Serialises with camelCase keys so HTTP handlers can embed it directly in
/// response bodies or remap the `items` field into an endpoint-specific key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// The items on this page, at most [`PageRequest::limit`] of them.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total_items: u64,
    /// Total page count at the requested limit; zero when nothing matched.
    pub total_pages: u64,
    /// One-based number of the page this envelope holds.
    pub current_page: u32,
}

impl<T> Paged<T> {
    /// Wraps one page of `items` with totals derived from `total_items` and
    /// the originating request.
    ///
    /// An empty collection yields zero pages rather than one empty page.
    #[must_use]
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_items,
            total_pages: total_items.div_ceil(u64::from(request.limit())),
            current_page: request.page(),
        }
    }

    /// Maps the page items while preserving the totals, typically to convert
    /// domain records into response DTOs.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            total_pages: self.total_pages,
            current_page: self.current_page,
        }
    }
}
