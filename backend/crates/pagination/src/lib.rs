//! Page-number pagination primitives.
//!
//! Endpoints that return collections accept a 1-based `page` query parameter
//! and answer with a [`Page`] envelope carrying the items for that page plus
//! enough metadata for clients to iterate. Requests beyond the last page are
//! valid and yield an empty page rather than an error.

use thiserror::Error;

/// Default number of items per page when a caller does not choose one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound on the page size accepted from callers.
pub const MAX_PER_PAGE: u32 = 100;

/// Errors returned when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page numbers are 1-based; zero is rejected.
    #[error("page numbers start at 1")]
    ZeroPage,
    /// Page size outside the accepted range.
    #[error("page size must be between 1 and {max}")]
    PerPageOutOfRange {
        /// Largest accepted page size.
        max: u32,
    },
}

/// A validated request for one page of a collection.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= per_page <= MAX_PER_PAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    pub fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PageRequestError::PerPageOutOfRange { max: MAX_PER_PAGE });
        }
        Ok(Self { page, per_page })
    }

    /// The first page with the default page size.
    pub fn first() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items to skip when slicing an ordered collection.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    /// Maximum number of items the page may hold.
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of an ordered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    page: u32,
    per_page: u32,
    total: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the items selected for `request` and the total
    /// number of items in the underlying collection.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
        }
    }

    /// Items on this page, in collection order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// 1-based page number this envelope answers for.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size the envelope was built with.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Total number of items across all pages.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages needed to cover `total` items.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page))
    }

    /// Transform every item on the page, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }

    /// Consume the envelope, returning the items and metadata separately.
    pub fn into_parts(self) -> (Vec<T>, u32, u32, u64) {
        (self.items, self.page, self.per_page, self.total)
    }
}
