//! Pagination types
//!
//! A page as returned by an offset/limit endpoint, and the accumulated result
//! of walking all of them.

use crate::error::{Error, Result};

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Total record count reported by the upstream
    pub total_records: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, total_records: u64) -> Self {
        Self {
            items,
            total_records,
        }
    }
}

/// Records gathered across pages, plus the failure that ended the walk early.
///
/// A page failure does not discard what was already fetched; callers decide
/// whether a partial result is acceptable.
#[derive(Debug)]
pub struct PagedResult<T> {
    /// Records from every page fetched successfully
    pub items: Vec<T>,
    /// Error from the page that stopped pagination, if any
    pub error: Option<Error>,
    /// Number of pages fetched successfully
    pub pages: u32,
    /// Pagination hit the page ceiling before the upstream ran out
    pub truncated: bool,
}

impl<T> PagedResult<T> {
    /// True when every page was fetched
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && !self.truncated
    }

    /// Convert into a plain result, failing if any page failed
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            error: None,
            pages: 0,
            truncated: false,
        }
    }
}
