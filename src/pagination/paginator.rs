//! Offset/limit paginator

use super::types::{Page, PagedResult};
use crate::error::Result;
use std::future::Future;
use tracing::{debug, warn};

/// Walks an offset/limit endpoint until it runs out of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: u32,
    max_pages: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(100, 10_000)
    }
}

impl Paginator {
    /// Create a paginator (zero values become one)
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    /// Records requested per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch pages with `fetch_page(offset, limit)` starting at offset zero.
    ///
    /// Stops when a page is short, when the next offset reaches the reported
    /// total, or when `max_pages` pages have been fetched. Reaching the total
    /// (`offset >= total_records`) is enough to stop, so a total that is an
    /// exact multiple of the page size costs no trailing empty request: 200
    /// records at 100 per page take two calls, where a strict `>` would take
    /// three. A failing page ends the walk; its error is returned alongside
    /// the records gathered so far.
    pub async fn paginate<T, F, Fut>(&self, mut fetch_page: F) -> PagedResult<T>
    where
        F: FnMut(u64, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>>>,
    {
        let limit = self.page_size;
        let mut result = PagedResult::default();
        let mut offset: u64 = 0;

        loop {
            if result.pages >= self.max_pages {
                warn!(
                    pages = result.pages,
                    offset, "Page ceiling reached, stopping pagination"
                );
                result.truncated = true;
                break;
            }

            let page = match fetch_page(offset, limit).await {
                Ok(page) => page,
                Err(err) => {
                    warn!(
                        offset,
                        fetched = result.items.len(),
                        error = %err,
                        "Page fetch failed, returning partial result"
                    );
                    result.error = Some(err);
                    break;
                }
            };

            result.pages += 1;
            let count = page.items.len();
            result.items.extend(page.items);
            debug!(offset, count, total = page.total_records, "Fetched page");

            if count < limit as usize {
                break;
            }
            offset += u64::from(limit);
            if offset >= page.total_records {
                break;
            }
        }

        result
    }
}
