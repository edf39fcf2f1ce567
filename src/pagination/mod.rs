//! Pagination module
//!
//! Offset/limit pagination for usage-report style endpoints.
//!
//! # Overview
//!
//! The paginator repeatedly calls a page-fetching closure with increasing
//! offsets and accumulates the records. A failing page does not fail the
//! whole walk: the records gathered so far are returned together with the
//! error in a [`PagedResult`].

mod paginator;
mod types;

pub use paginator::Paginator;
pub use types::{Page, PagedResult};
