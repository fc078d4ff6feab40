//! Paging information for query results.

use serde::Deserialize;
use serde::Serialize;

/// Which page of results to return, and how large pages are.
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::PagingInfo;
///
/// let page = PagingInfo::new(50, 3).with_total_record_count();
/// assert_eq!(page.count, 50);
/// assert_eq!(page.page_number, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    /// Records per page.
    pub count: u32,
    /// 1-based page number.
    pub page_number: u32,
    /// Paging cookie returned with the previous page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging_cookie: Option<String>,
    /// Ask the service to return the total matching record count.
    #[serde(default)]
    pub return_total_record_count: bool,
}

impl PagingInfo {
    /// Creates paging info for `page_number` (1-based) with `count` records per page.
    pub fn new(count: u32, page_number: u32) -> Self {
        Self {
            count,
            page_number,
            paging_cookie: None,
            return_total_record_count: false,
        }
    }

    /// Sets the paging cookie from the previous page.
    pub fn with_paging_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.paging_cookie = Some(cookie.into());
        self
    }

    /// Requests the total record count.
    pub fn with_total_record_count(mut self) -> Self {
        self.return_total_record_count = true;
        self
    }

    /// Returns paging info for the page after this one.
    ///
    /// The cookie is cleared; pass the one returned by the service with
    /// [`with_paging_cookie`](Self::with_paging_cookie).
    pub fn next_page(&self) -> Self {
        Self {
            count: self.count,
            page_number: self.page_number.saturating_add(1),
            paging_cookie: None,
            return_total_record_count: self.return_total_record_count,
        }
    }
}
