//! Pagination Types
//!
//! Shared page/limit handling for all list endpoints. Malformed inputs are
//! clamped to usable values rather than rejected.

use serde::{Deserialize, Serialize};

/// Hard ceiling on page size
pub const MAX_PAGE_LIMIT: i64 = 100;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Raw page/limit query parameters as sent by the client
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Clamp and default the raw parameters
    pub fn resolve(self) -> ResolvedPage {
        let page = self.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        ResolvedPage { page, limit }
    }
}

/// Validated page selection ready for query construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPage {
    pub page: i64,
    pub limit: i64,
}

impl ResolvedPage {
    pub fn offset(&self) -> i64 {
        // page is floored at 1 but has no upper bound; saturate instead of
        // overflowing on absurd page numbers.
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Build the response metadata for a given total row count
    pub fn pagination(&self, total: i64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            pages: (total + self.limit - 1) / self.limit,
        }
    }
}

/// Pagination metadata returned alongside every list page
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}
