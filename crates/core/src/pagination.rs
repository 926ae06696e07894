//! Page-based pagination parameters and math.
//!
//! List endpoints accept `?page=&limit=` query parameters. Validation lives
//! here so every handler rejects malformed values the same way.

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size for list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validated pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: i64,
    /// Items per page, between 1 and [`MAX_PAGE_SIZE`].
    pub limit: i64,
}

impl PageRequest {
    /// Validate raw `page`/`limit` query values.
    ///
    /// Missing values default to page 1 and [`DEFAULT_PAGE_SIZE`]. Out-of-range
    /// values are rejected rather than silently clamped, matching the API
    /// contract (malformed pagination is a validation error).
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err("Invalid page parameter. Page must be a positive integer.".to_string());
        }

        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&limit) {
            return Err(format!(
                "Invalid limit parameter. Limit must be between 1 and {MAX_PAGE_SIZE}."
            ));
        }

        // The offset must stay representable; a page number large enough to
        // overflow i64 is malformed input, not a server fault.
        if (page - 1).checked_mul(limit).is_none() {
            return Err("Invalid page parameter. Page is out of range.".to_string());
        }

        Ok(Self { page, limit })
    }

    /// Row offset for SQL `OFFSET`. In range for any validated request.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Number of pages needed to hold `total` items at `limit` per page.
///
/// Zero items means zero pages.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}
