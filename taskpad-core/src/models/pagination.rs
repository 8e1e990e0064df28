//! Pagination types

use serde::Deserialize;

/// Default page size when the client does not supply `limit`.
const DEFAULT_LIMIT: i64 = 100;

/// Hard cap on page size.
const MAX_LIMIT: i64 = 500;

/// Validated limit/offset window for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Create a page window with validation.
    ///
    /// - Limit is clamped to 1..=500
    /// - Offset is clamped to a minimum of 0
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Get the SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Get the SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Query parameters for list endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ListParams> for Page {
    fn from(params: ListParams) -> Self {
        Self::new(
            params.limit.unwrap_or(DEFAULT_LIMIT),
            params.offset.unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let page = Page::default();
        assert_eq!(page.limit(), 100);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn clamps_limit() {
        assert_eq!(Page::new(0, 0).limit(), 1);
        assert_eq!(Page::new(-5, 0).limit(), 1);
        assert_eq!(Page::new(9999, 0).limit(), MAX_LIMIT);
    }

    #[test]
    fn clamps_offset() {
        assert_eq!(Page::new(10, -3).offset(), 0);
        assert_eq!(Page::new(10, 25).offset(), 25);
    }

    #[test]
    fn params_fill_in_defaults() {
        let page = Page::from(ListParams {
            limit: None,
            offset: Some(40),
        });
        assert_eq!(page.limit(), 100);
        assert_eq!(page.offset(), 40);
    }
}
