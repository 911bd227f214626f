//! Cart Data

/// Page size used when the requested limit is missing or not positive.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub sku: String,
    pub product_name: String,
    pub quantity: i64,
}

/// A window over the carts table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Build a page, replacing a non-positive limit with [`DEFAULT_PAGE_LIMIT`]
    /// and a negative offset with zero.
    #[must_use]
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: if limit <= 0 { DEFAULT_PAGE_LIMIT } else { limit },
            offset: offset.max(0),
        }
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}
