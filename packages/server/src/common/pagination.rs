//! Offset pagination for history listings.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw `limit`/`offset` as received from a query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Validated page window, safe to bind into `LIMIT $n OFFSET $m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl PageArgs {
    /// Clamp to `1..=MAX_PAGE_SIZE` and a non-negative offset.
    pub fn validate(self) -> Page {
        Page {
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        PageArgs::default().validate()
    }
}
