//! Listing bounds shared by the repository and API layers.

/// Default number of rows returned by list endpoints.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Maximum number of rows returned by list endpoints.
pub const MAX_LIST_LIMIT: i64 = 200;

/// A clamped limit/offset pair for list queries.
///
/// Callers hand over raw query-string values; the constructor pins the limit
/// to `1..=MAX_LIST_LIMIT` and the offset to non-negative, so SQL never sees
/// a hostile bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT),
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}
