//! Pagination defaults shared by list endpoints.
//!
//! List parameters are validated before they reach these helpers, so
//! out-of-range values never get this far.

/// Default page size for flashcard listings.
pub const DEFAULT_LIMIT: i64 = 20;
/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Resolve an optional page size, falling back to [`DEFAULT_LIMIT`].
pub fn limit_or_default(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT)
}

/// Resolve an optional offset, falling back to zero.
pub fn offset_or_default(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0)
}
