//! Pagination descriptor computation.
//!
//! A list response optionally carries `count`, `limit`, and `skip` at the top
//! level; when all three are present and `limit > 0` they turn into a
//! navigable page descriptor. The computation is a pure function of those
//! three numbers.

use serde::Serialize;
use serde_json::Value;

/// Page-navigation metadata derived from a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Total number of records on the backend.
    pub count: i64,
    /// Page size the response was produced with.
    pub limit: i64,
    /// Number of records skipped before this page.
    pub skip: i64,
    /// Page numbers `1..=pages_count`, in order.
    pub pages_array: Vec<i64>,
    /// Total number of pages.
    pub pages_count: i64,
    /// The page this response represents (1-based).
    pub current_page: i64,
    /// Number of records on the current page; smaller than `limit` only on
    /// the last page of an unevenly divisible count.
    pub current_page_items_count: i64,
}

impl Pagination {
    /// Compute a descriptor from raw counters.
    ///
    /// Returns `None` when `limit <= 0`.
    #[must_use]
    pub fn compute(count: i64, limit: i64, skip: i64) -> Option<Self> {
        if limit <= 0 {
            return None;
        }

        // Exact when evenly divisible, rounded up otherwise.
        let mut pages_count = count / limit;
        if count % limit != 0 {
            pages_count += 1;
        }
        let pages_array: Vec<i64> = (1..=pages_count).collect();

        let current_page = skip / limit + 1;
        let mut current_page_items_count = limit;
        if skip + 1 + limit > count {
            current_page_items_count = count - (current_page - 1) * limit;
        }

        Some(Self {
            count,
            limit,
            skip,
            pages_array,
            pages_count,
            current_page,
            current_page_items_count,
        })
    }

    /// Extract a descriptor from a response body.
    ///
    /// Returns `None` unless the body is an object carrying integral `count`,
    /// `limit`, and `skip` with `limit > 0`.
    #[must_use]
    pub fn from_body(body: &Value) -> Option<Self> {
        let count = body.get("count")?.as_i64()?;
        let limit = body.get("limit")?.as_i64()?;
        let skip = body.get("skip")?.as_i64()?;
        Self::compute(count, limit, skip)
    }

    /// The `_skip` value for the following page.
    #[must_use]
    pub const fn next_skip(&self) -> i64 {
        self.skip + self.limit
    }

    /// The `_skip` value for the preceding page.
    #[must_use]
    pub const fn previous_skip(&self) -> i64 {
        self.skip - self.limit
    }

    /// The `_skip` value for an absolute page number (1-based).
    #[must_use]
    pub const fn page_skip(&self, page: i64) -> i64 {
        page * self.limit - self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_middle_page() {
        let p = Pagination::compute(25, 10, 10).unwrap();
        assert_eq!(p.pages_count, 3);
        assert_eq!(p.pages_array, vec![1, 2, 3]);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.current_page_items_count, 10);
    }

    #[test]
    fn test_last_page_partial() {
        let p = Pagination::compute(25, 10, 20).unwrap();
        assert_eq!(p.current_page, 3);
        assert_eq!(p.current_page_items_count, 5);
    }

    #[test]
    fn test_evenly_divisible_count() {
        let p = Pagination::compute(30, 10, 0).unwrap();
        assert_eq!(p.pages_count, 3);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.current_page_items_count, 10);

        let last = Pagination::compute(30, 10, 20).unwrap();
        assert_eq!(last.current_page, 3);
        assert_eq!(last.current_page_items_count, 10);
    }

    #[test]
    fn test_single_short_page() {
        let p = Pagination::compute(3, 10, 0).unwrap();
        assert_eq!(p.pages_count, 1);
        assert_eq!(p.pages_array, vec![1]);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.current_page_items_count, 3);
    }

    #[test]
    fn test_zero_or_negative_limit_yields_none() {
        assert!(Pagination::compute(25, 0, 0).is_none());
        assert!(Pagination::compute(25, -5, 0).is_none());
    }

    #[test]
    fn test_from_body_requires_all_three_counters() {
        assert!(Pagination::from_body(&json!({"count": 25, "limit": 10, "skip": 0})).is_some());
        assert!(Pagination::from_body(&json!({"count": 25, "limit": 10})).is_none());
        assert!(Pagination::from_body(&json!({"limit": 10, "skip": 0})).is_none());
        assert!(Pagination::from_body(&json!({"count": 25, "skip": 0})).is_none());
        assert!(Pagination::from_body(&json!([1, 2, 3])).is_none());
    }

    #[test]
    fn test_from_body_rejects_non_integral_counters() {
        assert!(Pagination::from_body(&json!({"count": "25", "limit": 10, "skip": 0})).is_none());
        assert!(Pagination::from_body(&json!({"count": 25.5, "limit": 10, "skip": 0})).is_none());
    }

    #[test]
    fn test_navigation_arithmetic() {
        let p = Pagination::compute(100, 10, 30).unwrap();
        assert_eq!(p.next_skip(), 40);
        assert_eq!(p.previous_skip(), 20);
        assert_eq!(p.page_skip(1), 0);
        assert_eq!(p.page_skip(7), 60);
    }
}
