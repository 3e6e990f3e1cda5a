//! # Offset Pagination
//!
//! Pure helpers converting (page, limit) query parameters into an offset
//! window, and the uniform paginated envelope returned by every list
//! endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback page size when the caller does not send `limit`.
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Hard ceiling for the caller-supplied `limit`.
pub const MAX_PAGE_SIZE: u64 = 100;

/// A normalized pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Normalizes raw (page, limit) query values into a [`PageWindow`].
///
/// `page` is floored at 1 and `limit` is clamped into `1..=max_limit`,
/// falling back to `default_limit` when absent.
pub fn paginate(
    page: Option<u64>,
    limit: Option<u64>,
    default_limit: u64,
    max_limit: u64,
) -> PageWindow {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, max_limit);
    PageWindow {
        page,
        limit,
        offset: (page - 1) * limit,
    }
}

/// Pagination metadata for a list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct PageMeta {
    /// Count of all rows matching the filter, before pagination
    pub total: u64,
    /// Requested page (1-based)
    pub page: u64,
    /// Page size actually applied
    pub limit: u64,
    /// Last reachable page; never less than 1
    pub last_page: u64,
}

/// Paginated response envelope: result rows plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paginated<T> {
    /// Assembles the envelope from one page of rows and the unpaginated total.
    pub fn new(data: Vec<T>, window: &PageWindow, total: u64) -> Self {
        Self {
            data,
            meta: PageMeta {
                total,
                page: window.page,
                limit: window.limit,
                last_page: total.div_ceil(window.limit).max(1),
            },
        }
    }

    /// Maps the rows while keeping the metadata, for model-to-DTO conversion.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_parameters_are_absent() {
        let window = paginate(None, None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn page_is_floored_at_one() {
        let window = paginate(Some(0), Some(10), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(window.page, 1);
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn limit_is_clamped_to_max() {
        let window = paginate(Some(1), Some(10_000), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(window.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn limit_zero_is_raised_to_one() {
        let window = paginate(Some(3), Some(0), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(window.limit, 1);
        assert_eq!(window.offset, 2);
    }

    #[test]
    fn offset_is_derived_from_page_and_limit() {
        let window = paginate(Some(3), Some(5), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        assert_eq!(window.offset, 10);
    }

    #[test]
    fn last_page_is_the_ceiling_of_total_over_limit() {
        let window = paginate(Some(1), Some(5), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let envelope = Paginated::new(vec![(); 5], &window, 12);
        assert_eq!(envelope.meta.total, 12);
        assert_eq!(envelope.meta.last_page, 3);
    }

    #[test]
    fn last_page_is_never_below_one() {
        let window = paginate(Some(1), Some(5), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let envelope = Paginated::new(Vec::<()>::new(), &window, 0);
        assert_eq!(envelope.meta.total, 0);
        assert_eq!(envelope.meta.last_page, 1);
    }

    #[test]
    fn exact_division_has_no_extra_page() {
        let window = paginate(Some(1), Some(5), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let envelope = Paginated::new(vec![(); 5], &window, 10);
        assert_eq!(envelope.meta.last_page, 2);
    }

    #[test]
    fn map_preserves_metadata() {
        let window = paginate(Some(2), Some(2), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
        let envelope = Paginated::new(vec![1, 2], &window, 7).map(|n| n * 10);
        assert_eq!(envelope.data, vec![10, 20]);
        assert_eq!(envelope.meta.page, 2);
        assert_eq!(envelope.meta.last_page, 4);
    }
}
