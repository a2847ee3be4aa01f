//! Skip/offset pagination arithmetic.
//!
//! Pages are 1-indexed. `total_pages` is always derived from the latest
//! `total_count`; it is never stored.

/// Page size plus the helpers that turn page numbers into offsets and
/// keep page numbers in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
}

impl Pagination {
    /// Creates a paginator. A zero `limit` is raised to 1.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            limit: if limit == 0 { 1 } else { limit },
        }
    }

    /// Items per page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// `ceil(total_count / limit)`. Zero when there are no results.
    #[must_use]
    pub fn total_pages(&self, total_count: u64) -> u32 {
        let pages = total_count.div_ceil(u64::from(self.limit));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Highest reachable page. At least 1, even for an empty result.
    #[must_use]
    pub fn last_page(&self, total_count: u64) -> u32 {
        self.total_pages(total_count).max(1)
    }

    /// Clamps `page` to `[1, last_page]`.
    #[must_use]
    pub fn clamp(&self, page: u32, total_count: u64) -> u32 {
        page.clamp(1, self.last_page(total_count))
    }

    /// Record offset of the first item on `page`.
    #[must_use]
    pub fn skip_for(&self, page: u32) -> u32 {
        page.max(1).saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether a "Previous" step is possible from `page`.
    #[must_use]
    pub const fn has_previous(&self, page: u32) -> bool {
        page > 1
    }

    /// Whether a "Next" step is possible from `page`.
    #[must_use]
    pub fn has_next(&self, page: u32, total_count: u64) -> bool {
        page < self.last_page(total_count)
    }

    /// The page before `page`, or `None` at the first page.
    #[must_use]
    pub fn previous(&self, page: u32) -> Option<u32> {
        self.has_previous(page).then(|| page.saturating_sub(1))
    }

    /// The page after `page`, or `None` at the last page.
    #[must_use]
    pub fn next(&self, page: u32, total_count: u64) -> Option<u32> {
        self.has_next(page, total_count)
            .then(|| page.saturating_add(1))
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}
