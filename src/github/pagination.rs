//! Pagination state for GitHub list endpoints.
//!
//! GitHub paginates list responses and advertises the following page through
//! the `Link` header. [`PageInfo`] captures that position so that callers can
//! decide whether another request is worthwhile.

/// Largest page size GitHub accepts on list endpoints.
pub const MAX_PER_PAGE: u8 = 100;

/// Position of one fetched page.
///
/// # Example
///
/// ```
/// use repominer::github::pagination::PageInfo;
///
/// let info = PageInfo::builder(2, 50).has_next(true).build();
/// assert_eq!(info.current_page(), 2);
/// assert!(info.has_next());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    current_page: u32,
    per_page: u8,
    has_next: bool,
}

/// Builder for [`PageInfo`].
#[derive(Debug, Clone, Copy)]
pub struct PageInfoBuilder {
    info: PageInfo,
}

impl PageInfoBuilder {
    /// Sets whether there is a next page.
    #[must_use]
    pub const fn has_next(mut self, has_next: bool) -> Self {
        self.info.has_next = has_next;
        self
    }

    /// Finalises the page info.
    #[must_use]
    pub const fn build(self) -> PageInfo {
        self.info
    }
}

impl PageInfo {
    /// Starts building page info for the given position. No next page is
    /// assumed until [`PageInfoBuilder::has_next`] says otherwise.
    #[must_use]
    pub const fn builder(current_page: u32, per_page: u8) -> PageInfoBuilder {
        PageInfoBuilder {
            info: Self {
                current_page,
                per_page,
                has_next: false,
            },
        }
    }

    /// Returns the current page number (1-based).
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns true if GitHub advertised a following page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns true when `received` items cannot be followed by more: the
    /// page came back short or GitHub advertised no successor.
    #[must_use]
    pub fn is_final(&self, received: usize) -> bool {
        received < usize::from(self.per_page) || !self.has_next
    }
}
