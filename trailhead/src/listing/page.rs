//! Page results and pagination metadata
//!
//! [`Paging`] uses the same field names the backend puts in its `paging`
//! block, so metadata computed locally and metadata received from a server
//! are interchangeable.

use serde::{Deserialize, Serialize};

/// Pagination metadata for one page of a list
///
/// # Example
///
/// ```rust
/// use trailhead::listing::Paging;
///
/// let paging = Paging::new(1, 10, 25);
/// assert_eq!(paging.total_pages, 3);
/// assert!(paging.has_next);
/// assert!(!paging.has_previous);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Total number of pages, never less than 1
    pub total_pages: u32,
    /// Total number of matching items across all pages
    pub total_elements: u64,
    /// Whether there is a next page
    pub has_next: bool,
    /// Whether there is a previous page
    pub has_previous: bool,
}

impl Paging {
    /// Compute pagination metadata
    ///
    /// A `page` of 0 is treated as 1 and a `page_size` of 0 as 1. Pages past
    /// the end are echoed as requested with `has_next = false`. With no
    /// elements at all there is nothing to go back to, so `has_previous` is
    /// false on every page.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::Paging;
    ///
    /// let paging = Paging::new(9, 10, 25);
    /// assert_eq!(paging.page, 9);
    /// assert_eq!(paging.total_pages, 3);
    /// assert!(!paging.has_next);
    /// assert!(paging.has_previous);
    /// ```
    #[must_use]
    pub fn new(page: u32, page_size: u32, total_elements: u64) -> Self {
        let page = page.max(1);
        let total_pages = calculate_total_pages(total_elements, page_size.max(1));

        Self {
            page,
            total_pages,
            total_elements,
            has_next: page < total_pages,
            has_previous: page > 1 && total_elements > 0,
        }
    }

    /// Pagination for an empty result set
    #[must_use]
    pub fn empty() -> Self {
        Self::new(1, 1, 0)
    }

    /// Whether the current page lies past the last page
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.page > self.total_pages
    }
}

/// Calculate total pages, rounding up, with a floor of 1
fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size);
    // Ceiling division: (total + page_size - 1) / page_size
    let pages = total.saturating_add(page_size).saturating_sub(1) / page_size;
    pages.clamp(1, u64::from(u32::MAX)) as u32
}

/// One page of records plus its pagination metadata
///
/// # Example
///
/// ```rust
/// use trailhead::listing::{PageResult, Paging};
///
/// let page = PageResult::new(vec!["M1", "M2"], Paging::new(1, 2, 5));
/// let lengths = page.map(str::len);
/// assert_eq!(lengths.items, vec![2, 2]);
/// assert_eq!(lengths.paging.total_pages, 3);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    /// Records on this page, in display order
    pub items: Vec<T>,
    /// Pagination metadata
    pub paging: Paging,
}

impl<T> PageResult<T> {
    /// Create a page result
    pub fn new(items: Vec<T>, paging: Paging) -> Self {
        Self { items, paging }
    }

    /// An empty first page
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            paging: Paging::empty(),
        }
    }

    /// Number of records on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no records
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map each record to a new type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PageResult<U>
    where
        F: FnMut(T) -> U,
    {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            paging: self.paging,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_bounds() {
        assert_eq!(calculate_total_pages(0, 10), 1);
        assert_eq!(calculate_total_pages(1, 10), 1);
        assert_eq!(calculate_total_pages(10, 10), 1);
        assert_eq!(calculate_total_pages(11, 10), 2);
        assert_eq!(calculate_total_pages(25, 10), 3);
        assert_eq!(calculate_total_pages(u64::MAX, 1), u32::MAX);
    }

    #[test]
    fn test_paging_flags() {
        let first = Paging::new(1, 10, 25);
        assert!(!first.has_previous);
        assert!(first.has_next);

        let middle = Paging::new(2, 10, 25);
        assert!(middle.has_previous);
        assert!(middle.has_next);

        let last = Paging::new(3, 10, 25);
        assert!(last.has_previous);
        assert!(!last.has_next);
    }

    #[test]
    fn test_paging_empty() {
        let paging = Paging::empty();
        assert_eq!(paging.page, 1);
        assert_eq!(paging.total_pages, 1);
        assert_eq!(paging.total_elements, 0);
        assert!(!paging.has_next);
        assert!(!paging.has_previous);
    }

    #[test]
    fn test_paging_no_elements_past_first_page() {
        let paging = Paging::new(2, 10, 0);
        assert_eq!(paging.page, 2);
        assert_eq!(paging.total_pages, 1);
        assert!(!paging.has_next);
        assert!(!paging.has_previous);
    }

    #[test]
    fn test_paging_normalizes_zero_inputs() {
        let paging = Paging::new(0, 0, 3);
        assert_eq!(paging.page, 1);
        assert_eq!(paging.total_pages, 3);
    }

    #[test]
    fn test_paging_out_of_range() {
        let paging = Paging::new(4, 10, 25);
        assert!(paging.is_out_of_range());
        assert!(!paging.has_next);
        assert!(!Paging::new(3, 10, 25).is_out_of_range());
    }

    #[test]
    fn test_paging_wire_names() {
        let json = serde_json::to_value(Paging::new(1, 10, 25)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 1,
                "totalPages": 3,
                "totalElements": 25,
                "hasNext": true,
                "hasPrevious": false,
            })
        );
    }

    #[test]
    fn test_page_result_empty() {
        let page: PageResult<String> = PageResult::empty();
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.paging, Paging::empty());
    }
}
