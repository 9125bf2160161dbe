//! Generic list view model
//!
//! One [`ListView`] backs any management table that holds a full snapshot
//! of its records locally. The page size is fixed when the view is created
//! and every query the view evaluates is pinned to it.

use super::descriptor::ResourceDescriptor;
use super::engine;
use super::page::{PageResult, Paging};
use super::query::{FilterValue, ListQuery, SortOrder};
use super::record::Record;
use crate::config::ListingConfig;

/// A table over a locally held snapshot of records
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use trailhead::listing::{ListView, ResourceDescriptor};
///
/// let descriptor = ResourceDescriptor::builder("rangers")
///     .searchable(["fullName"])
///     .sortable(["fullName"])
///     .page_size(2)
///     .build();
/// let view = ListView::new(descriptor).with_records(vec![
///     json!({ "id": 1, "fullName": "Tran Minh" }),
///     json!({ "id": 2, "fullName": "Le Hoa" }),
///     json!({ "id": 3, "fullName": "Pham An" }),
/// ]);
///
/// let query = view.sort_by(&view.query(), "fullName");
/// let page = view.page(&query);
/// assert_eq!(page.items[0]["fullName"], "Le Hoa");
/// assert_eq!(page.paging.total_pages, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ListView<R> {
    descriptor: ResourceDescriptor,
    page_size: u32,
    records: Vec<R>,
}

impl<R: Record + Clone> ListView<R> {
    /// Empty view using the descriptor's page size
    pub fn new(descriptor: ResourceDescriptor) -> Self {
        let page_size = descriptor.page_size();
        Self {
            descriptor,
            page_size,
            records: Vec::new(),
        }
    }

    /// Empty view honouring the configured page size, if any
    pub fn from_config(descriptor: ResourceDescriptor, config: &ListingConfig) -> Self {
        let view = Self::new(descriptor);
        match config.page_size {
            Some(page_size) => view.with_page_size(page_size),
            None => view,
        }
    }

    /// Override the page size for this view's lifetime
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the snapshot of records
    #[must_use]
    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.records = records;
        self
    }

    /// Replace the snapshot, e.g. after a refetch
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// A first-page query pinned to this view's page size
    pub fn query(&self) -> ListQuery {
        ListQuery::new().with_page(1).with_page_size(self.page_size)
    }

    /// Evaluate a query against the snapshot
    ///
    /// The query's own page size is ignored in favour of the view's.
    pub fn page(&self, query: &ListQuery) -> PageResult<R> {
        let pinned = query.clone().with_page_size(self.page_size);
        engine::run(&self.records, &self.descriptor, &pinned)
    }

    /// New search text; returns to the first page
    pub fn search(&self, query: &ListQuery, text: impl Into<String>) -> ListQuery {
        query.clone().with_search(text).with_page(1)
    }

    /// Set a filter; returns to the first page
    pub fn filter(
        &self,
        query: &ListQuery,
        field: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> ListQuery {
        query.clone().with_filter(field, value).with_page(1)
    }

    /// Drop a filter; returns to the first page
    pub fn clear_filter(&self, query: &ListQuery, field: &str) -> ListQuery {
        query.clone().without_filter(field).with_page(1)
    }

    /// Column-header click
    ///
    /// Sorting by the current field flips the direction; a new field starts
    /// ascending. Fields the descriptor does not list as sortable leave the
    /// query unchanged.
    pub fn sort_by(&self, query: &ListQuery, field: &str) -> ListQuery {
        if !self.descriptor.is_sortable(field) {
            tracing::debug!(
                resource = self.descriptor.path(),
                field,
                "Ignoring sort on non-sortable field"
            );
            return query.clone();
        }

        let order = if query.sort_field() == Some(field) {
            query.sort_order().reversed()
        } else {
            SortOrder::Asc
        };

        query.clone().with_sort(field).with_order(order)
    }

    /// Forward one page, staying on the last page of the current results
    pub fn next(&self, query: &ListQuery) -> ListQuery {
        let pinned = query.clone().with_page_size(self.page_size);
        let matching = engine::filter_records(&self.records, &self.descriptor, &pinned).len();
        let last = Paging::new(1, self.page_size, matching as u64).total_pages;
        if query.page_number() >= last {
            query.clone().with_page(last)
        } else {
            query.next_page()
        }
    }

    /// Back one page, never before the first
    pub fn previous(&self, query: &ListQuery) -> ListQuery {
        query.previous_page()
    }

    /// Jump to a page; 0 is treated as 1
    pub fn goto(&self, query: &ListQuery, page: u32) -> ListQuery {
        query.clone().with_page(page.max(1))
    }
}
