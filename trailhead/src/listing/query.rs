//! Query types for list operations
//!
//! A [`ListQuery`] is built fresh for every interaction with a table: typing
//! in the search box, picking a filter, clicking a column header or a page
//! control. It is a plain value; nothing about it is persisted.
//!
//! # Example
//!
//! ```rust
//! use trailhead::listing::{ListQuery, SortOrder};
//!
//! let query = ListQuery::default()
//!     .with_page(2)
//!     .with_page_size(10)
//!     .with_sort("name")
//!     .with_order(SortOrder::Desc)
//!     .with_filter("status", "DANGEROUS");
//!
//! assert_eq!(query.page_number(), 2);
//! assert_eq!(query.items_per_page(), 10);
//! assert_eq!(query.offset(), 10);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::FieldValue;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters owned by paging, sorting and search
const RESERVED_PARAMS: [&str; 5] = ["page", "size", "sort", "direction", "search"];

/// Sort direction for list queries
///
/// # Example
///
/// ```rust
/// use trailhead::listing::SortOrder;
///
/// assert_eq!(format!("{}", SortOrder::Asc), "asc");
/// assert_eq!(format!("{}", SortOrder::Desc), "desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Sort in ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Sort in descending order (Z-A, 9-0, newest first)
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

impl SortOrder {
    /// The opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Expected value of a field filter
///
/// # Example
///
/// ```rust
/// use trailhead::listing::FilterValue;
///
/// let status: FilterValue = "DANGEROUS".into();
/// let mountain_id: FilterValue = 42_i64.into();
/// let verified: FilterValue = true.into();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Boolean value
    Boolean(bool),
    /// 64-bit integer value
    Integer(i64),
    /// 64-bit floating point value
    Float(f64),
    /// String value, compared case-insensitively
    String(String),
    /// Matches records where the field is absent or null
    Null,
}

impl FilterValue {
    /// Whether a record's field value satisfies this filter
    ///
    /// Strings compare case-insensitively; everything else compares strictly,
    /// with integers and floats compared by numeric value. Values of
    /// different kinds never match.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::{FieldValue, FilterValue};
    ///
    /// let filter = FilterValue::from("dangerous");
    /// assert!(filter.matches(Some(&FieldValue::from("DANGEROUS"))));
    /// assert!(!filter.matches(Some(&FieldValue::from("SAFE"))));
    /// assert!(!filter.matches(None));
    /// ```
    #[must_use]
    pub fn matches(&self, actual: Option<&FieldValue<'_>>) -> bool {
        match (self, actual) {
            (Self::Null, None) | (Self::Null, Some(FieldValue::Null)) => true,
            (_, None) => false,
            (Self::String(expected), Some(FieldValue::Text(actual))) => {
                expected.to_lowercase() == actual.to_lowercase()
            }
            (Self::Boolean(expected), Some(FieldValue::Boolean(actual))) => expected == actual,
            (Self::Integer(expected), Some(FieldValue::Integer(actual))) => expected == actual,
            (Self::Integer(_) | Self::Float(_), Some(actual)) => {
                match (self.as_f64(), actual.as_f64()) {
                    (Some(expected), Some(actual)) => expected == actual,
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Value as sent in a query string; `None` for [`FilterValue::Null`]
    #[must_use]
    pub fn to_query_value(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Float(n) => Some(n.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Query parameters for list operations
///
/// Provides pagination, sorting, searching, and filtering for management
/// tables and for server-side list endpoints.
///
/// # Example
///
/// ```rust
/// use trailhead::listing::{ListQuery, SortOrder};
///
/// let query = ListQuery::new()
///     .with_page(1)
///     .with_page_size(20)
///     .with_sort("name")
///     .with_order(SortOrder::Asc)
///     .with_search("fansi")
///     .with_filter("status", "SAFE");
///
/// assert_eq!(query.page_number(), 1);
/// assert_eq!(query.items_per_page(), 20);
/// assert_eq!(query.offset(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ListQuery {
    /// Page number (1-indexed). None defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page. None defaults to DEFAULT_PAGE_SIZE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,

    /// Field name to sort by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,

    /// Sort direction (asc or desc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    /// Free-text search
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Field equality filters, all of which must hold
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, FilterValue>,
}

impl ListQuery {
    /// Create a new empty query
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::ListQuery;
    ///
    /// let query = ListQuery::new();
    /// assert_eq!(query.page_number(), 1);
    /// assert_eq!(query.items_per_page(), 10);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the number of items per page
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Set the sort field
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Add or replace a field filter
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::ListQuery;
    ///
    /// let query = ListQuery::new()
    ///     .with_filter("status", "SAFE")
    ///     .with_filter("status", "WARNING");
    /// assert_eq!(query.filters.len(), 1);
    /// ```
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Remove a field filter
    #[must_use]
    pub fn without_filter(mut self, field: &str) -> Self {
        self.filters.remove(field);
        self
    }

    /// Replace all filters at once
    #[must_use]
    pub fn with_filters<I, K, V>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        self.filters = filters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Get the 1-indexed page number, defaulting to 1
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::ListQuery;
    ///
    /// // Page 0 is treated as page 1
    /// let query = ListQuery::new().with_page(0);
    /// assert_eq!(query.page_number(), 1);
    /// ```
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the number of items per page, at least 1, defaulting to DEFAULT_PAGE_SIZE
    #[must_use]
    pub fn items_per_page(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Index of the first record on the requested page
    ///
    /// Calculates (page - 1) * page_size.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number().saturating_sub(1)) * u64::from(self.items_per_page())
    }

    /// Get the sort order, defaulting to ascending if not specified
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    /// The sort field, if a non-empty one is set
    #[must_use]
    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_deref().filter(|s| !s.is_empty())
    }

    /// The search text, if a non-empty one is set
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if a search query is present
    ///
    /// An empty string is not a search.
    #[must_use]
    pub fn has_search(&self) -> bool {
        self.search_text().is_some()
    }

    /// Check if any filters are present
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Check if sorting is specified
    #[must_use]
    pub fn has_sort(&self) -> bool {
        self.sort_field().is_some()
    }

    /// The same query one page further on
    #[must_use]
    pub fn next_page(&self) -> Self {
        self.clone().with_page(self.page_number().saturating_add(1))
    }

    /// The same query one page back, never before page 1
    #[must_use]
    pub fn previous_page(&self) -> Self {
        self.clone()
            .with_page(self.page_number().saturating_sub(1).max(1))
    }

    /// Query string parameters for a server-side list endpoint
    ///
    /// Emits `page` and `size` always, `sort` and `direction` when a sort
    /// field is set, `search` when search text is present, then one
    /// parameter per non-null filter in field-name order. Filters named
    /// after one of those control parameters are not sent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trailhead::listing::ListQuery;
    ///
    /// let pairs = ListQuery::new()
    ///     .with_page(2)
    ///     .with_page_size(5)
    ///     .with_filter("status", "SAFE")
    ///     .to_query_pairs();
    /// assert_eq!(
    ///     pairs,
    ///     vec![
    ///         ("page".to_string(), "2".to_string()),
    ///         ("size".to_string(), "5".to_string()),
    ///         ("status".to_string(), "SAFE".to_string()),
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page_number().to_string()),
            ("size".to_string(), self.items_per_page().to_string()),
        ];

        if let Some(sort) = self.sort_field() {
            pairs.push(("direction".to_string(), self.sort_order().to_string()));
            pairs.push(("sort".to_string(), sort.to_string()));
        }

        if let Some(search) = self.search_text() {
            pairs.push(("search".to_string(), search.to_string()));
        }

        pairs.extend(
            self.filters
                .iter()
                .filter(|(field, _)| !RESERVED_PARAMS.contains(&field.as_str()))
                .filter_map(|(field, value)| Some((field.clone(), value.to_query_value()?))),
        );

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_display() {
        assert_eq!(format!("{}", SortOrder::Asc), "asc");
        assert_eq!(format!("{}", SortOrder::Desc), "desc");
    }

    #[test]
    fn test_sort_order_default_and_reversed() {
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.reversed(), SortOrder::Asc);
    }

    #[test]
    fn test_list_query_default() {
        let query = ListQuery::default();
        assert!(query.page.is_none());
        assert!(query.page_size.is_none());
        assert!(query.sort.is_none());
        assert!(query.order.is_none());
        assert!(query.search.is_none());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_page_number_zero_protection() {
        assert_eq!(ListQuery::new().page_number(), 1);
        assert_eq!(ListQuery::new().with_page(0).page_number(), 1);
        assert_eq!(ListQuery::new().with_page(7).page_number(), 7);
    }

    #[test]
    fn test_items_per_page_zero_protection() {
        assert_eq!(ListQuery::new().items_per_page(), DEFAULT_PAGE_SIZE);
        assert_eq!(ListQuery::new().with_page_size(0).items_per_page(), 1);
        assert_eq!(ListQuery::new().with_page_size(500).items_per_page(), 500);
    }

    #[test]
    fn test_offset_calculation() {
        assert_eq!(ListQuery::new().with_page(1).with_page_size(10).offset(), 0);
        assert_eq!(ListQuery::new().with_page(3).with_page_size(10).offset(), 20);
        assert_eq!(ListQuery::new().with_page(0).with_page_size(10).offset(), 0);
    }

    #[test]
    fn test_empty_search_and_sort_are_absent() {
        let query = ListQuery::new().with_search("").with_sort("");
        assert!(!query.has_search());
        assert!(!query.has_sort());
        assert!(query.search_text().is_none());
        assert!(query.sort_field().is_none());
    }

    #[test]
    fn test_with_filters_replaces() {
        let query = ListQuery::new()
            .with_filter("role", "ADMIN")
            .with_filters([("status", "ACTIVE"), ("role", "RANGER")]);
        assert_eq!(query.filters.len(), 2);
        assert_eq!(query.filters["role"], FilterValue::from("RANGER"));
        assert!(query.has_filters());

        let query = query.without_filter("role");
        assert_eq!(query.filters.len(), 1);
    }

    #[test]
    fn test_page_navigation() {
        let query = ListQuery::new().with_page(2);
        assert_eq!(query.next_page().page_number(), 3);
        assert_eq!(query.previous_page().page_number(), 1);
        assert_eq!(query.previous_page().previous_page().page_number(), 1);
    }

    #[test]
    fn test_filter_string_case_insensitive() {
        let filter = FilterValue::from("Dangerous");
        assert!(filter.matches(Some(&FieldValue::from("DANGEROUS"))));
        assert!(filter.matches(Some(&FieldValue::from("dangerous"))));
        assert!(!filter.matches(Some(&FieldValue::from("DANGER"))));
    }

    #[test]
    fn test_filter_strict_for_non_strings() {
        assert!(FilterValue::Integer(3).matches(Some(&FieldValue::Integer(3))));
        assert!(FilterValue::Integer(3).matches(Some(&FieldValue::Float(3.0))));
        assert!(FilterValue::Float(2.5).matches(Some(&FieldValue::Float(2.5))));
        assert!(!FilterValue::Integer(3).matches(Some(&FieldValue::from("3"))));
        assert!(!FilterValue::from("3").matches(Some(&FieldValue::Integer(3))));
        assert!(FilterValue::Boolean(true).matches(Some(&FieldValue::Boolean(true))));
        assert!(!FilterValue::Boolean(true).matches(Some(&FieldValue::from("true"))));
    }

    #[test]
    fn test_filter_null() {
        assert!(FilterValue::Null.matches(None));
        assert!(FilterValue::Null.matches(Some(&FieldValue::Null)));
        assert!(!FilterValue::Null.matches(Some(&FieldValue::from("x"))));
        assert!(!FilterValue::from("x").matches(Some(&FieldValue::Null)));
        assert!(!FilterValue::from("x").matches(None));
    }

    #[test]
    fn test_query_pairs_full() {
        let pairs = ListQuery::new()
            .with_page(3)
            .with_page_size(20)
            .with_sort("name")
            .with_order(SortOrder::Desc)
            .with_search("lang")
            .with_filter("status", "WARNING")
            .with_filter("difficulty", 2_i64)
            .with_filter("archived", FilterValue::Null)
            .to_query_pairs();

        let expected: Vec<(String, String)> = [
            ("page", "3"),
            ("size", "20"),
            ("direction", "desc"),
            ("sort", "name"),
            ("search", "lang"),
            ("difficulty", "2"),
            ("status", "WARNING"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_query_pairs_skip_filters_named_like_controls() {
        let pairs = ListQuery::new()
            .with_page(2)
            .with_search("lang")
            .with_filter("page", 7_i64)
            .with_filter("search", "other")
            .with_filter("sort", "name")
            .with_filter("status", "SAFE")
            .to_query_pairs();

        let names: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["page", "size", "search", "status"]);
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("search".to_string(), "lang".to_string())));
    }

    #[test]
    fn test_query_pairs_normalize_page() {
        let pairs = ListQuery::new().with_page(0).with_page_size(0).to_query_pairs();
        assert_eq!(pairs[0], ("page".to_string(), "1".to_string()));
        assert_eq!(pairs[1], ("size".to_string(), "1".to_string()));
    }

    #[test]
    fn test_list_query_serde() {
        let query = ListQuery::new()
            .with_page(2)
            .with_page_size(50)
            .with_sort("name")
            .with_order(SortOrder::Desc)
            .with_filter("status", "SAFE");

        let json = serde_json::to_string(&query).unwrap();
        let deserialized: ListQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(query, deserialized);
    }
}
