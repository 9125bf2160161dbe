//! Search, filter, sort and paginate a record collection
//!
//! Pure functions over borrowed records. Nothing here fails: malformed
//! page numbers and sizes are normalized, pages past the end come back
//! empty, and unknown fields simply never match.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use trailhead::listing::{engine, ListQuery, ResourceDescriptor};
//!
//! let descriptor = ResourceDescriptor::builder("mountains")
//!     .searchable(["name", "location"])
//!     .build();
//! let records = vec![
//!     json!({ "id": 1, "name": "Fansipan", "location": "Lao Cai", "status": "WARNING" }),
//!     json!({ "id": 2, "name": "Ba Den", "location": "Tay Ninh", "status": "SAFE" }),
//! ];
//!
//! let query = ListQuery::new().with_search("lao").with_page_size(10);
//! let page = engine::run(&records, &descriptor, &query);
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.paging.total_elements, 1);
//! ```

use std::cmp::Ordering;

use super::descriptor::ResourceDescriptor;
use super::page::{PageResult, Paging};
use super::query::{ListQuery, SortOrder};
use super::record::{FieldValue, Record};

/// Records matching the query's search text and filters, in input order
///
/// A record is kept when the search text is empty or is a case-insensitive
/// substring of at least one of the descriptor's searchable fields, and
/// every filter matches its field.
pub fn filter_records<'r, R: Record>(
    records: &'r [R],
    descriptor: &ResourceDescriptor,
    query: &ListQuery,
) -> Vec<&'r R> {
    let needle = query.search_text().map(str::to_lowercase);

    records
        .iter()
        .filter(|record| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_search(*record, descriptor.searchable(), needle))
        })
        .filter(|record| {
            query
                .filters
                .iter()
                .all(|(field, expected)| expected.matches(record.field(field).as_ref()))
        })
        .collect()
}

fn matches_search<R: Record>(record: &R, fields: &[String], needle: &str) -> bool {
    fields.iter().any(|field| {
        record
            .field(field)
            .as_ref()
            .and_then(FieldValue::search_text)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}

/// Stable sort by one field
///
/// Text compares case-insensitively, numbers numerically. Records missing
/// the field (or holding null) go last in either direction. Without a sort
/// field the input order is returned untouched.
pub fn sort_records<'r, R: Record>(
    records: Vec<&'r R>,
    sort_field: Option<&str>,
    order: SortOrder,
) -> Vec<&'r R> {
    let Some(field) = sort_field.filter(|f| !f.is_empty()) else {
        return records;
    };

    let mut keyed: Vec<(SortKey, &'r R)> = records
        .into_iter()
        .map(|record| (SortKey::of(record.field(field)), record))
        .collect();

    // slice::sort_by is stable, so equal keys keep their input order
    keyed.sort_by(|(a, _), (b, _)| a.compare(b, order));

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Slice one page out of an already filtered and sorted collection
///
/// `page` 0 is treated as 1 and `page_size` 0 as 1. A page past the end
/// yields no items; its metadata still echoes the requested page.
pub fn paginate<T>(records: Vec<T>, page: u32, page_size: u32) -> PageResult<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = records.len() as u64;
    let paging = Paging::new(page, page_size, total);

    let offset = u64::from(page - 1) * u64::from(page_size);
    let items = match usize::try_from(offset) {
        Ok(offset) if offset < records.len() => records
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect(),
        _ => Vec::new(),
    };

    PageResult::new(items, paging)
}

/// Filter, sort and paginate in one pass
///
/// The composition every management table renders from.
pub fn run<R: Record + Clone>(
    records: &[R],
    descriptor: &ResourceDescriptor,
    query: &ListQuery,
) -> PageResult<R> {
    let matching = filter_records(records, descriptor, query);
    let sorted = sort_records(matching, query.sort_field(), query.sort_order());
    let page = paginate(sorted, query.page_number(), query.items_per_page());

    tracing::trace!(
        resource = descriptor.path(),
        page = page.paging.page,
        total_elements = page.paging.total_elements,
        "Evaluated list query"
    );

    page.map(Clone::clone)
}

/// Precomputed comparison key for one record's sort field
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Boolean(bool),
    Text(String),
    Missing,
}

impl SortKey {
    fn of(value: Option<FieldValue<'_>>) -> Self {
        match value {
            Some(FieldValue::Text(s)) => Self::Text(s.to_lowercase()),
            Some(FieldValue::Integer(n)) => Self::Number(n as f64),
            Some(FieldValue::Float(n)) => Self::Number(n),
            Some(FieldValue::Boolean(b)) => Self::Boolean(b),
            Some(FieldValue::Null) | None => Self::Missing,
        }
    }

    /// Kind rank for values of different types: numbers, booleans, text
    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Boolean(_) => 1,
            Self::Text(_) => 2,
            Self::Missing => 3,
        }
    }

    fn compare(&self, other: &Self, order: SortOrder) -> Ordering {
        let ordering = match (self, other) {
            (Self::Missing, Self::Missing) => return Ordering::Equal,
            (Self::Missing, _) => return Ordering::Greater,
            (_, Self::Missing) => return Ordering::Less,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        };

        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}
