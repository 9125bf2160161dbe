//! Per-resource table configuration
//!
//! Every management table differs only in which fields its search box looks
//! at, which filters it offers, which columns sort and how many rows it
//! shows. A [`ResourceDescriptor`] captures exactly that, so one engine and
//! one view model serve every table.

use super::query::DEFAULT_PAGE_SIZE;

/// Search, filter and sort configuration for one resource kind
///
/// # Example
///
/// ```rust
/// use trailhead::listing::ResourceDescriptor;
///
/// let mountains = ResourceDescriptor::builder("mountains")
///     .name("Mountain")
///     .searchable(["name", "location"])
///     .filterable(["status"])
///     .sortable(["name", "elevation"])
///     .page_size(8)
///     .build();
///
/// assert!(mountains.is_searchable("location"));
/// assert!(mountains.is_filterable("status"));
/// assert!(!mountains.is_sortable("status"));
/// assert_eq!(mountains.page_size(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    path: String,
    name: String,
    searchable: Vec<String>,
    filterable: Vec<String>,
    sortable: Vec<String>,
    page_size: u32,
}

impl ResourceDescriptor {
    /// Start building a descriptor for the resource served at `path`
    pub fn builder(path: impl Into<String>) -> ResourceDescriptorBuilder {
        ResourceDescriptorBuilder::new(path)
    }

    /// URL path segment of the resource (e.g. `mountains`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Human-readable singular name (e.g. `Mountain`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields the search box is matched against
    pub fn searchable(&self) -> &[String] {
        &self.searchable
    }

    /// Fields the table offers filters for
    pub fn filterable(&self) -> &[String] {
        &self.filterable
    }

    /// Fields the table can sort by
    pub fn sortable(&self) -> &[String] {
        &self.sortable
    }

    /// Default rows per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.iter().any(|f| f == field)
    }

    pub fn is_filterable(&self, field: &str) -> bool {
        self.filterable.iter().any(|f| f == field)
    }

    pub fn is_sortable(&self, field: &str) -> bool {
        self.sortable.iter().any(|f| f == field)
    }
}

/// Builder for [`ResourceDescriptor`]
#[derive(Debug, Clone)]
pub struct ResourceDescriptorBuilder {
    path: String,
    name: Option<String>,
    searchable: Vec<String>,
    filterable: Vec<String>,
    sortable: Vec<String>,
    page_size: u32,
}

impl ResourceDescriptorBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            searchable: Vec::new(),
            filterable: Vec::new(),
            sortable: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Human-readable name; defaults to the path
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn searchable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn filterable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filterable.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn sortable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sortable.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Default rows per page, at least 1
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn build(self) -> ResourceDescriptor {
        ResourceDescriptor {
            name: self.name.unwrap_or_else(|| self.path.clone()),
            path: self.path,
            searchable: self.searchable,
            filterable: self.filterable,
            sortable: self.sortable,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let descriptor = ResourceDescriptor::builder("rangers").build();
        assert_eq!(descriptor.path(), "rangers");
        assert_eq!(descriptor.name(), "rangers");
        assert!(descriptor.searchable().is_empty());
        assert_eq!(descriptor.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_builder_accumulates_fields() {
        let descriptor = ResourceDescriptor::builder("users")
            .searchable(["fullName"])
            .searchable(vec!["email".to_string()])
            .build();
        assert_eq!(descriptor.searchable(), ["fullName", "email"]);
    }

    #[test]
    fn test_page_size_floor() {
        let descriptor = ResourceDescriptor::builder("routes").page_size(0).build();
        assert_eq!(descriptor.page_size(), 1);
    }
}
