//! Field-level view of a record
//!
//! The list engine never looks at concrete record types. It asks a
//! [`Record`] for its identifier and for individual field values by name,
//! which lets typed resources and raw JSON snapshots share one engine.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a record
///
/// Backends hand out numeric or string identifiers depending on the resource.
///
/// # Example
///
/// ```rust
/// use trailhead::listing::RecordId;
///
/// assert_eq!(RecordId::from(42).to_string(), "42");
/// assert_eq!(RecordId::from("TX-0042").to_string(), "TX-0042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric identifier
    Number(i64),
    /// Opaque string identifier
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&RecordId> for RecordId {
    fn from(id: &RecordId) -> Self {
        id.clone()
    }
}

/// A single field value read from a record
///
/// Text borrows from the record where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// Text value
    Text(Cow<'a, str>),
    /// 64-bit integer value
    Integer(i64),
    /// 64-bit floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Explicitly empty value
    Null,
}

impl<'a> FieldValue<'a> {
    /// Owned text value, for fields computed on the fly (enum labels, dates)
    pub fn owned(text: impl Into<String>) -> Self {
        Self::Text(Cow::Owned(text.into()))
    }

    /// Whether this value is [`FieldValue::Null`]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value, if it is a number
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The text a search box is matched against
    ///
    /// Numbers and booleans are rendered the way a table cell would show them.
    /// Null has no searchable text.
    #[must_use]
    pub fn search_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Text(s) => Some(Cow::Borrowed(s.as_ref())),
            Self::Integer(n) => Some(Cow::Owned(n.to_string())),
            Self::Float(n) => Some(Cow::Owned(n.to_string())),
            Self::Boolean(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Self::Null => None,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for FieldValue<'_> {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&RecordId> for FieldValue<'_> {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Number(n) => Self::Integer(*n),
            RecordId::Text(s) => Self::owned(s.clone()),
        }
    }
}

/// An entity the list engine can search, filter and sort
///
/// `field` returns `None` for names the record does not know about; the
/// engine treats unknown and null fields alike.
///
/// # Example
///
/// ```rust
/// use trailhead::listing::{FieldValue, Record, RecordId};
///
/// struct Peak {
///     id: i64,
///     name: String,
/// }
///
/// impl Record for Peak {
///     fn id(&self) -> RecordId {
///         self.id.into()
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue<'_>> {
///         match name {
///             "id" => Some(self.id.into()),
///             "name" => Some((&self.name).into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// The record's unique identifier
    fn id(&self) -> RecordId;

    /// Look up a field by its wire name
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> RecordId {
        (**self).id()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Raw JSON objects, as held by dashboard snapshots
///
/// Only top-level scalar members are visible; arrays and nested objects
/// read as absent. A missing `id` member yields an empty text id.
impl Record for serde_json::Value {
    fn id(&self) -> RecordId {
        match self.get("id") {
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .map_or_else(|| RecordId::Text(n.to_string()), RecordId::Number),
            Some(serde_json::Value::String(s)) => RecordId::Text(s.clone()),
            _ => RecordId::Text(String::new()),
        }
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(FieldValue::from(s)),
            serde_json::Value::Number(n) => Some(
                n.as_i64()
                    .map(FieldValue::Integer)
                    .or_else(|| n.as_f64().map(FieldValue::Float))
                    .unwrap_or(FieldValue::Null),
            ),
            serde_json::Value::Bool(b) => Some(FieldValue::Boolean(*b)),
            serde_json::Value::Null => Some(FieldValue::Null),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}
