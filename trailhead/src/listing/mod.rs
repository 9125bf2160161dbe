//! List query and pagination engine
//!
//! Everything a management table needs to turn a collection of records
//! into the rows of one page:
//!
//! - [`ListQuery`]: search text, field filters, sort and page parameters
//! - [`Record`]: field-level access to a record, for typed and JSON records
//! - [`ResourceDescriptor`]: which fields a resource searches, filters and sorts
//! - [`engine`]: `filter_records`, `sort_records`, `paginate` and `run`
//! - [`PageResult`] / [`Paging`]: one page of rows plus metadata
//! - [`ListView`]: the view model tying a snapshot, a descriptor and a fixed
//!   page size together
//!
//! Server-paged resources do not go through the engine; their [`Paging`]
//! comes verbatim from the backend (see [`crate::client`]).

mod descriptor;
pub mod engine;
mod page;
mod query;
mod record;
mod view;

pub use descriptor::{ResourceDescriptor, ResourceDescriptorBuilder};
pub use engine::{filter_records, paginate, run, sort_records};
pub use page::{PageResult, Paging};
pub use query::{FilterValue, ListQuery, SortOrder, DEFAULT_PAGE_SIZE};
pub use record::{FieldValue, Record, RecordId};
pub use view::ListView;
