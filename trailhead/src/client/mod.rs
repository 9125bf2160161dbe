//! Resource client for the booking backend
//!
//! Every resource kind (mountains, rangers, routes, ...) exposes the same
//! five calls through [`ResourceClient`]:
//!
//! | call     | request                               | success payload        |
//! |----------|---------------------------------------|------------------------|
//! | `list`   | `GET /{resource}?page=&size=&...`     | [`Listing`]            |
//! | `get`    | `GET /{resource}/{id}`                | one record             |
//! | `create` | `POST /{resource}` (JSON or multipart) | the created record     |
//! | `update` | `PUT /{resource}/{id}`                | the updated record     |
//! | `delete` | `DELETE /{resource}/{id}`             | nothing                |
//!
//! Responses arrive in a common [`Envelope`]. A call resolves to
//! `Ok(payload)` or to an [`ApiError`] whose kind separates transport
//! failures, timeouts, business failures reported by the backend, rejected
//! credentials and malformed responses. A rejected credential also clears
//! the [`Session`](crate::session::Session) the client was built with.
//!
//! # Example
//!
//! ```rust,no_run
//! use trailhead::client::ApiClient;
//! use trailhead::config::Config;
//! use trailhead::listing::ListQuery;
//! use trailhead::resources::{MountainStatus, Mountains};
//! use trailhead::session::Session;
//!
//! # async fn example() -> trailhead::error::Result<()> {
//! let config = Config::load()?;
//! let session = Session::from_config(&config.session)?;
//! let api = ApiClient::new(&config.client, session)?;
//!
//! let query = ListQuery::new()
//!     .with_search("fan")
//!     .with_filter("status", MountainStatus::Safe);
//! let listing = api.resource::<Mountains>().list(&query).await?;
//! println!("{} of {}", listing.records.len(), listing.pagination.total_elements);
//! # Ok(())
//! # }
//! ```

mod envelope;
mod error;
mod resource;
mod state;
mod transport;

pub use envelope::Envelope;
pub use error::{ApiError, ApiErrorKind, ApiOperation, ApiResult, FALLBACK_MESSAGE};
pub use resource::{Attachment, Listing, Resource, ResourceClient};
pub use state::{CallEvent, CallListener, CallState};
pub use transport::ApiClient;
