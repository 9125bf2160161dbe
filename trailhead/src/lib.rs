//! # trailhead
//!
//! Client core for the hiking-trip booking platform: the list query and
//! pagination engine behind every management table, and a typed REST
//! client for the booking backend.
//!
//! ## Features
//!
//! - **List engine**: search, field filters, stable sort and clamped
//!   pagination over a locally held snapshot ([`listing`])
//! - **Resource client**: list/get/create/update/delete with a validated
//!   response envelope, typed failures and multipart uploads ([`client`])
//! - **Session**: bearer credential and user profile, in memory or on disk,
//!   injected into the client ([`session`])
//! - **Resource catalogue**: mountains, rangers, routes, mountain-routes,
//!   transactions, users and hikers ([`resources`])
//! - **Configuration**: layered TOML files and `TRAILHEAD_` environment
//!   variables ([`config`])
//! - **Observability**: structured logging via `tracing` ([`observability`])
//!
//! ## Example
//!
//! ```rust
//! use trailhead::prelude::*;
//! use trailhead::resources::{Mountain, MountainStatus, Mountains};
//!
//! let snapshot: Vec<Mountain> = serde_json::from_str(r#"[
//!     { "id": 1, "name": "Fansipan", "location": "Lao Cai", "elevation": 3147, "status": "WARNING" },
//!     { "id": 2, "name": "Ta Xua", "location": "Son La", "elevation": 2865, "status": "SAFE" },
//!     { "id": 3, "name": "Lang Biang", "location": "Lam Dong", "elevation": 2167, "status": "SAFE" }
//! ]"#).unwrap();
//!
//! let view = ListView::new(Mountains::descriptor().clone()).with_records(snapshot);
//! let query = view.filter(&view.query(), "status", MountainStatus::Safe);
//! let query = view.sort_by(&query, "elevation");
//!
//! let page = view.page(&query);
//! assert_eq!(page.items[0].name, "Lang Biang");
//! assert_eq!(page.paging.total_elements, 2);
//! assert!(!page.paging.has_next);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod observability;
pub mod resources;
pub mod session;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{
        ApiClient, ApiError, ApiErrorKind, ApiOperation, ApiResult, Attachment, CallState,
        Listing, Resource, ResourceClient,
    };
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::listing::{
        FilterValue, ListQuery, ListView, PageResult, Paging, Record, RecordId,
        ResourceDescriptor, SortOrder,
    };
    pub use crate::observability::init_tracing;
    pub use crate::session::{Session, UserProfile};
}
