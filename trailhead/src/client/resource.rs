//! Typed list/get/create/update/delete calls for one resource kind

use std::fmt;
use std::marker::PhantomData;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use super::envelope::Envelope;
use super::error::{ApiErrorKind, ApiOperation, ApiResult};
use super::transport::{ApiClient, CallContext};
use crate::listing::{ListQuery, PageResult, Paging, RecordId, ResourceDescriptor};

/// A resource kind exposed by the backend
///
/// Implemented by marker types in [`crate::resources`]:
///
/// ```rust
/// use trailhead::client::Resource;
/// use trailhead::resources::Mountains;
///
/// assert_eq!(Mountains::PATH, "mountains");
/// assert!(Mountains::descriptor().is_filterable("status"));
/// ```
pub trait Resource: Send + Sync + 'static {
    /// Path segment under the API base URL
    const PATH: &'static str;

    /// Record returned by list and detail calls
    type Record: DeserializeOwned + Send;

    /// Body sent by create and update calls
    type Payload: Serialize + Sync;

    /// Search/filter/sort capabilities and default page size
    fn descriptor() -> &'static ResourceDescriptor;
}

/// One server-side page of records
///
/// `pagination` is the backend's `paging` block, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub records: Vec<T>,
    pub pagination: Paging,
}

impl<T> From<Listing<T>> for PageResult<T> {
    fn from(listing: Listing<T>) -> Self {
        PageResult::new(listing.records, listing.pagination)
    }
}

/// A file uploaded alongside a create or update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Multipart field name, e.g. `image`
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// MIME type; omitted from the part when unset
    pub mime: Option<String>,
}

impl Attachment {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// Calls against one resource kind
///
/// Obtained from [`ApiClient::resource`]. Every call reads the bearer
/// credential from the client's session at send time.
pub struct ResourceClient<R> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn descriptor(&self) -> &'static ResourceDescriptor {
        R::descriptor()
    }

    /// `GET /{resource}?page=&size=&direction=&sort=&search=&<filters>`
    pub async fn list(&self, query: &ListQuery) -> ApiResult<Listing<R::Record>> {
        let call = CallContext::new(ApiOperation::List, R::PATH);
        let request = self
            .api
            .request(Method::GET, self.api.endpoint(R::PATH, None))
            .query(&query.to_query_pairs());

        self.api
            .execute(&call, request, |envelope: Envelope<Vec<R::Record>>| {
                let (records, pagination) = envelope.require_listing()?;
                Ok(Listing {
                    records,
                    pagination,
                })
            })
            .await
    }

    /// `GET /{resource}/{id}`
    pub async fn get(&self, id: impl Into<RecordId>) -> ApiResult<R::Record> {
        let id = id.into();
        let call = CallContext::new(ApiOperation::Get, R::PATH).with_id(id.clone());
        let request = self
            .api
            .request(Method::GET, self.api.endpoint(R::PATH, Some(&id)));

        self.api
            .execute(&call, request, |envelope: Envelope<R::Record>| {
                envelope.require_data()
            })
            .await
    }

    /// `POST /{resource}`
    ///
    /// JSON body without attachments, multipart otherwise.
    pub async fn create(
        &self,
        payload: &R::Payload,
        attachments: Vec<Attachment>,
    ) -> ApiResult<R::Record> {
        let call = CallContext::new(ApiOperation::Create, R::PATH);
        let request = self
            .api
            .request(Method::POST, self.api.endpoint(R::PATH, None));
        let request = with_body(&call, request, payload, attachments)?;

        self.api
            .execute(&call, request, |envelope: Envelope<R::Record>| {
                envelope.require_data()
            })
            .await
    }

    /// `PUT /{resource}/{id}`, same body rules as [`create`](Self::create)
    pub async fn update(
        &self,
        id: impl Into<RecordId>,
        payload: &R::Payload,
        attachments: Vec<Attachment>,
    ) -> ApiResult<R::Record> {
        let id = id.into();
        let call = CallContext::new(ApiOperation::Update, R::PATH).with_id(id.clone());
        let request = self
            .api
            .request(Method::PUT, self.api.endpoint(R::PATH, Some(&id)));
        let request = with_body(&call, request, payload, attachments)?;

        self.api
            .execute(&call, request, |envelope: Envelope<R::Record>| {
                envelope.require_data()
            })
            .await
    }

    /// `DELETE /{resource}/{id}`; whatever `data` the backend sends is ignored
    pub async fn delete(&self, id: impl Into<RecordId>) -> ApiResult<()> {
        let id = id.into();
        let call = CallContext::new(ApiOperation::Delete, R::PATH).with_id(id.clone());
        let request = self
            .api
            .request(Method::DELETE, self.api.endpoint(R::PATH, Some(&id)));

        self.api
            .execute(&call, request, |_: Envelope<IgnoredAny>| Ok(()))
            .await
    }
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::PATH)
            .field("api", &self.api)
            .finish()
    }
}

/// Attach the payload as JSON, or as the `data` part of a multipart form
/// followed by one part per attachment
fn with_body<P: Serialize>(
    call: &CallContext,
    request: RequestBuilder,
    payload: &P,
    attachments: Vec<Attachment>,
) -> ApiResult<RequestBuilder> {
    if attachments.is_empty() {
        return Ok(request.json(payload));
    }

    let data = serde_json::to_string(payload)
        .map_err(|e| call.error(ApiErrorKind::Decode, None, Some(&e.to_string())))?;
    let data = Part::text(data)
        .mime_str("application/json")
        .map_err(|e| call.error(ApiErrorKind::Transport, None, Some(&e.to_string())))?;

    let mut form = Form::new().part("data", data);
    for attachment in attachments {
        let mut part = Part::bytes(attachment.bytes).file_name(attachment.file_name);
        if let Some(mime) = attachment.mime.as_deref() {
            part = part
                .mime_str(mime)
                .map_err(|e| call.error(ApiErrorKind::Transport, None, Some(&e.to_string())))?;
        }
        form = form.part(attachment.field, part);
    }

    Ok(request.multipart(form))
}
