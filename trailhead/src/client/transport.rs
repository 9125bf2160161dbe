//! HTTP transport shared by all resource clients

use std::fmt;
use std::time::Instant;

use http::StatusCode;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::envelope::{Envelope, StatusProbe};
use super::error::{ApiError, ApiErrorKind, ApiOperation, ApiResult};
use super::resource::{Resource, ResourceClient};
use super::state::{CallEvent, CallListener, CallState};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::listing::RecordId;
use crate::session::Session;

/// Connection to the REST backend
///
/// Holds the HTTP client, the validated base URL and the session it reads
/// the bearer credential from. Cheap to clone; clones share the connection
/// pool and the session.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    listener: Option<CallListener>,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Fails if the base URL is not an absolute http(s) URL or the HTTP
    /// client cannot be constructed.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        tracing::debug!(
            base_url = %base_url,
            timeout_secs = config.timeout_secs,
            "API client initialized"
        );

        Ok(Self {
            http,
            base_url,
            session,
            listener: None,
        })
    }

    /// Receive the state changes of every call made through this client
    #[must_use]
    pub fn with_listener(mut self, listener: CallListener) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Typed client for one resource kind
    pub fn resource<R: Resource>(&self) -> ResourceClient<R> {
        ResourceClient::new(self.clone())
    }

    /// `{base}/{resource}` or `{base}/{resource}/{id}`
    pub fn endpoint(&self, resource: &str, id: Option<&RecordId>) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        url
    }

    /// Start a request, attaching the bearer credential if one is stored
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and validate its envelope
    ///
    /// `extract` pulls the typed payload out of a successful envelope; an
    /// `Err` from it is reported as a decode failure.
    pub(crate) async fn execute<T, U>(
        &self,
        call: &CallContext,
        request: RequestBuilder,
        extract: impl FnOnce(Envelope<T>) -> std::result::Result<U, String>,
    ) -> ApiResult<U>
    where
        T: DeserializeOwned,
    {
        let state = CallState::Idle.start();
        self.notify(call, state);
        let started = Instant::now();

        let result = match self.exchange::<T>(call, request).await {
            Ok(envelope) => extract(envelope).map_err(|reason| {
                call.error(ApiErrorKind::Decode, None, Some(&reason))
            }),
            Err(e) => Err(e),
        };

        let state = state.finish(result.is_ok());
        self.notify(call, state);

        match &result {
            Ok(_) => tracing::debug!(
                operation = %call.operation,
                resource = call.resource,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "API call succeeded"
            ),
            Err(e) => tracing::warn!(
                operation = %call.operation,
                resource = call.resource,
                kind = %e.kind,
                status = ?e.status,
                error = %e.message,
                "API call failed"
            ),
        }

        result
    }

    async fn exchange<T: DeserializeOwned>(
        &self,
        call: &CallContext,
        request: RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        tracing::debug!(
            operation = %call.operation,
            resource = call.resource,
            id = ?call.id,
            "API call started"
        );

        let response = request
            .send()
            .await
            .map_err(|e| call.transport_failure(&e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| call.transport_failure(&e))?;
        let probe = StatusProbe::read(&body);

        if status == StatusCode::UNAUTHORIZED
            || probe.failing_status() == Some(StatusCode::UNAUTHORIZED.as_u16())
        {
            return Err(self.reject_credential(call, probe.message.as_deref()));
        }

        if !status.is_success() {
            return Err(call
                .error(
                    ApiErrorKind::Business,
                    probe.message.as_deref(),
                    Some(&status.to_string()),
                )
                .with_status(status.as_u16()));
        }

        if let Some(code) = probe.failing_status() {
            let reason = StatusCode::from_u16(code).ok().map(|s| s.to_string());
            return Err(call
                .error(
                    ApiErrorKind::Business,
                    probe.message.as_deref(),
                    reason.as_deref(),
                )
                .with_status(code));
        }

        serde_json::from_slice::<Envelope<T>>(&body).map_err(|e| {
            call.error(
                ApiErrorKind::Decode,
                None,
                Some(&format!("invalid response envelope: {e}")),
            )
            .with_status(status.as_u16())
        })
    }

    fn reject_credential(&self, call: &CallContext, message: Option<&str>) -> ApiError {
        tracing::warn!(
            operation = %call.operation,
            resource = call.resource,
            "Backend rejected the credential, clearing session"
        );
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "Failed to clear session after 401");
        }
        call.error(
            ApiErrorKind::Unauthorized,
            message,
            Some("Your session has expired. Please sign in again."),
        )
        .with_status(StatusCode::UNAUTHORIZED.as_u16())
    }

    fn notify(&self, call: &CallContext, state: CallState) {
        if let Some(listener) = &self.listener {
            listener(&CallEvent {
                operation: call.operation,
                resource: call.resource.to_string(),
                state,
            });
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// What a single call is doing, for errors and logs
#[derive(Debug, Clone)]
pub(crate) struct CallContext {
    pub operation: ApiOperation,
    pub resource: &'static str,
    pub id: Option<RecordId>,
}

impl CallContext {
    pub(crate) fn new(operation: ApiOperation, resource: &'static str) -> Self {
        Self {
            operation,
            resource,
            id: None,
        }
    }

    pub(crate) fn with_id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn error(
        &self,
        kind: ApiErrorKind,
        backend: Option<&str>,
        transport: Option<&str>,
    ) -> ApiError {
        let error =
            ApiError::from_messages(self.operation, kind, backend, transport).with_resource(self.resource);
        match &self.id {
            Some(id) => error.with_id(id),
            None => error,
        }
    }

    fn transport_failure(&self, e: &reqwest::Error) -> ApiError {
        let kind = if e.is_timeout() {
            ApiErrorKind::Timeout
        } else {
            ApiErrorKind::Transport
        };
        self.error(kind, None, Some(&e.to_string()))
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
