// Authenticated HTTP client for the youpp admin API.
//
// Every admin call funnels through `ApiClient::send`, which attaches the
// bearer token, defaults the JSON content type, and turns a 401 into a
// cleared token store plus one session-hook invocation. Requests are
// single-shot: no retry, no queueing, no timeout beyond the transport's.

use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{SessionHook, TokenStore};
use crate::error::Error;
use crate::transport::{TransportConfig, normalize_base_url};

/// Setting name reported when the admin API base URL is missing.
pub const API_BASE_URL_SETTING: &str = "api_base_url";

/// Characters escaped when interpolating an identifier into a URL path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value for use as a single URL path segment.
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

// ── Request options ──────────────────────────────────────────────────

/// Method, extra headers, and optional body for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serialize `body` as JSON and attach it.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Attach a raw body. Content type still defaults to JSON unless
    /// a `Content-Type` header is set explicitly.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the youpp admin API (`/api/...`).
///
/// Owns a handle to the shared [`TokenStore`] and an optional
/// [`SessionHook`]. The base URL is validated at construction, so a
/// missing setting fails before any request is attempted.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    session_hook: Option<Arc<dyn SessionHook>>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from the configured base URL.
    ///
    /// Fails with [`Error::MissingBaseUrl`] when `base_url` is `None` or
    /// empty. Trailing slashes are stripped.
    pub fn new(
        base_url: Option<&str>,
        transport: &TransportConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, tokens)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: Option<&str>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url, API_BASE_URL_SETTING)?;
        Ok(Self {
            http,
            base_url,
            tokens,
            session_hook: None,
        })
    }

    /// Install the side effect run when the session is found to be gone.
    pub fn with_session_hook(mut self, hook: Arc<dyn SessionHook>) -> Self {
        self.session_hook = Some(hook);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// `true` when an access token is currently stored.
    pub fn has_session(&self) -> bool {
        self.tokens.access_token().is_some()
    }

    /// Run the session hook without making a request.
    ///
    /// Used by callers that detect a missing token up front.
    pub fn notify_session_expired(&self) {
        if let Some(ref hook) = self.session_hook {
            hook.session_expired();
        }
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Issue a request and decode the JSON response.
    ///
    /// Returns `Ok(None)` for `204 No Content` without touching the body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<T>, Error> {
        let resp = self.send(path, options).await?;

        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map(Some).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Issue a request whose response body is not needed.
    pub async fn request_empty(&self, path: &str, options: RequestOptions) -> Result<(), Error> {
        self.send(path, options).await?;
        Ok(())
    }

    /// Like [`request`](Self::request), but a missing body is an error.
    pub(crate) async fn request_body<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, Error> {
        self.request(path, options)
            .await?
            .ok_or_else(|| Error::Deserialization {
                message: format!("expected a response body from {path}, got 204 No Content"),
                body: String::new(),
            })
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(Url::parse(&format!("{}{path}", self.base_url))?)
    }

    async fn send(&self, path: &str, options: RequestOptions) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        let RequestOptions {
            method,
            mut headers,
            body,
        } = options;

        if let Some(token) = self.tokens.access_token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| {
                    Error::TokenStore(format!("stored access token is not a valid header: {e}"))
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        debug!("{method} {url}");

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let resp = builder.send().await?;
        self.check_status(resp).await
    }

    async fn check_status(&self, resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let raw = resp.text().await.unwrap_or_default();
            let message = if raw.is_empty() {
                format!("Request failed with {}", status.as_u16())
            } else {
                raw
            };
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp)
    }

    fn handle_unauthorized(&self) {
        if let Err(e) = self.tokens.clear_tokens() {
            warn!(error = %e, "failed to clear stored tokens after 401");
        }
        warn!("session expired; stored tokens cleared");
        self.notify_session_expired();
    }
}
