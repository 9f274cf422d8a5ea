// Public site fetch
//
// Server-side, unauthenticated read of a site document by slug. Every
// call goes to the network: no client-side cache and `no-store` on the
// request so intermediaries don't serve a stale copy either.

use reqwest::header::{CACHE_CONTROL, HeaderValue};
use tracing::debug;

use crate::client::path_segment;
use crate::error::Error;
use crate::transport::{TransportConfig, normalize_base_url};
use crate::types::PublicSiteResponse;

/// Setting name reported when the rendering backend base URL is missing.
pub const BACKEND_BASE_URL_SETTING: &str = "backend_base_url";

/// Client for the public `GET /s/{slug}` endpoint.
pub struct PublicClient {
    http: reqwest::Client,
    base_url: String,
}

impl PublicClient {
    /// Fails with [`Error::MissingBaseUrl`] when `base_url` is `None` or empty.
    pub fn new(base_url: Option<&str>, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    pub fn from_reqwest(base_url: Option<&str>, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url, BACKEND_BASE_URL_SETTING)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the site document for `slug`.
    ///
    /// Any non-success status is reported as `Ok(None)`; the caller shows
    /// its not-found state. Transport and decode failures are errors.
    pub async fn fetch_site(&self, slug: &str) -> Result<Option<PublicSiteResponse>, Error> {
        let url = url::Url::parse(&format!("{}/s/{}", self.base_url, path_segment(slug)))?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            debug!(slug, status = status.as_u16(), "public site unavailable");
            return Ok(None);
        }

        let body = resp.text().await?;
        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })
    }
}
