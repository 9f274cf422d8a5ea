// Admin site endpoints
//
// Listing, creation, full-replace content saves, and publish toggles.
// Save and publish responses carry no required body and are ignored.

use serde::Serialize;
use tracing::debug;

use crate::client::{ApiClient, RequestOptions, path_segment};
use crate::error::Error;
use crate::types::{CreateSiteRequest, SaveContentBody, SaveContentRequest, SiteResponse};

impl ApiClient {
    /// List the sites owned by the signed-in user, in backend order.
    ///
    /// `GET /api/sites`. A 204 reads as an empty list.
    pub async fn list_sites(&self) -> Result<Vec<SiteResponse>, Error> {
        debug!("listing sites");
        Ok(self
            .request("/api/sites", RequestOptions::get())
            .await?
            .unwrap_or_default())
    }

    /// `POST /api/sites`
    pub async fn create_site(&self, name: &str, slug: &str) -> Result<SiteResponse, Error> {
        debug!(name, slug, "creating site");
        let body = CreateSiteRequest { name, slug };
        self.request_body("/api/sites", RequestOptions::post().json(&body)?)
            .await
    }

    /// Replace the site's section list.
    ///
    /// `PUT /api/sites/{id}/content` with `{ content: { sections } }`.
    pub async fn save_content<S: Serialize + Sync>(
        &self,
        site_id: &str,
        sections: &[S],
    ) -> Result<(), Error> {
        debug!(site_id, count = sections.len(), "saving content");
        let body = SaveContentRequest {
            content: SaveContentBody { sections },
        };
        let path = format!("/api/sites/{}/content", path_segment(site_id));
        self.request_empty(&path, RequestOptions::put().json(&body)?)
            .await
    }

    /// `POST /api/sites/{id}/publish`
    pub async fn publish_site(&self, site_id: &str) -> Result<(), Error> {
        debug!(site_id, "publishing site");
        let path = format!("/api/sites/{}/publish", path_segment(site_id));
        self.request_empty(&path, RequestOptions::post()).await
    }

    /// `POST /api/sites/{id}/unpublish`
    pub async fn unpublish_site(&self, site_id: &str) -> Result<(), Error> {
        debug!(site_id, "unpublishing site");
        let path = format!("/api/sites/{}/unpublish", path_segment(site_id));
        self.request_empty(&path, RequestOptions::post()).await
    }
}
