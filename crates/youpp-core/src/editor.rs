// ── Site editor ──
//
// Admin-side state for the signed-in user's site: the site itself, the
// content form bound to its sections, the create form shown when there
// is no site yet, and the time of the last save. Every mutation is a
// single request; nothing here coordinates overlapping calls.

use chrono::{DateTime, Local};
use tracing::{debug, info};
use youpp_api::ApiClient;

use crate::error::CoreError;
use crate::form::{ContentForm, CreateSiteForm};
use crate::model::{Site, SiteStatus};

pub struct SiteEditor {
    api: ApiClient,
    site: Option<Site>,
    form: ContentForm,
    create_form: CreateSiteForm,
    last_saved_at: Option<DateTime<Local>>,
}

impl SiteEditor {
    /// Load the editor for the signed-in user.
    ///
    /// Without a stored access token the session hook fires and this
    /// returns [`CoreError::NotAuthenticated`] before any request is made.
    /// Otherwise the first site from the backend becomes the edited site
    /// and the content form is hydrated from its sections.
    pub async fn load(api: ApiClient) -> Result<Self, CoreError> {
        if !api.has_session() {
            api.notify_session_expired();
            return Err(CoreError::NotAuthenticated);
        }

        let site = api
            .list_sites()
            .await?
            .into_iter()
            .next()
            .map(Site::from);

        let form = site
            .as_ref()
            .map(|s| ContentForm::hydrate(&s.sections))
            .unwrap_or_default();

        match site {
            Some(ref s) => debug!(site_id = %s.id, slug = %s.slug, "loaded site"),
            None => debug!("no site yet"),
        }

        Ok(Self {
            api,
            site,
            form,
            create_form: CreateSiteForm::new(),
            last_saved_at: None,
        })
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn site(&self) -> Option<&Site> {
        self.site.as_ref()
    }

    /// Status of the loaded site; `Draft` when there is none.
    pub fn status(&self) -> SiteStatus {
        self.site.as_ref().map(|s| s.status).unwrap_or_default()
    }

    pub fn form(&self) -> &ContentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContentForm {
        &mut self.form
    }

    pub fn create_form(&self) -> &CreateSiteForm {
        &self.create_form
    }

    pub fn create_form_mut(&mut self) -> &mut CreateSiteForm {
        &mut self.create_form
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at
    }

    /// Local time of the last successful save, or `Never`.
    pub fn last_saved_label(&self) -> String {
        self.last_saved_at
            .map_or_else(|| "Never".to_owned(), |t| t.format("%H:%M:%S").to_string())
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Create a site from the create form.
    ///
    /// An incomplete form fails without a request.
    pub async fn create_site(&mut self) -> Result<&Site, CoreError> {
        if let Some(ref existing) = self.site {
            return Err(CoreError::SiteExists {
                slug: existing.slug.clone(),
            });
        }

        let (name, slug) = self.create_form.validate()?;
        let created = Site::from(self.api.create_site(name, slug).await?);
        info!(site_id = %created.id, slug = %created.slug, "site created");

        self.form = ContentForm::hydrate(&created.sections);
        Ok(self.site.insert(created))
    }

    /// Replace the site's sections with the form's `[hero, cta]` payload.
    pub async fn save(&mut self) -> Result<DateTime<Local>, CoreError> {
        let site = self.site.as_mut().ok_or(CoreError::NoSite)?;
        let sections = self.form.to_sections();

        self.api.save_content(&site.id, &sections).await?;

        let now = Local::now();
        site.sections = sections;
        self.last_saved_at = Some(now);
        info!(site_id = %site.id, "content saved");
        Ok(now)
    }

    pub async fn publish(&mut self) -> Result<SiteStatus, CoreError> {
        let site = self.site.as_mut().ok_or(CoreError::NoSite)?;
        self.api.publish_site(&site.id).await?;
        site.status = SiteStatus::Published;
        info!(site_id = %site.id, "site published");
        Ok(site.status)
    }

    pub async fn unpublish(&mut self) -> Result<SiteStatus, CoreError> {
        let site = self.site.as_mut().ok_or(CoreError::NoSite)?;
        self.api.unpublish_site(&site.id).await?;
        site.status = SiteStatus::Draft;
        info!(site_id = %site.id, "site unpublished");
        Ok(site.status)
    }

    /// Unpublish a published site, publish anything else. The local
    /// status flips only once the backend accepts the request.
    pub async fn toggle_publish(&mut self) -> Result<SiteStatus, CoreError> {
        if self.status().is_published() {
            self.unpublish().await
        } else {
            self.publish().await
        }
    }

    /// Forget the stored tokens.
    pub fn logout(&self) -> Result<(), CoreError> {
        self.api.logout()?;
        Ok(())
    }
}
