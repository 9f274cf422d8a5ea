// ── Public site page ──

use serde::Serialize;
use tracing::debug;
use youpp_api::{PublicClient, PublicSiteResponse};

use crate::error::CoreError;
use crate::model::{Section, parse_sections_lenient};
use crate::render::{render_not_found, render_page};

/// What a visitor sees at `/s/{slug}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PublicPage {
    /// Missing, or explicitly `published: false`. Never partial content.
    NotFound,
    Published {
        slug: String,
        updated: Option<String>,
        sections: Vec<Section>,
    },
}

impl PublicPage {
    /// Decide the page state from a fetch result.
    ///
    /// A document without a `published` flag counts as visible. Sections
    /// are read leniently, so one malformed entry never hides the page.
    pub fn from_response(resp: Option<PublicSiteResponse>) -> Self {
        let Some(doc) = resp else {
            return Self::NotFound;
        };
        if doc.published == Some(false) {
            return Self::NotFound;
        }

        let sections = doc
            .content
            .and_then(|c| c.sections)
            .map(|raw| parse_sections_lenient(&raw))
            .unwrap_or_default();
        Self::Published {
            slug: doc.slug,
            updated: doc.updated,
            sections,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Published { .. })
    }

    /// The full HTML document for this state.
    pub fn render(&self) -> String {
        match self {
            Self::NotFound => render_not_found(),
            Self::Published { slug, sections, .. } => render_page(slug, sections),
        }
    }
}

/// Fetch `slug` fresh from the backend and resolve the page state.
pub async fn load_public_page(client: &PublicClient, slug: &str) -> Result<PublicPage, CoreError> {
    let page = PublicPage::from_response(client.fetch_site(slug).await?);
    debug!(slug, found = page.is_found(), "resolved public page");
    Ok(page)
}
