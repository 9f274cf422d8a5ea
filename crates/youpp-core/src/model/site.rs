// ── Site domain type ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use youpp_api::SiteResponse;

use super::section::{Section, parse_sections_lenient};

/// Publish state. Anything the backend sends outside this set reads as
/// `Draft`, which is also what a site without a status is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    #[default]
    Draft,
    Published,
}

impl SiteStatus {
    pub fn from_wire(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn is_published(self) -> bool {
        self == Self::Published
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Draft => Self::Published,
            Self::Published => Self::Draft,
        }
    }
}

/// An editable site: identity, publish state, and its ordered sections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub status: SiteStatus,
    /// Display order.
    pub sections: Vec<Section>,
}

/// Sections are read leniently so stored content the editor cannot
/// interpret never blocks loading the site.
impl From<SiteResponse> for Site {
    fn from(resp: SiteResponse) -> Self {
        let sections = resp
            .content
            .and_then(|c| c.sections)
            .map(|raw| parse_sections_lenient(&raw))
            .unwrap_or_default();
        Self {
            status: SiteStatus::from_wire(resp.status.as_deref()),
            id: resp.id,
            name: resp.name,
            slug: resp.slug,
            sections,
        }
    }
}
