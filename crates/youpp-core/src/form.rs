// ── Editable form state ──
//
// Flat string fields edited one at a time, and the conversions between
// them and the section list that gets saved.

use crate::error::{CREATE_SITE_INCOMPLETE, CoreError};
use crate::model::{CtaData, HeroData, Section, find_section};
use crate::slug::slugify;

/// Hero and CTA fields as the editor shows them. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentForm {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button_text: String,
    pub hero_button_href: String,
    pub cta_title: String,
    pub cta_button_text: String,
    pub cta_button_href: String,
}

impl ContentForm {
    /// Fill the form from the first `hero` and first `cta` in `sections`.
    /// Missing sections and fields become empty strings.
    pub fn hydrate(sections: &[Section]) -> Self {
        let mut form = Self::default();

        if let Some(Section::Hero(hero)) = find_section(sections, "hero") {
            form.hero_title.clone_from(&hero.title);
            form.hero_subtitle = hero.subtitle.clone().unwrap_or_default();
            form.hero_button_text = hero.button_text.clone().unwrap_or_default();
            form.hero_button_href = hero.button_href.clone().unwrap_or_default();
        }
        if let Some(Section::Cta(cta)) = find_section(sections, "cta") {
            form.cta_title.clone_from(&cta.title);
            form.cta_button_text = cta.button_text.clone().unwrap_or_default();
            form.cta_button_href = cta.button_href.clone().unwrap_or_default();
        }

        form
    }

    /// The save payload: always exactly `[hero, cta]`.
    ///
    /// `title` is always present. Empty optional fields are left out.
    pub fn to_sections(&self) -> Vec<Section> {
        vec![
            Section::Hero(HeroData {
                title: self.hero_title.clone(),
                subtitle: non_empty(&self.hero_subtitle),
                button_text: non_empty(&self.hero_button_text),
                button_href: non_empty(&self.hero_button_href),
            }),
            Section::Cta(CtaData {
                title: self.cta_title.clone(),
                button_text: non_empty(&self.cta_button_text),
                button_href: non_empty(&self.cta_button_href),
            }),
        ]
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Name + slug entry for creating a site.
///
/// The slug follows the name until it is edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateSiteForm {
    name: String,
    slug: String,
    slug_touched: bool,
}

impl CreateSiteForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn slug_touched(&self) -> bool {
        self.slug_touched
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        if !self.slug_touched {
            self.slug = slugify(&self.name);
        }
    }

    /// Set the slug by hand. Later name changes no longer touch it.
    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
        self.slug_touched = true;
    }

    /// `(name, slug)` when both are non-blank.
    pub fn validate(&self) -> Result<(&str, &str), CoreError> {
        let name = self.name.trim();
        let slug = self.slug.trim();
        if name.is_empty() || slug.is_empty() {
            return Err(CoreError::validation(CREATE_SITE_INCOMPLETE));
        }
        Ok((name, slug))
    }
}
