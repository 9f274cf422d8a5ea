//! Domain layer between `youpp-api` and the CLI.
//!
//! - **Section model** ([`model`]): the `hero` / `cta` tagged union, its
//!   validation, and first-match lookup. Unknown kinds are preserved.
//! - **Rendering** ([`render`]): HTML for each section kind and for the
//!   public page and not-found documents.
//! - **[`SiteEditor`]**: the admin flow. Loads the first site, binds a
//!   [`ContentForm`] to it, and issues create/save/publish requests.
//! - **[`PublicPage`]**: the visitor-facing state for a slug.

pub mod editor;
pub mod error;
pub mod form;
pub mod model;
pub mod public;
pub mod render;
pub mod slug;

pub use editor::SiteEditor;
pub use error::CoreError;
pub use form::{ContentForm, CreateSiteForm};
pub use model::{
    CtaData, HeroData, Section, SectionError, SectionKind, Site, SiteStatus, find_section,
    parse_lenient, parse_sections, parse_sections_lenient, validate,
};
pub use public::{PublicPage, load_public_page};
pub use render::{render_not_found, render_page, render_section, render_sections};
pub use slug::slugify;
