// ── Domain model ──

pub mod section;
pub mod site;

pub use section::{
    CtaData, HeroData, Section, SectionError, SectionKind, find_section, parse_lenient, parse_sections,
    parse_sections_lenient, validate,
};
pub use site::{Site, SiteStatus};
