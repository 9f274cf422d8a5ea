// ── HTML rendering ──
//
// One render function per known section kind, plus the page-level
// documents. Every piece of content is escaped; unknown kinds render
// as nothing.

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::warn;

use crate::model::{CtaData, HeroData, Section};

/// Link target used when a button has no href.
pub const DEFAULT_BUTTON_HREF: &str = "#";

/// Render one section.
///
/// Never fails. An unrecognised kind logs a warning in debug builds and
/// yields an empty string.
pub fn render_section(section: &Section) -> String {
    match section {
        Section::Hero(data) => render_hero(data),
        Section::Cta(data) => render_cta(data),
        Section::Unknown { kind, .. } => {
            if cfg!(debug_assertions) {
                warn!(kind = %kind, "unknown section type: {kind}");
            }
            String::new()
        }
    }
}

/// Render sections back to back, in sequence order.
pub fn render_sections(sections: &[Section]) -> String {
    sections.iter().map(render_section).collect()
}

fn render_hero(data: &HeroData) -> String {
    let mut html = String::from("<section class=\"section hero\">\n");
    html.push_str("<p class=\"eyebrow\">Highlight</p>\n");
    html.push_str(&format!("<h1>{}</h1>\n", encode_text(&data.title)));
    if let Some(subtitle) = present(data.subtitle.as_deref()) {
        html.push_str(&format!(
            "<p class=\"subtitle\">{}</p>\n",
            encode_text(subtitle)
        ));
    }
    push_button(&mut html, data.button_text.as_deref(), data.button_href.as_deref());
    html.push_str("</section>\n");
    html
}

fn render_cta(data: &CtaData) -> String {
    let mut html = String::from("<section class=\"section cta\">\n");
    html.push_str(&format!("<h2>{}</h2>\n", encode_text(&data.title)));
    push_button(&mut html, data.button_text.as_deref(), data.button_href.as_deref());
    html.push_str("</section>\n");
    html
}

fn push_button(html: &mut String, text: Option<&str>, href: Option<&str>) {
    let Some(text) = present(text) else {
        return;
    };
    let href = present(href).unwrap_or(DEFAULT_BUTTON_HREF);
    html.push_str(&format!(
        "<a class=\"button\" href=\"{}\">{}</a>\n",
        encode_double_quoted_attribute(href),
        encode_text(text)
    ));
}

/// Empty strings count as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ── Documents ───────────────────────────────────────────────────────

fn document(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        encode_text(title)
    )
}

/// A full public page: slug header, then every section in order.
pub fn render_page(slug: &str, sections: &[Section]) -> String {
    let body = format!(
        "<main class=\"site\">\n<header>\n<p class=\"eyebrow\">{}</p>\n<h1>Public site</h1>\n\
         </header>\n<div class=\"sections\">\n{}</div>\n</main>\n",
        encode_text(slug),
        render_sections(sections)
    );
    document(slug, &body)
}

/// The page served for a missing or unpublished site.
pub fn render_not_found() -> String {
    document(
        "Site not found",
        "<main class=\"not-found\">\n<p class=\"eyebrow\">404</p>\n<h1>Site not found</h1>\n\
         <p>The site you are looking for does not exist or is not published yet.</p>\n</main>\n",
    )
}
