//! Public page rendering.

use youpp_config::Settings;
use youpp_core::{PublicPage, load_public_page};

use crate::cli::{GlobalOpts, OutputFormat, RenderArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Fetch `slug` from the public backend and emit the page a visitor gets.
///
/// A missing or unpublished site still produces the not-found document,
/// then fails with `SiteNotFound` so scripts can tell the difference.
pub async fn handle(
    args: RenderArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = config::public_client(settings)?;
    let page = load_public_page(&client, &args.slug).await?;

    let body = match global.output {
        OutputFormat::Table | OutputFormat::Plain => page.render(),
        structured => output::render_single(structured, &page, PublicPage::render, |_| {
            String::new()
        })?,
    };

    match args.out {
        Some(ref path) => {
            std::fs::write(path, &body)?;
            if !global.quiet {
                eprintln!("✓ Wrote {}", path.display());
            }
        }
        None if !global.quiet => print!("{body}"),
        None => {}
    }

    if page.is_found() {
        Ok(())
    } else {
        Err(CliError::SiteNotFound { slug: args.slug })
    }
}
