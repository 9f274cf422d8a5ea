//! Site command handlers.

use std::fmt::Write as _;

use tabled::Tabled;
use youpp_config::Settings;
use youpp_core::{ContentForm, Section, Site, SiteEditor, SiteStatus, render_page};

use crate::cli::{EditArgs, GlobalOpts, SiteArgs, SiteCommand};
use crate::error::CliError;
use crate::output;

use super::open_editor;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct SectionRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
}

fn section_row(section: &Section) -> SectionRow {
    SectionRow {
        kind: section.kind_name().to_owned(),
        title: section.title().unwrap_or("-").to_owned(),
    }
}

// ── Detail views ────────────────────────────────────────────────────

fn site_detail(site: &Site, form: &ContentForm, saved: &str, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", site.name);
    let _ = writeln!(out, "Slug:        {}", site.slug);
    let _ = writeln!(out, "Status:      {}", output::status_label(site.status, color));
    let _ = writeln!(out, "Sections:    {}", site.sections.len());
    let _ = writeln!(out, "Last saved:  {saved}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Hero");
    let _ = writeln!(out, "  title:       {}", form.hero_title);
    let _ = writeln!(out, "  subtitle:    {}", form.hero_subtitle);
    let _ = writeln!(out, "  button:      {}", form.hero_button_text);
    let _ = writeln!(out, "  button link: {}", form.hero_button_href);
    let _ = writeln!(out);
    let _ = writeln!(out, "Call to action");
    let _ = writeln!(out, "  title:       {}", form.cta_title);
    let _ = writeln!(out, "  button:      {}", form.cta_button_text);
    let _ = write!(out, "  button link: {}", form.cta_button_href);
    out
}

/// Copy every given flag onto the form. Returns whether anything changed.
fn apply_edits(form: &mut ContentForm, edits: EditArgs) -> bool {
    let fields = [
        (&mut form.hero_title, edits.hero_title),
        (&mut form.hero_subtitle, edits.hero_subtitle),
        (&mut form.hero_button_text, edits.hero_button_text),
        (&mut form.hero_button_href, edits.hero_button_href),
        (&mut form.cta_title, edits.cta_title),
        (&mut form.cta_button_text, edits.cta_button_text),
        (&mut form.cta_button_href, edits.cta_button_href),
    ];

    let mut changed = false;
    for (slot, value) in fields {
        if let Some(value) = value {
            *slot = value;
            changed = true;
        }
    }
    changed
}

fn require_site(editor: &SiteEditor) -> Result<&Site, CliError> {
    editor.site().ok_or(CliError::NoSite)
}

fn announce(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("✓ {message}");
    }
}

fn status_change(global: &GlobalOpts, status: SiteStatus) {
    let verb = if status.is_published() {
        "Site published"
    } else {
        "Site unpublished"
    };
    announce(global, verb);
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: SiteArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut editor = open_editor(settings, global).await?;
    let profile = settings.profile.as_str();
    let color = output::should_color(global.color);

    match args.command {
        SiteCommand::Show => {
            let site = require_site(&editor)?;
            let saved = editor.last_saved_label();
            let out = output::render_single(
                global.output,
                site,
                |s| site_detail(s, editor.form(), &saved, color),
                |s| s.slug.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SiteCommand::Sections => {
            let site = require_site(&editor)?;
            let out = output::render_list(global.output, &site.sections, section_row, |s| {
                s.kind_name().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SiteCommand::Create { name, slug } => {
            let form = editor.create_form_mut();
            form.set_name(name);
            if let Some(slug) = slug {
                form.set_slug(slug);
            }

            let site = editor
                .create_site()
                .await
                .map_err(|e| CliError::from_core(e, profile))?;
            let out = output::render_single(
                global.output,
                site,
                |s| format!("{} ({})", s.name, s.slug),
                |s| s.slug.clone(),
            )?;
            announce(global, "Site created");
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SiteCommand::Edit(edits) => {
            require_site(&editor)?;
            if !apply_edits(editor.form_mut(), edits) {
                return Err(CliError::InvalidInput {
                    message: "Nothing to change. Pass at least one field flag, e.g. --hero-title"
                        .into(),
                });
            }
            editor
                .save()
                .await
                .map_err(|e| CliError::from_core(e, profile))?;
            announce(global, &format!("Saved at {}", editor.last_saved_label()));
            Ok(())
        }

        SiteCommand::Publish => {
            let status = editor
                .publish()
                .await
                .map_err(|e| CliError::from_core(e, profile))?;
            status_change(global, status);
            Ok(())
        }

        SiteCommand::Unpublish => {
            let status = editor
                .unpublish()
                .await
                .map_err(|e| CliError::from_core(e, profile))?;
            status_change(global, status);
            Ok(())
        }

        SiteCommand::Toggle => {
            let status = editor
                .toggle_publish()
                .await
                .map_err(|e| CliError::from_core(e, profile))?;
            status_change(global, status);
            Ok(())
        }

        SiteCommand::Preview => {
            let site = require_site(&editor)?;
            print!("{}", render_page(&site.slug, &site.sections));
            Ok(())
        }
    }
}
