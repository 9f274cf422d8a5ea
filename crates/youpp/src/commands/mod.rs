//! Command dispatch: bridges CLI args -> youpp-core operations -> output.

pub mod auth;
pub mod config_cmd;
pub mod render;
pub mod site;

use youpp_config::Settings;
use youpp_core::SiteEditor;

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let settings = config::resolve_settings(global)?;
    tracing::debug!(profile = %settings.profile, "resolved settings");

    match cmd {
        Command::Login(args) => auth::login(&args, &settings, global).await,
        Command::Logout => auth::logout(&settings, global),
        Command::Site(args) => site::handle(args, &settings, global).await,
        Command::Render(args) => render::handle(args, &settings, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}

/// Build the admin client and load the signed-in user's site.
pub(crate) async fn open_editor(
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<SiteEditor, CliError> {
    let api = config::api_client(global, settings)?;
    SiteEditor::load(api)
        .await
        .map_err(|e| CliError::from_core(e, &settings.profile))
}
