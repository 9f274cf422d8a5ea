//! Login and logout handlers.

use std::io::{self, BufRead};
use std::sync::Arc;

use dialoguer::Input;
use secrecy::SecretString;
use youpp_api::{ApiClient, TokenStore, TransportConfig};
use youpp_config::Settings;

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, KeyringTokenStore};
use crate::error::CliError;

use super::config_cmd::prompt_err;

const PASSWORD_ENV: &str = "YOUPP_PASSWORD";

fn resolve_email(args: &LoginArgs, settings: &Settings) -> Result<String, CliError> {
    if let Some(email) = args
        .email
        .clone()
        .or_else(|| settings.email.clone())
        .filter(|e| !e.trim().is_empty())
    {
        return Ok(email);
    }
    Input::new()
        .with_prompt("Email")
        .interact_text()
        .map_err(prompt_err)
}

fn resolve_password(args: &LoginArgs) -> Result<SecretString, CliError> {
    let password = if args.password_stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).to_owned()
    } else if let Some(pw) = std::env::var(PASSWORD_ENV).ok().filter(|p| !p.is_empty()) {
        pw
    } else {
        rpassword::prompt_password("Password: ").map_err(prompt_err)?
    };

    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(SecretString::from(password))
}

/// Sign in and persist the token pair in the keyring for this profile.
pub async fn login(
    args: &LoginArgs,
    settings: &Settings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let base_url = config::validate_base_url("api_base_url", settings.require_api_base_url()?)?;
    let email = resolve_email(args, settings)?;
    let password = resolve_password(args)?;

    let tokens: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore::new(settings.profile.clone()));
    let transport = TransportConfig::default().with_timeout(settings.timeout);
    let api = ApiClient::new(Some(&base_url), &transport, tokens)?;

    api.login(&email, &password)
        .await
        .map_err(|e| login_error(e, &settings.profile))?;

    if !global.quiet {
        eprintln!("✓ Signed in as {email} (profile '{}')", settings.profile);
    }
    Ok(())
}

/// Rejected credentials read as a failed login, not an expired session.
fn login_error(err: youpp_api::Error, profile: &str) -> CliError {
    match err {
        youpp_api::Error::Unauthorized => CliError::LoginFailed {
            profile: profile.to_owned(),
            message: err.to_string(),
        },
        youpp_api::Error::RequestFailed { status, message } if (400..500).contains(&status) => {
            CliError::LoginFailed {
                profile: profile.to_owned(),
                message,
            }
        }
        other => other.into(),
    }
}

/// Forget the stored session for this profile. No request is made.
pub fn logout(settings: &Settings, global: &GlobalOpts) -> Result<(), CliError> {
    KeyringTokenStore::new(settings.profile.clone()).clear_tokens()?;
    if !global.quiet {
        eprintln!("✓ Signed out of profile '{}'", settings.profile);
    }
    Ok(())
}
