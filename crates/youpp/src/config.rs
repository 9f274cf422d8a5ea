//! CLI configuration: thin wrapper around `youpp_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (`--api-url`, `--backend-url`, `--timeout`, `--token`) and builds
//! the API clients the commands use.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;
use youpp_api::{ApiClient, MemoryTokenStore, PublicClient, TokenStore, TransportConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use youpp_config::{
    Config, KeyringTokenStore, Profile, Settings, config_path, load_config,
    load_config_or_default, save_config, validate_base_url,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for error help, or `(none)`.
pub fn available_profiles(config: &Config) -> String {
    let names = config.profile_names();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Profile values with flag (and flag env var) overrides applied.
pub fn resolve_settings(global: &GlobalOpts) -> Result<Settings, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    // An empty config lets env vars and flags stand in for any profile.
    if global.profile.is_some()
        && !cfg.profiles.is_empty()
        && !cfg.profiles.contains_key(&profile_name)
    {
        return Err(CliError::ProfileNotFound {
            available: available_profiles(&cfg),
            name: profile_name,
        });
    }

    let mut settings = Settings::from_config(&cfg, &profile_name);

    if let Some(ref url) = global.api_url {
        settings.api_base_url = Some(url.clone());
    }
    if let Some(ref url) = global.backend_url {
        settings.backend_base_url = Some(url.clone());
    }
    if let Some(secs) = global.timeout {
        settings.timeout = Duration::from_secs(secs);
    }

    Ok(settings)
}

/// Token store for this invocation: `--token` wins over the keyring.
pub fn token_store(global: &GlobalOpts, settings: &Settings) -> Arc<dyn TokenStore> {
    match global.token.as_deref().filter(|t| !t.is_empty()) {
        Some(token) => Arc::new(MemoryTokenStore::with_access_token(token)),
        None => Arc::new(KeyringTokenStore::new(settings.profile.clone())),
    }
}

/// Admin API client. Fails before any request when `api_base_url` is unset.
pub fn api_client(global: &GlobalOpts, settings: &Settings) -> Result<ApiClient, CliError> {
    let base_url = validate_base_url("api_base_url", settings.require_api_base_url()?)?;
    let transport = TransportConfig::default().with_timeout(settings.timeout);

    let client = ApiClient::new(Some(&base_url), &transport, token_store(global, settings))?
        .with_session_hook(Arc::new(|| {
            warn!("session expired; sign in again with `youpp login`");
        }));
    Ok(client)
}

/// Public page client. Fails when `backend_base_url` is unset.
pub fn public_client(settings: &Settings) -> Result<PublicClient, CliError> {
    let base_url = validate_base_url("backend_base_url", settings.require_backend_base_url()?)?;
    let transport = TransportConfig::default().with_timeout(settings.timeout);
    Ok(PublicClient::new(Some(&base_url), &transport)?)
}
