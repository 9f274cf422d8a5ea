// Shared transport configuration for building reqwest::Client instances.
//
// The admin client and the public site client share timeout and user-agent
// settings through this module, avoiding duplicated builder logic.

use std::time::Duration;

use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("youpp/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Transport)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Validate a configured base URL and strip trailing slashes.
///
/// `None` or an empty string is a [`Error::MissingBaseUrl`] naming
/// `setting`; a value that does not parse as an absolute URL is
/// [`Error::InvalidUrl`]. Paths are later appended by plain
/// concatenation, so `https://host/` and `https://host` are equivalent.
pub fn normalize_base_url(raw: Option<&str>, setting: &'static str) -> Result<String, Error> {
    let trimmed = raw
        .map(|v| v.trim().trim_end_matches('/'))
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingBaseUrl { setting })?;

    Url::parse(trimmed)?;
    Ok(trimmed.to_owned())
}
