// Token persistence in the OS keyring.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use youpp_api::{Error, TokenStore};

/// Keyring service name shared by every youpp profile.
pub const KEYRING_SERVICE: &str = "youpp";

/// [`TokenStore`] backed by the system keyring.
///
/// Entries are `<profile>/<key>` under [`KEYRING_SERVICE`], so each
/// profile keeps its own session. An unreadable keyring reads as "no
/// token".
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    profile: String,
}

impl KeyringTokenStore {
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            profile: profile.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn entry_name(&self, key: &str) -> String {
        format!("{}/{key}", self.profile)
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, Error> {
        keyring::Entry::new(KEYRING_SERVICE, &self.entry_name(key))
            .map_err(|e| Error::TokenStore(e.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: &str) -> Option<SecretString> {
        match self.entry(key).map(|entry| entry.get_password()) {
            Ok(Ok(value)) => Some(SecretString::from(value)),
            Ok(Err(keyring::Error::NoEntry)) => None,
            Ok(Err(e)) => {
                debug!(key, error = %e, "keyring read failed");
                None
            }
            Err(e) => {
                debug!(key, error = %e, "keyring unavailable");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &SecretString) -> Result<(), Error> {
        self.entry(key)?
            .set_password(value.expose_secret())
            .map_err(|e| Error::TokenStore(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Error::TokenStore(e.to_string())),
        }
    }
}
