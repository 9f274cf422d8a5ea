use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use secrecy::SecretString;

use crate::error::Error;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "youpp.accessToken";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "youpp.refreshToken";

/// Access + refresh token pair issued by `POST /api/auth/login`.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: SecretString,
}

/// Key-value store that owns the token pair for one client context.
///
/// Implementations use interior mutability: the store is shared as
/// `Arc<dyn TokenStore>` and writes are last-write-wins. The provided
/// methods are the only way the rest of the workspace touches tokens.
pub trait TokenStore: Send + Sync {
    /// Read a value. Missing keys and unreadable backends both yield `None`.
    fn get(&self, key: &str) -> Option<SecretString>;

    fn set(&self, key: &str, value: &SecretString) -> Result<(), Error>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;

    fn access_token(&self) -> Option<SecretString> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn set_tokens(&self, tokens: &TokenPair) -> Result<(), Error> {
        self.set(ACCESS_TOKEN_KEY, &tokens.access_token)?;
        self.set(REFRESH_TOKEN_KEY, &tokens.refresh_token)
    }

    fn clear_tokens(&self) -> Result<(), Error> {
        self.remove(ACCESS_TOKEN_KEY)?;
        self.remove(REFRESH_TOKEN_KEY)
    }
}

/// Process-local token store. Used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: Mutex<HashMap<String, SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with an access token.
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::default();
        store
            .values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ACCESS_TOKEN_KEY.to_owned(), SecretString::from(token.to_owned()));
        store
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<SecretString> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &SecretString) -> Result<(), Error> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Store for contexts with no client-side storage (server-side rendering).
/// Reads nothing, writes nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTokenStore;

impl TokenStore for NoopTokenStore {
    fn get(&self, _key: &str) -> Option<SecretString> {
        None
    }

    fn set(&self, _key: &str, _value: &SecretString) -> Result<(), Error> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), Error> {
        Ok(())
    }
}

/// Side effect run when the session is gone: after a 401, or when an
/// authenticated screen is opened without a stored token. The CLI uses it
/// to point the user at `youpp login`.
pub trait SessionHook: Send + Sync {
    fn session_expired(&self);
}

impl<F> SessionHook for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self();
    }
}
