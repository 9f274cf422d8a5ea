// ── Core error types ──
//
// User-facing errors from youpp-core. Transport details stay in
// `youpp_api::Error`; the `From` impl below folds them into the
// variants the editor and public page report to people.

use thiserror::Error;

/// Message shown when the create-site form is submitted incomplete.
pub const CREATE_SITE_INCOMPLETE: &str = "Please provide a name and slug for your site.";

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Session ──────────────────────────────────────────────────────
    /// No token stored; the session hook has already fired.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The backend rejected the token; stored tokens are gone.
    #[error("Unauthorized")]
    Unauthorized,

    // ── Editor state ─────────────────────────────────────────────────
    #[error("No site yet. Create one first.")]
    NoSite,

    #[error("A site already exists: {slug}")]
    SiteExists { slug: String },

    #[error("{message}")]
    Validation { message: String },

    // ── Backend ──────────────────────────────────────────────────────
    /// Non-success response; `message` is the backend's own text.
    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Cannot reach backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Unexpected response from backend: {message}")]
    Internal { message: String },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSite | Self::Request { status: 404, .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<youpp_api::Error> for CoreError {
    fn from(err: youpp_api::Error) -> Self {
        match err {
            youpp_api::Error::MissingBaseUrl { .. } | youpp_api::Error::InvalidUrl(_) => {
                CoreError::Config {
                    message: err.to_string(),
                }
            }
            youpp_api::Error::Unauthorized => CoreError::Unauthorized,
            youpp_api::Error::NotAuthenticated => CoreError::NotAuthenticated,
            youpp_api::Error::RequestFailed { status, message } => {
                CoreError::Request { status, message }
            }
            youpp_api::Error::Transport(ref e) => {
                if let Some(status) = e.status() {
                    CoreError::Request {
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                }
            }
            youpp_api::Error::TokenStore(message) => CoreError::Config {
                message: format!("Token store: {message}"),
            },
            youpp_api::Error::Serialization(e) => CoreError::Internal {
                message: e.to_string(),
            },
            youpp_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal { message }
            }
        }
    }
}
