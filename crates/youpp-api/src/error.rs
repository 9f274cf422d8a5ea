use thiserror::Error;

/// Top-level error type for the `youpp-api` crate.
///
/// Covers every failure mode of a single-shot backend request:
/// configuration, authorization, transport, and response decoding.
/// `youpp-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required base URL setting is absent or empty.
    #[error("{setting} is not configured")]
    MissingBaseUrl { setting: &'static str },

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// The backend answered 401. Stored tokens have already been cleared
    /// and the session hook has fired by the time the caller sees this.
    #[error("Unauthorized")]
    Unauthorized,

    /// No access token is stored; the caller must sign in first.
    #[error("Not signed in")]
    NotAuthenticated,

    /// Reading or writing the token store failed.
    #[error("Token store error: {0}")]
    TokenStore(String),

    // ── Request ─────────────────────────────────────────────────────
    /// Non-success status other than 401. The message is the response
    /// body text, or a generic status line when the body was empty.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Data ────────────────────────────────────────────────────────
    /// Request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for misconfiguration that no retry can fix.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingBaseUrl { .. } | Self::InvalidUrl(_))
    }

    /// Returns `true` if signing in again might resolve this error.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotAuthenticated)
    }

    /// Returns `true` if the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RequestFailed { status, .. } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RequestFailed { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
