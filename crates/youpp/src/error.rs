//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use youpp_config::ConfigError;
use youpp_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the youpp backend")]
    #[diagnostic(
        code(youpp::connection_failed),
        help(
            "Check that the backend is running and the base URL is right.\n\
             Reason: {reason}"
        )
    )]
    ConnectionFailed { reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Not signed in")]
    #[diagnostic(
        code(youpp::not_signed_in),
        help("Run: youpp login --profile {profile}")
    )]
    NotSignedIn { profile: String },

    #[error("Unauthorized")]
    #[diagnostic(
        code(youpp::unauthorized),
        help(
            "The stored session was rejected and has been cleared.\n\
             Run: youpp login --profile {profile}"
        )
    )]
    Unauthorized { profile: String },

    #[error("Login failed: {message}")]
    #[diagnostic(
        code(youpp::login_failed),
        help("Check the email and password for profile '{profile}'.")
    )]
    LoginFailed { profile: String, message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("No site yet")]
    #[diagnostic(
        code(youpp::no_site),
        help("Create one with: youpp site create --name <NAME>")
    )]
    NoSite,

    #[error("Site '{slug}' not found")]
    #[diagnostic(
        code(youpp::site_not_found),
        help("The site does not exist or is not published yet.")
    )]
    SiteNotFound { slug: String },

    #[error("A site already exists: {slug}")]
    #[diagnostic(
        code(youpp::site_exists),
        help("Each account edits one site. Use: youpp site edit")
    )]
    SiteExists { slug: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(youpp::request_failed))]
    RequestFailed { status: u16, message: String },

    #[error("Unexpected response: {message}")]
    #[diagnostic(code(youpp::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(youpp::invalid_input))]
    InvalidInput { message: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(youpp::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("{setting} is not configured")]
    #[diagnostic(
        code(youpp::missing_base_url),
        help(
            "Set it with: youpp config set {setting} <URL> --profile {profile}\n\
             Or export {env_var}."
        )
    )]
    MissingBaseUrl {
        setting: String,
        profile: String,
        env_var: String,
    },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(youpp::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: youpp config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(youpp::config))]
    ConfigInvalid { message: String },

    #[error(transparent)]
    #[diagnostic(code(youpp::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    #[diagnostic(code(youpp::output))]
    Output(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotSignedIn { .. } | Self::Unauthorized { .. } | Self::LoginFailed { .. } => {
                exit_code::AUTH
            }
            Self::NoSite | Self::SiteNotFound { .. } | Self::RequestFailed { status: 404, .. } => {
                exit_code::NOT_FOUND
            }
            Self::SiteExists { .. } | Self::RequestFailed { status: 409, .. } => {
                exit_code::CONFLICT
            }
            Self::InvalidInput { .. }
            | Self::Validation { .. }
            | Self::MissingBaseUrl { .. }
            | Self::ProfileNotFound { .. }
            | Self::ConfigInvalid { .. }
            | Self::Config(_) => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach the active profile to errors that suggest `youpp login`.
    pub fn from_core(err: CoreError, profile: &str) -> Self {
        match err {
            CoreError::NotAuthenticated => Self::NotSignedIn {
                profile: profile.to_owned(),
            },
            CoreError::Unauthorized => Self::Unauthorized {
                profile: profile.to_owned(),
            },
            other => other.into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Config { message } => CliError::ConfigInvalid { message },
            CoreError::NotAuthenticated => CliError::NotSignedIn {
                profile: "default".into(),
            },
            CoreError::Unauthorized => CliError::Unauthorized {
                profile: "default".into(),
            },
            CoreError::NoSite => CliError::NoSite,
            CoreError::SiteExists { slug } => CliError::SiteExists { slug },
            CoreError::Validation { message } => CliError::InvalidInput { message },
            CoreError::Request { status, message } => CliError::RequestFailed { status, message },
            CoreError::ConnectionFailed { reason } => CliError::ConnectionFailed { reason },
            CoreError::Internal { message } => CliError::ApiError { message },
        }
    }
}

impl From<youpp_api::Error> for CliError {
    fn from(err: youpp_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::MissingBaseUrl { profile, field } => CliError::MissingBaseUrl {
                setting: field.into(),
                env_var: format!("YOUPP_{}", field.to_uppercase()),
                profile,
            },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
            ConfigError::Serialization(e) => CliError::ConfigInvalid {
                message: e.to_string(),
            },
        }
    }
}
