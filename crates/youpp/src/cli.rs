//! Clap derive structures for the `youpp` CLI.
//!
//! Defines the command tree, global flags, and shared types. Also pulled
//! into `build.rs` for man page generation, so it depends on clap only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// youpp -- edit, publish, and render youpp sites from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "youpp",
    version,
    about = "Edit, publish, and render youpp sites",
    long_about = "Command-line front end for the youpp site builder.\n\n\
        Signs in to the admin API, edits the hero and call-to-action\n\
        sections of your site, toggles publishing, and renders public\n\
        pages the way visitors see them.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "YOUPP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Admin API base URL (overrides profile)
    #[arg(long, env = "YOUPP_API_BASE_URL", global = true)]
    pub api_url: Option<String>,

    /// Backend base URL for public pages (overrides profile)
    #[arg(long, env = "YOUPP_BACKEND_BASE_URL", global = true)]
    pub backend_url: Option<String>,

    /// Access token to use instead of the stored session
    #[arg(long, env = "YOUPP_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "YOUPP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "YOUPP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in to the admin API and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Edit and publish your site
    #[command(alias = "s")]
    Site(SiteArgs),

    /// Render a published site as visitors see it
    Render(RenderArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email, then a prompt)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub command: SiteCommand,
}

#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// Show the site, its status, and its content fields
    Show,

    /// List the site's sections in display order
    #[command(alias = "ls")]
    Sections,

    /// Create your site
    Create {
        /// Display name
        #[arg(long, short = 'n')]
        name: String,

        /// URL slug (derived from the name when omitted)
        #[arg(long)]
        slug: Option<String>,
    },

    /// Change content fields and save
    Edit(EditArgs),

    /// Make the site public
    Publish,

    /// Take the site offline
    Unpublish,

    /// Publish a draft or unpublish a live site
    Toggle,

    /// Render the site's current content locally
    Preview,
}

/// Content fields. Anything not given keeps its current value; pass an
/// empty string to clear an optional field.
#[derive(Debug, Default, Args)]
pub struct EditArgs {
    /// Hero title
    #[arg(long)]
    pub hero_title: Option<String>,

    /// Hero subtitle
    #[arg(long)]
    pub hero_subtitle: Option<String>,

    /// Hero button label
    #[arg(long)]
    pub hero_button_text: Option<String>,

    /// Hero button link
    #[arg(long)]
    pub hero_button_href: Option<String>,

    /// Call-to-action title
    #[arg(long)]
    pub cta_title: Option<String>,

    /// Call-to-action button label
    #[arg(long)]
    pub cta_button_text: Option<String>,

    /// Call-to-action button link
    #[arg(long)]
    pub cta_button_href: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RENDER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Public slug of the site
    pub slug: String,

    /// Write the HTML here instead of stdout
    #[arg(long, short = 'O')]
    pub out: Option<std::path::PathBuf>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: api_base_url, backend_base_url, email, or timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
