//! Clap derive structures for the `motioneye` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// motioneye -- query and drive a motionEye server from the shell
#[derive(Debug, Parser)]
#[command(
    name = "motioneye",
    version,
    about = "Query and control motionEye surveillance servers",
    long_about = "A command-line client for the motionEye HTTP API.\n\n\
        Every request is signed with the configured admin or surveillance\n\
        credentials; media URLs can be generated offline.",
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
    /// Server profile to use
    #[arg(long, short = 'p', env = "MOTIONEYE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Server URL (overrides profile)
    #[arg(long, short = 'u', env = "MOTIONEYE_URL", global = true)]
    pub url: Option<String>,

    /// Admin username
    #[arg(long, env = "MOTIONEYE_ADMIN_USERNAME", global = true)]
    pub admin_username: Option<String>,

    /// Admin password
    #[arg(long, env = "MOTIONEYE_ADMIN_PASSWORD", global = true, hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Surveillance username
    #[arg(long, env = "MOTIONEYE_SURVEILLANCE_USERNAME", global = true)]
    pub surveillance_username: Option<String>,

    /// Surveillance password
    #[arg(
        long,
        env = "MOTIONEYE_SURVEILLANCE_PASSWORD",
        global = true,
        hide_env_values = true
    )]
    pub surveillance_password: Option<String>,

    /// Output format (defaults to the config file's choice, then json)
    #[arg(long, short = 'o', env = "MOTIONEYE_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, env = "MOTIONEYE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the admin credentials are accepted
    Login,

    /// Show the server manifest (versions and capabilities)
    Manifest,

    /// Show the main server configuration
    ServerConfig,

    /// List all cameras
    #[command(alias = "cams")]
    Cameras,

    /// Read or replace a single camera's configuration
    #[command(alias = "cam")]
    Camera(CameraArgs),

    /// Trigger a camera action (snapshot, record_start, preset1, ...)
    Action(ActionArgs),

    /// List recorded movies for a camera
    Movies(MediaListArgs),

    /// List captured images for a camera
    Images(MediaListArgs),

    /// Print signed media URLs
    Url(UrlArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Camera ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CameraArgs {
    #[command(subcommand)]
    pub command: CameraCommand,
}

#[derive(Debug, Subcommand)]
pub enum CameraCommand {
    /// Show a camera's configuration
    Get {
        /// Camera ID
        id: u32,
    },

    /// Replace a camera's configuration from a JSON file
    Set {
        /// Camera ID
        id: u32,

        /// JSON object with the camera configuration
        #[arg(long = "from-file", short = 'F')]
        from_file: PathBuf,
    },
}

// ── Actions and media listings ───────────────────────────────────────

#[derive(Debug, Args)]
pub struct ActionArgs {
    /// Camera ID
    pub id: u32,

    /// Action name, e.g. snapshot, record_start, lock, preset3
    pub action: String,
}

#[derive(Debug, Args)]
pub struct MediaListArgs {
    /// Camera ID
    pub id: u32,

    /// Only list entries under this folder prefix
    #[arg(long)]
    pub prefix: Option<String>,
}

// ── Media URLs ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UrlArgs {
    #[command(subcommand)]
    pub command: UrlCommand,
}

#[derive(Debug, Subcommand)]
pub enum UrlCommand {
    /// MJPEG stream URL (requires streaming to be enabled)
    Stream {
        /// Camera ID
        id: u32,
    },

    /// Current snapshot URL (requires streaming to be enabled)
    Snapshot {
        /// Camera ID
        id: u32,
    },

    /// Signed movie playback URL
    Movie(MediaUrlArgs),

    /// Signed image download URL
    Image(MediaUrlArgs),
}

#[derive(Debug, Args)]
pub struct MediaUrlArgs {
    /// Camera ID
    pub id: u32,

    /// Media path as returned by the listing, e.g. /2024-01-01/12-00-00.mp4
    pub path: String,

    /// Link to the preview thumbnail instead
    #[arg(long)]
    pub preview: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display the effective configuration (passwords masked)
    Show,

    /// List configured profiles (* marks the default)
    Profiles,

    /// Save a profile from --url, the credential flags and --timeout
    Add(AddProfileArgs),

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Delete a profile
    Remove {
        /// Profile name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct AddProfileArgs {
    /// Profile name
    pub name: String,

    /// Read the admin password from this environment variable
    #[arg(long)]
    pub admin_password_env: Option<String>,

    /// Read the surveillance password from this environment variable
    #[arg(long)]
    pub surveillance_password_env: Option<String>,

    /// Also make this the default profile
    #[arg(long)]
    pub default: bool,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
