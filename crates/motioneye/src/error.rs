//! CLI error types with miette diagnostics.
//!
//! Maps library and config errors into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use motioneye_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to motionEye at {url}")]
    #[diagnostic(
        code(motioneye::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed for {url}")]
    #[diagnostic(
        code(motioneye::auth_failed),
        help(
            "Verify the username and password for this endpoint.\n\
             Admin endpoints use --admin-username/--admin-password,\n\
             media endpoints use the surveillance credentials."
        )
    )]
    AuthFailed { url: String },

    // ── Requests ─────────────────────────────────────────────────────

    #[error("Request to {url} failed: {message}")]
    #[diagnostic(code(motioneye::request_failed))]
    RequestFailed { url: String, message: String },

    #[error("Camera {camera_id} is not streaming")]
    #[diagnostic(
        code(motioneye::not_streaming),
        help("Enable video streaming for the camera in motionEye, then retry.")
    )]
    NotStreaming { camera_id: u32 },

    #[error(transparent)]
    #[diagnostic(code(motioneye::client))]
    Client(motioneye_api::Error),

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(motioneye::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("No server URL configured for profile '{profile}'")]
    #[diagnostic(
        code(motioneye::no_url),
        help(
            "Pass --url, set MOTIONEYE_URL, or add a [profiles.{profile}] entry to\n\
             {path}"
        )
    )]
    NoUrl { profile: String, path: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(motioneye::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(motioneye::config))]
    Config(ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render JSON: {0}")]
    #[diagnostic(code(motioneye::json))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML: {0}")]
    #[diagnostic(code(motioneye::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::NoUrl { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Error mapping ────────────────────────────────────────────────────

impl From<motioneye_api::Error> for CliError {
    fn from(err: motioneye_api::Error) -> Self {
        use motioneye_api::Error;

        match err {
            Error::Connection { url, source } => CliError::ConnectionFailed {
                url,
                source: Box::new(source),
            },

            Error::Authentication { url } => CliError::AuthFailed { url },

            Error::InvalidUrl { url, reason } => CliError::Validation {
                field: "url".into(),
                reason: format!("{url}: {reason}"),
            },

            Error::InvalidPath(path) => CliError::Validation {
                field: "path".into(),
                reason: format!("'{path}' does not name a file"),
            },

            Error::Request { url, message, .. } => CliError::RequestFailed { url, message },

            other => CliError::Client(other),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::ProfileNotFound { name, available } => {
                CliError::ProfileNotFound { name, available }
            }
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_errors_map_to_exit_codes() {
        let auth: CliError = motioneye_api::Error::Authentication {
            url: "http://host/login".into(),
        }
        .into();
        assert_eq!(auth.exit_code(), exit_code::AUTH);

        let path: CliError = motioneye_api::Error::InvalidPath("/".into()).into();
        assert_eq!(path.exit_code(), exit_code::USAGE);

        let request: CliError = motioneye_api::Error::Request {
            url: "http://host/config/list".into(),
            status: Some(500),
            message: "Internal Server Error".into(),
        }
        .into();
        assert_eq!(request.exit_code(), exit_code::GENERAL);

        let closed: CliError = motioneye_api::Error::Closed.into();
        assert!(matches!(closed, CliError::Client(_)));
        assert_eq!(closed.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn config_validation_is_a_usage_error() {
        let err: CliError = ConfigError::Validation {
            field: "url".into(),
            reason: "missing host".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
