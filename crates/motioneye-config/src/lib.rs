//! Shared configuration for motionEye tools.
//!
//! TOML profiles, credential resolution (env + plaintext), and translation
//! to `motioneye_api::ClientConfig`. The CLI layers its flag overrides on
//! top of this.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use motioneye_api::request::parse_base_url;
use motioneye_api::{
    ClientConfig, Credentials, DEFAULT_ADMIN_USERNAME, DEFAULT_SURVEILLANCE_USERNAME,
    TransportConfig,
};

/// Prefix for environment overrides, e.g. `MOTIONEYE_DEFAULTS__TIMEOUT=10`.
pub const ENV_PREFIX: &str = "MOTIONEYE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found (available: {available})")]
    ProfileNotFound { name: String, available: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named motionEye server.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "http://192.168.1.10:8765").
    pub url: String,

    pub admin_username: Option<String>,
    /// Admin password (plaintext -- prefer `admin_password_env`).
    pub admin_password: Option<String>,
    /// Environment variable holding the admin password.
    pub admin_password_env: Option<String>,

    pub surveillance_username: Option<String>,
    /// Surveillance password (plaintext -- prefer `surveillance_password_env`).
    pub surveillance_password: Option<String>,
    /// Environment variable holding the surveillance password.
    pub surveillance_password_env: Option<String>,

    /// Override the default timeout.
    pub timeout: Option<u64>,
}

impl Config {
    /// Look up a profile, falling back to `default_profile` then `"default"`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .map(String::from)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into());

        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::ProfileNotFound {
                available: self.profile_names(),
                name,
            }),
        }
    }

    fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            return "none".into();
        }
        self.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "motioneye", "motioneye").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("motioneye");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` (missing file is fine) + environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = file_figment(path).merge(Env::prefixed(ENV_PREFIX).split("__"));
    Ok(figment.extract()?)
}

/// Load only what is written in `path`, for editing and saving back.
///
/// Environment overrides are left out so they never end up on disk.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    Ok(file_figment(path).extract()?)
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Password from a named env var, else plaintext, else empty.
fn resolve_password(env_name: Option<&str>, plaintext: Option<&str>) -> SecretString {
    if let Some(val) = env_name.and_then(|name| std::env::var(name).ok()) {
        return SecretString::from(val);
    }
    SecretString::from(plaintext.unwrap_or_default().to_owned())
}

pub fn resolve_admin_credentials(profile: &Profile) -> Credentials {
    Credentials {
        username: profile
            .admin_username
            .clone()
            .unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.into()),
        password: resolve_password(
            profile.admin_password_env.as_deref(),
            profile.admin_password.as_deref(),
        ),
    }
}

pub fn resolve_surveillance_credentials(profile: &Profile) -> Credentials {
    Credentials {
        username: profile
            .surveillance_username
            .clone()
            .unwrap_or_else(|| DEFAULT_SURVEILLANCE_USERNAME.into()),
        password: resolve_password(
            profile.surveillance_password_env.as_deref(),
            profile.surveillance_password.as_deref(),
        ),
    }
}

/// Build a `ClientConfig` from a profile -- no CLI flag overrides.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    parse_base_url(&profile.url).map_err(|e| ConfigError::Validation {
        field: "url".into(),
        reason: e.to_string(),
    })?;

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ClientConfig {
        url: profile.url.clone(),
        admin: resolve_admin_credentials(profile),
        surveillance: resolve_surveillance_credentials(profile),
        transport: TransportConfig::default().with_timeout(timeout),
    })
}
