//! CLI configuration -- thin wrapper around `motioneye_config`.
//!
//! Picks the active profile and layers `GlobalOpts` flag overrides
//! (--url, --admin-password, etc.) on top of it.

use clap::ValueEnum;

use motioneye_api::ClientConfig;
use motioneye_config::{
    Config, ConfigError, Profile, config_path, load_config, profile_to_client_config,
};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a server-bound command needs.
#[derive(Debug)]
pub struct Resolved {
    pub client: ClientConfig,
    pub output: OutputFormat,
}

/// Load the config file and merge it with the global flags.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config()?;
    resolve_with(global, &cfg)
}

/// Flag overrides take priority over profile values.
pub fn resolve_with(global: &GlobalOpts, cfg: &Config) -> Result<Resolved, CliError> {
    // An explicitly requested profile must exist; the implicit one may not.
    let (profile_name, mut profile) = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => (name, profile.clone()),
        Err(ConfigError::ProfileNotFound { name, .. }) if global.profile.is_none() => {
            (name, Profile::default())
        }
        Err(err) => return Err(err.into()),
    };

    apply_overrides(&mut profile, global);

    if profile.url.is_empty() {
        return Err(CliError::NoUrl {
            profile: profile_name,
            path: config_path().display().to_string(),
        });
    }

    let client = profile_to_client_config(&profile, &cfg.defaults)?;
    Ok(Resolved {
        client,
        output: output_format(global, cfg),
    })
}

/// `--output`, else the config file's default, else JSON.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global
        .output
        .or_else(|| OutputFormat::from_str(&cfg.defaults.output, true).ok())
        .unwrap_or(OutputFormat::Json)
}

pub fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(ref username) = global.admin_username {
        profile.admin_username = Some(username.clone());
    }
    if let Some(ref password) = global.admin_password {
        profile.admin_password = Some(password.clone());
        profile.admin_password_env = None;
    }
    if let Some(ref username) = global.surveillance_username {
        profile.surveillance_username = Some(username.clone());
    }
    if let Some(ref password) = global.surveillance_password {
        profile.surveillance_password = Some(password.clone());
        profile.surveillance_password_env = None;
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["motioneye"];
        argv.extend_from_slice(args);
        argv.push("login");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_home() -> Config {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                url: "http://home.local:8765".into(),
                admin_username: Some("root".into()),
                timeout: Some(5),
                ..Profile::default()
            },
        );
        cfg
    }

    #[test]
    fn flags_override_profile() {
        let cfg = config_with_home();
        let resolved = resolve_with(
            &global(&["--url", "http://other:8765", "--timeout", "9", "-o", "json"]),
            &cfg,
        )
        .unwrap();

        assert_eq!(resolved.client.url, "http://other:8765");
        assert_eq!(resolved.client.admin.username, "root");
        assert_eq!(resolved.client.transport.timeout, Duration::from_secs(9));
        assert_eq!(resolved.output, OutputFormat::Json);
    }

    #[test]
    fn profile_supplies_defaults() {
        let cfg = config_with_home();
        let resolved = resolve_with(&global(&[]), &cfg).unwrap();

        assert_eq!(resolved.client.url, "http://home.local:8765");
        assert_eq!(resolved.client.surveillance.username, "user");
        assert_eq!(resolved.client.transport.timeout, Duration::from_secs(5));
        assert_eq!(resolved.output, OutputFormat::Yaml);
    }

    #[test]
    fn missing_url_is_reported() {
        let err = resolve_with(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoUrl { ref profile, .. } if profile == "default"));
    }

    #[test]
    fn unknown_explicit_profile_is_reported() {
        let cfg = config_with_home();
        let err = resolve_with(&global(&["--profile", "garage"]), &cfg).unwrap_err();
        assert!(
            matches!(err, CliError::ProfileNotFound { ref name, ref available } if name == "garage" && available == "default")
        );
    }
}
