//! Config subcommand handlers.

use serde_json::Value;

use motioneye_config::{
    Config, Profile, config_path, load_config, load_config_file, profile_to_client_config,
    save_config,
};

use crate::cli::{AddProfileArgs, ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Config as a JSON document with plaintext passwords masked.
fn redacted(cfg: &Config) -> Result<Value, CliError> {
    let mut doc = serde_json::to_value(cfg)?;
    if let Some(profiles) = doc.get_mut("profiles").and_then(Value::as_object_mut) {
        for profile in profiles.values_mut().filter_map(Value::as_object_mut) {
            for key in ["admin_password", "surveillance_password"] {
                if profile.get(key).is_some_and(Value::is_string) {
                    profile.insert(key.into(), Value::from(MASK));
                }
            }
        }
    }
    Ok(doc)
}

fn build_profile(args: &AddProfileArgs, global: &GlobalOpts) -> Result<Profile, CliError> {
    let mut profile = Profile {
        admin_password_env: args.admin_password_env.clone(),
        surveillance_password_env: args.surveillance_password_env.clone(),
        ..Profile::default()
    };
    config::apply_overrides(&mut profile, global);

    if profile.url.is_empty() {
        return Err(CliError::NoUrl {
            profile: args.name.clone(),
            path: config_path().display().to_string(),
        });
    }
    Ok(profile)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config_path();

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = load_config()?;
            let out = output::render(config::output_format(global, &cfg), &redacted(&cfg)?)?;
            output::print_output(&out);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: motioneye --url <URL> config add <NAME>");
            }
            for name in cfg.profiles.keys() {
                let marker = if name == default { " *" } else { "" };
                output::print_output(&format!("{name}{marker}"));
            }
            Ok(())
        }

        ConfigCommand::Add(add) => {
            let mut cfg = load_config_file(&path)?;
            let profile = build_profile(&add, global)?;
            profile_to_client_config(&profile, &cfg.defaults)?;

            let first = cfg.profiles.is_empty();
            cfg.profiles.insert(add.name.clone(), profile);
            if add.default || first {
                cfg.default_profile = Some(add.name.clone());
            }
            save_config(&cfg)?;
            eprintln!("Profile '{}' saved to {}", add.name, path.display());
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = load_config_file(&path)?;
            cfg.profile(Some(&name))?;
            cfg.default_profile = Some(name);
            save_config(&cfg)?;
            Ok(())
        }

        ConfigCommand::Remove { name } => {
            let mut cfg = load_config_file(&path)?;
            cfg.profile(Some(&name))?;
            cfg.profiles.remove(&name);
            if cfg.default_profile.as_deref() == Some(name.as_str()) {
                cfg.default_profile = None;
            }
            save_config(&cfg)?;
            eprintln!("Profile '{name}' removed");
            Ok(())
        }
    }
}
