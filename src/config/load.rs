use std::{env, path::PathBuf};

use super::schema::Settings;

const APP_DIR: &str = "tagtune";

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `TAGTUNE__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TAGTUNE")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.controls.scrub_seconds == 0 {
            return Err("controls.scrub_seconds must be >= 1".to_string());
        }
        if self.controls.volume_step == 0 || self.controls.volume_step > 100 {
            return Err("controls.volume_step must be between 1 and 100".to_string());
        }
        Ok(())
    }

    /// Directory for saved preferences and the default log file.
    pub fn state_dir(&self) -> Option<PathBuf> {
        self.storage.state_dir.clone().or_else(default_state_dir)
    }

    /// Log file path, explicit or inside the state directory.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging
            .file
            .clone()
            .or_else(|| self.state_dir().map(|d| d.join("tagtune.log")))
    }
}

/// Resolve the config path from `TAGTUNE_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TAGTUNE_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/tagtune/config.toml`
/// or `~/.config/tagtune/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("config.toml"))
}

/// Compute the default state directory `$XDG_STATE_HOME/tagtune`
/// or `~/.local/state/tagtune` when `XDG_STATE_HOME` is not set.
pub fn default_state_dir() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state")
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    let base = if let Some(xdg) = env::var_os(var) {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(home_fallback))
    } else {
        None
    };

    base.map(|d| d.join(APP_DIR))
}
