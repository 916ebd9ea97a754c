use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tagtune/config.toml` or `~/.config/tagtune/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TAGTUNE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
///
/// These are host settings. User preferences changed while playing (volume,
/// shuffle, tag filter) are kept separately, see [`crate::persist`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub storage: StorageSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON document with `tracks` and `images` arrays.
    pub path: PathBuf,
    /// Directory track `file` entries are resolved against.
    pub media_dir: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config.json"),
            media_dir: PathBuf::from("music"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory for saved preferences. Defaults to the XDG state directory.
    pub state_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to skip when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change in percent for `+` / `-`.
    pub volume_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 10,
            volume_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tagtune ~ ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `tagtune=debug`.
    pub level: String,
    /// Log file. Defaults to `tagtune.log` in the state directory.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
