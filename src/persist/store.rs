use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::record::PersistedSettings;

/// File name of the record inside the state directory.
pub const STATE_FILE_NAME: &str = "state.toml";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Where preferences live between sessions.
///
/// `load` never fails: anything unusable yields the defaults. `save` is
/// best-effort and must be finished when it returns, so a later `load` sees it.
pub trait SettingsStore {
    fn load(&self) -> PersistedSettings;
    fn save(&mut self, settings: &PersistedSettings);
}

/// Keeps the record as a TOML file.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/state.toml`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the record. `Ok(None)` when there is no file yet.
    pub fn try_load(&self) -> Result<Option<PersistedSettings>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let settings: PersistedSettings = toml::from_str(&raw)?;
        settings.validate().map_err(StoreError::Invalid)?;
        Ok(Some(settings))
    }

    pub fn try_save(&self, settings: &PersistedSettings) -> Result<(), StoreError> {
        let encoded = toml::to_string(settings)?;
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write next to the target and rename so a crash never leaves half a record.
        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, encoded).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

impl SettingsStore for TomlFileStore {
    fn load(&self) -> PersistedSettings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                debug!(path = %self.path.display(), "no saved settings, using defaults");
                PersistedSettings::default()
            }
            Err(e) => {
                warn!("ignoring saved settings: {e}");
                PersistedSettings::default()
            }
        }
    }

    fn save(&mut self, settings: &PersistedSettings) {
        if let Err(e) = self.try_save(settings) {
            warn!("could not save settings: {e}");
        }
    }
}
