use serde::{Deserialize, Serialize};

/// Current layout of [`PersistedSettings`]. Records with any other version are
/// discarded.
pub const SETTINGS_VERSION: u32 = 1;

pub const MAX_VOLUME: u8 = 100;

/// The persisted preference record.
///
/// Every field is required on read; a blob missing one is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSettings {
    pub version: u32,
    /// Volume in percent, `0..=100`.
    pub volume: u8,
    pub shuffle_enabled: bool,
    pub selected_tags: Vec<String>,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            volume: MAX_VOLUME,
            shuffle_enabled: false,
            selected_tags: Vec::new(),
        }
    }
}

impl PersistedSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.version != SETTINGS_VERSION {
            return Err(format!(
                "unsupported settings version {} (expected {SETTINGS_VERSION})",
                self.version
            ));
        }
        if self.volume > MAX_VOLUME {
            return Err(format!("volume {} is above {MAX_VOLUME}", self.volume));
        }
        Ok(())
    }
}
