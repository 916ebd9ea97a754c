use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A playable entry of the catalog.
///
/// `file` doubles as the track's identity and the source handed to the
/// playback sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub file: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Track {
    /// Text shown for the track: its title, or the file name when untitled.
    pub fn display(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.file
        } else {
            &self.title
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub file: String,
    #[serde(default)]
    pub title: String,
}
