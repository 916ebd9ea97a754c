//! Catalog providers.
//!
//! A provider is asked once per session for the tracks and once for the
//! images. Both requests are best-effort: any failure is logged and reported
//! as an empty list so the rest of the player keeps working.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use super::model::{Image, Track};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog section `{section}` is malformed: {source}")]
    Section {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of the track and image lists.
pub trait CatalogFetch {
    fn tracks(&self) -> Vec<Track>;
    fn images(&self) -> Vec<Image>;
}

/// Reads a JSON document of the shape `{"tracks": [...], "images": [...]}`.
///
/// The two sections are decoded independently, so a broken image list never
/// costs the tracks and vice versa. A missing section is an empty list.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn try_tracks(&self) -> Result<Vec<Track>, CatalogError> {
        self.section("tracks")
    }

    pub fn try_images(&self) -> Result<Vec<Image>, CatalogError> {
        self.section("images")
    }

    fn document(&self) -> Result<Value, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
            path: self.path.clone(),
            source,
        })
    }

    fn section<T: DeserializeOwned>(&self, section: &'static str) -> Result<Vec<T>, CatalogError> {
        let mut doc = self.document()?;
        match doc.get_mut(section).map(Value::take) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(v) => serde_json::from_value(v)
                .map_err(|source| CatalogError::Section { section, source }),
        }
    }
}

impl CatalogFetch for JsonCatalog {
    fn tracks(&self) -> Vec<Track> {
        match self.try_tracks() {
            Ok(tracks) => {
                info!(count = tracks.len(), path = %self.path.display(), "loaded tracks");
                tracks
            }
            Err(e) => {
                warn!("no tracks available: {e}");
                Vec::new()
            }
        }
    }

    fn images(&self) -> Vec<Image> {
        match self.try_images() {
            Ok(images) => {
                info!(count = images.len(), path = %self.path.display(), "loaded images");
                images
            }
            Err(e) => {
                warn!("no images available: {e}");
                Vec::new()
            }
        }
    }
}
