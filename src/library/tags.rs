//! Tag selection and playlist filtering.

use std::collections::BTreeSet;

use super::model::Track;

/// The set of tags the user has switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection(BTreeSet<String>);

impl TagSelection {
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    /// Flip membership of `tag`. Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if self.0.remove(tag) {
            false
        } else {
            self.0.insert(tag.to_string());
            true
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Selected tags in code-point order, as persisted.
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    fn matches(&self, track: &Track) -> bool {
        track.tags.iter().any(|t| self.0.contains(t))
    }
}

/// An ordered view of the catalog, stored as catalog positions.
///
/// Never edited in place: a tag change produces a whole new playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredPlaylist {
    positions: Vec<usize>,
}

impl FilteredPlaylist {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Catalog positions of the playlist entries, in playlist order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Resolve playlist entry `index` against `catalog`.
    pub fn track<'a>(&self, catalog: &'a [Track], index: usize) -> Option<&'a Track> {
        self.positions.get(index).and_then(|&p| catalog.get(p))
    }

    pub fn tracks<'a>(&self, catalog: &'a [Track]) -> Vec<&'a Track> {
        self.positions
            .iter()
            .filter_map(|&p| catalog.get(p))
            .collect()
    }
}

/// Derive the playlist for `selection`.
///
/// An empty selection keeps the whole catalog; otherwise a track is kept when
/// it carries at least one selected tag. Catalog order is preserved.
pub fn filter(catalog: &[Track], selection: &TagSelection) -> FilteredPlaylist {
    let positions = if selection.is_empty() {
        (0..catalog.len()).collect()
    } else {
        catalog
            .iter()
            .enumerate()
            .filter(|(_, track)| selection.matches(track))
            .map(|(i, _)| i)
            .collect()
    };

    FilteredPlaylist { positions }
}

/// Every tag used in `catalog`, deduplicated and sorted by code point.
pub fn all_tags(catalog: &[Track]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Tags to offer for toggling: `all_tags` plus any selected tag the catalog
/// no longer uses, so it can still be switched off. Code-point order.
pub fn listed_tags(all_tags: &[String], selection: &TagSelection) -> Vec<String> {
    all_tags
        .iter()
        .map(String::as_str)
        .chain(selection.iter())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
