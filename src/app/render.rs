use std::time::Duration;

use crate::audio::PlaybackState;
use crate::library::{Image, TagSelection, Track};

/// Receives state changes worth showing. Rendering itself is up to the
/// implementation.
///
/// Only the playlist and tag notifications are mandatory; the rest default
/// to doing nothing.
pub trait RenderSink {
    /// The playlist or the current index changed. `current` is 0 for an
    /// empty playlist.
    fn playlist_changed(&mut self, tracks: &[&Track], current: usize);

    /// The tag list or the selection changed.
    fn tags_changed(&mut self, all_tags: &[String], selected: &TagSelection);

    fn playback_changed(&mut self, _state: PlaybackState) {}

    fn shuffle_changed(&mut self, _enabled: bool) {}

    fn volume_changed(&mut self, _volume: u8) {}

    fn progress_changed(&mut self, _position: Duration, _duration: Option<Duration>) {}

    fn background_changed(&mut self, _image: Option<&Image>) {}
}

