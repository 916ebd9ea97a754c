//! The playback controller.
//!
//! Owns the catalog, tag selection, filtered playlist and cursor, and turns
//! [`Event`]s into commands for the playback sink, saves to the settings store
//! and notifications to the render sink.
//!
//! Replacing the playlist (tag toggle, catalog load) loads the first entry
//! without starting it. Navigation, direct selection and track end load *and*
//! play.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::audio::{PlaybackSink, PlaybackState};
use crate::library::{
    FilteredPlaylist, Image, TagSelection, Track, all_tags, filter, listed_tags,
};
use crate::persist::{MAX_VOLUME, PersistedSettings, SETTINGS_VERSION, SettingsStore};

use super::cursor::{Direction, PlaybackCursor};
use super::events::Event;
use super::render::RenderSink;

pub struct PlaybackController<S, P, V> {
    store: S,
    sink: P,
    view: V,

    catalog: Vec<Track>,
    images: Vec<Image>,
    tags: Vec<String>,
    selection: TagSelection,
    playlist: FilteredPlaylist,
    cursor: PlaybackCursor,

    volume: u8,
    playback: PlaybackState,
    rng: StdRng,
}

impl<S, P, V> PlaybackController<S, P, V>
where
    S: SettingsStore,
    P: PlaybackSink,
    V: RenderSink,
{
    /// Build a controller from the saved preferences in `store`.
    ///
    /// The catalog starts empty until [`Event::TracksLoaded`] arrives.
    pub fn new(store: S, sink: P, view: V) -> Self {
        let saved = store.load();
        debug!(?saved, "restored settings");

        let mut controller = Self {
            store,
            sink,
            view,
            catalog: Vec::new(),
            images: Vec::new(),
            tags: Vec::new(),
            selection: TagSelection::from_tags(saved.selected_tags),
            playlist: FilteredPlaylist::default(),
            cursor: PlaybackCursor::new(saved.shuffle_enabled),
            volume: saved.volume.min(MAX_VOLUME),
            playback: PlaybackState::Stopped,
            rng: StdRng::seed_from_u64(rand::random()),
        };

        controller.sink.set_volume(f32::from(controller.volume) / 100.0);
        controller.view.volume_changed(controller.volume);
        controller.view.shuffle_changed(controller.cursor.shuffle_enabled());
        controller.view.playback_changed(controller.playback);
        controller.publish_tags();
        controller.publish_playlist();
        controller
    }

    /// Replace the random source used for shuffle and backgrounds.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::TracksLoaded(tracks) => self.on_catalog_loaded(tracks),
            Event::ImagesLoaded(images) => self.on_images_loaded(images),
            Event::TagToggled(tag) => self.on_tag_toggled(&tag),
            Event::TrackEnded => self.on_track_ended(),
            Event::Advance(direction) => self.on_user_advance(direction),
            Event::TrackSelected(index) => self.on_track_selected(index),
            Event::VolumeChanged(value) => self.on_volume_changed(value),
            Event::ShuffleToggled => self.on_shuffle_toggled(),
            Event::Play => self.play(),
            Event::Pause => self.pause(),
            Event::TogglePause => self.toggle_pause(),
            Event::SeekBy(secs) => self.seek_by(secs),
            Event::SeekTo(fraction) => self.seek_to(fraction),
            Event::TimeUpdated => self.on_time_updated(),
        }
    }

    pub fn on_catalog_loaded(&mut self, tracks: Vec<Track>) {
        info!(tracks = tracks.len(), "catalog loaded");
        self.catalog = tracks;
        self.tags = all_tags(&self.catalog);
        self.publish_tags();
        self.apply_filter();
    }

    pub fn on_images_loaded(&mut self, images: Vec<Image>) {
        info!(images = images.len(), "images loaded");
        self.images = images;
        self.pick_background();
    }

    pub fn on_tag_toggled(&mut self, tag: &str) {
        let selected = self.selection.toggle(tag);
        debug!(tag, selected, "tag toggled");
        self.persist();
        self.publish_tags();
        self.apply_filter();
    }

    pub fn on_track_ended(&mut self) {
        self.on_user_advance(Direction::Forward);
    }

    pub fn on_user_advance(&mut self, direction: Direction) {
        let len = self.playlist.len();
        if self.cursor.advance(direction, len, &mut self.rng).is_some() {
            self.load_current();
            self.play();
        }
    }

    /// Jump to playlist row `index`. Out-of-range rows are ignored.
    pub fn on_track_selected(&mut self, index: usize) {
        if self.cursor.jump_to(index, self.playlist.len()) {
            self.load_current();
            self.play();
        } else {
            debug!(index, len = self.playlist.len(), "ignoring selection outside playlist");
        }
    }

    pub fn on_volume_changed(&mut self, value: i32) {
        self.volume = value.clamp(0, i32::from(MAX_VOLUME)) as u8;
        self.sink.set_volume(f32::from(self.volume) / 100.0);
        self.view.volume_changed(self.volume);
        self.persist();
    }

    pub fn on_shuffle_toggled(&mut self) {
        let enabled = self.cursor.toggle_shuffle();
        self.view.shuffle_changed(enabled);
        self.persist();
    }

    pub fn play(&mut self) {
        if self.playback == PlaybackState::Stopped {
            return;
        }
        self.sink.play();
        self.set_playback(PlaybackState::Playing);
    }

    pub fn pause(&mut self) {
        if self.playback == PlaybackState::Stopped {
            return;
        }
        self.sink.pause();
        self.set_playback(PlaybackState::Paused);
    }

    pub fn toggle_pause(&mut self) {
        match self.playback {
            PlaybackState::Stopped => {}
            PlaybackState::Paused => self.play(),
            PlaybackState::Playing => self.pause(),
        }
    }

    /// Skip by `secs` within the loaded source, clamped to its bounds.
    pub fn seek_by(&mut self, secs: i64) {
        if self.playback == PlaybackState::Stopped {
            return;
        }
        let current = self.sink.position();
        let delta = Duration::from_secs(secs.unsigned_abs());
        let mut target = if secs < 0 {
            current.saturating_sub(delta)
        } else {
            current.saturating_add(delta)
        };
        if let Some(total) = self.sink.duration() {
            target = target.min(total);
        }
        self.sink.seek(target);
        self.on_time_updated();
    }

    /// Seek to `fraction` of the loaded source. Needs a known duration.
    pub fn seek_to(&mut self, fraction: f64) {
        if self.playback == PlaybackState::Stopped || !fraction.is_finite() {
            return;
        }
        let Some(total) = self.sink.duration() else {
            return;
        };
        self.sink.seek(total.mul_f64(fraction.clamp(0.0, 1.0)));
        self.on_time_updated();
    }

    pub fn on_time_updated(&mut self) {
        self.view
            .progress_changed(self.sink.position(), self.sink.duration());
    }

    pub fn playlist(&self) -> &FilteredPlaylist {
        &self.playlist
    }

    /// Playlist row of the current track.
    pub fn current_index(&self) -> usize {
        self.cursor.index()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.track(&self.catalog, self.cursor.index())
    }

    pub fn all_tags(&self) -> &[String] {
        &self.tags
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.cursor.shuffle_enabled()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the preferences as they would be saved now.
    pub fn settings(&self) -> PersistedSettings {
        PersistedSettings {
            version: SETTINGS_VERSION,
            volume: self.volume,
            shuffle_enabled: self.cursor.shuffle_enabled(),
            selected_tags: self.selection.to_vec(),
        }
    }

    fn persist(&mut self) {
        let settings = self.settings();
        self.store.save(&settings);
    }

    /// Rebuild the playlist from the selection and restart at its first entry.
    fn apply_filter(&mut self) {
        self.playlist = filter(&self.catalog, &self.selection);
        self.cursor.reset();
        debug!(len = self.playlist.len(), "playlist rebuilt");

        if self.playlist.is_empty() {
            self.publish_playlist();
        } else {
            self.load_current();
        }
    }

    /// Hand the current entry to the sink, paused.
    fn load_current(&mut self) {
        let Some(track) = self.playlist.track(&self.catalog, self.cursor.index()) else {
            return;
        };
        debug!(file = %track.file, index = self.cursor.index(), "loading track");
        self.sink.load_source(&track.file);
        self.set_playback(PlaybackState::Paused);
        self.pick_background();
        self.publish_playlist();
        self.on_time_updated();
    }

    fn set_playback(&mut self, state: PlaybackState) {
        self.playback = state;
        self.view.playback_changed(state);
    }

    fn pick_background(&mut self) {
        let image = self.images.choose(&mut self.rng);
        self.view.background_changed(image);
    }

    fn publish_playlist(&mut self) {
        let tracks = self.playlist.tracks(&self.catalog);
        self.view.playlist_changed(&tracks, self.cursor.index());
    }

    fn publish_tags(&mut self) {
        let listed = listed_tags(&self.tags, &self.selection);
        self.view.tags_changed(&listed, &self.selection);
    }
}
