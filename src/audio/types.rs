//! Playback sink contract and playback state.

use std::time::Duration;

/// Whether anything is loaded and whether it is running.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing loaded.
    #[default]
    Stopped,
    /// A source is loaded but not running.
    Paused,
    Playing,
}

/// The single audio output the controller drives.
///
/// Implementations own decoding and output; callers only issue commands.
/// `load_source` replaces the current source and leaves it paused.
pub trait PlaybackSink {
    fn load_source(&mut self, file: &str);
    fn play(&mut self);
    fn pause(&mut self);
    /// Position within the loaded source.
    fn position(&self) -> Duration;
    /// Length of the loaded source, when known.
    fn duration(&self) -> Option<Duration>;
    /// Linear gain, `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    fn seek(&mut self, position: Duration);
}
