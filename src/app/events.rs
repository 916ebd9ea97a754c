use crate::library::{Image, Track};

use super::cursor::Direction;

/// Everything the controller reacts to, delivered through
/// [`PlaybackController::dispatch`](super::PlaybackController::dispatch).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The track list arrived (possibly empty if fetching failed).
    TracksLoaded(Vec<Track>),
    /// The image list arrived (possibly empty if fetching failed).
    ImagesLoaded(Vec<Image>),
    TagToggled(String),
    /// The running source played to its end.
    TrackEnded,
    Advance(Direction),
    /// Jump to a playlist row and play it.
    TrackSelected(usize),
    /// Requested volume in percent; clamped to `0..=100`.
    VolumeChanged(i32),
    ShuffleToggled,
    Play,
    Pause,
    TogglePause,
    /// Skip within the current source by whole seconds, either direction.
    SeekBy(i64),
    /// Jump to a fraction (`0.0..=1.0`) of the current source.
    SeekTo(f64),
    /// Periodic tick while the host is running.
    TimeUpdated,
}
