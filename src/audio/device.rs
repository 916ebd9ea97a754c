//! `rodio`-backed playback sink.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::PlaybackSink;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Stream(#[from] rodio::StreamError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Plays files from `media_dir` through the default output device.
pub struct RodioSink {
    stream: OutputStream,
    media_dir: PathBuf,
    sink: Option<Sink>,
    duration: Option<Duration>,
    volume: f32,
    /// Play was requested but the last load produced no source.
    stalled: bool,
}

impl RodioSink {
    pub fn new(media_dir: impl Into<PathBuf>) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when the stream is dropped, which would land on the TUI.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            media_dir: media_dir.into(),
            sink: None,
            duration: None,
            volume: 1.0,
            stalled: false,
        })
    }

    /// True once a running source has played to its end, or when play was
    /// requested for a file that failed to load.
    pub fn is_finished(&self) -> bool {
        self.stalled
            || self
                .sink
                .as_ref()
                .is_some_and(|s| !s.is_paused() && s.empty())
    }

    /// Open `path` and return a paused sink plus the source length.
    fn open(&self, path: &Path) -> Result<(Sink, Option<Duration>), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        let duration = source.total_duration();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();
        Ok((sink, duration))
    }
}

impl PlaybackSink for RodioSink {
    fn load_source(&mut self, file: &str) {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.duration = None;
        self.stalled = false;

        let path = self.media_dir.join(file);
        match self.open(&path) {
            Ok((sink, duration)) => {
                debug!(path = %path.display(), "loaded source");
                self.sink = Some(sink);
                self.duration = duration;
            }
            Err(e) => warn!("{e}"),
        }
    }

    fn play(&mut self) {
        match self.sink.as_ref() {
            Some(s) => s.play(),
            None => self.stalled = true,
        }
    }

    fn pause(&mut self) {
        self.stalled = false;
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map_or(Duration::ZERO, Sink::get_pos)
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
    }

    fn seek(&mut self, position: Duration) {
        if let Some(s) = self.sink.as_ref() {
            if let Err(e) = s.try_seek(position) {
                warn!("seek to {position:?} failed: {e}");
            }
        }
    }
}
