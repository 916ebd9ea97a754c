//! Terminal view: keeps a copy of what the controller publishes and renders
//! it with `ratatui`.
//!
//! Rows are addressed by stable identifiers ([`Target`]). Activating a row
//! looks its action up from the identifier instead of a handler captured when
//! the row was drawn.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::{Event, RenderSink};
use crate::audio::PlaybackState;
use crate::config::{ControlsSettings, UiSettings};
use crate::library::{Image, TagSelection, Track};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("tab", "tags/tracks");
    map.insert("enter", "toggle tag / play track");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("+/-", "volume");
    map.insert("s", "shuffle");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = ["j/k", "tab", "enter", "space/p", "h/l", "H/L", "+/-", "s", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] skip -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Tags,
    Tracks,
}

/// A row the user can act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Tag(usize),
    Track(usize),
}

/// Everything the terminal shows, plus the highlighted row in each pane.
#[derive(Debug)]
pub struct View {
    rows: Vec<String>,
    current: usize,
    tags: Vec<String>,
    selected: TagSelection,

    playback: PlaybackState,
    shuffle: bool,
    volume: u8,
    position: Duration,
    duration: Option<Duration>,
    background: Option<String>,

    focus: Pane,
    tag_row: usize,
    track_row: usize,
}

impl Default for View {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            current: 0,
            tags: Vec::new(),
            selected: TagSelection::default(),
            playback: PlaybackState::Stopped,
            shuffle: false,
            volume: 100,
            position: Duration::ZERO,
            duration: None,
            background: None,
            focus: Pane::Tracks,
            tag_row: 0,
            track_row: 0,
        }
    }
}

impl View {
    pub fn focus(&self) -> Pane {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Pane::Tags => Pane::Tracks,
            Pane::Tracks => Pane::Tags,
        };
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Move the highlight in the focused pane by `delta`, wrapping.
    pub fn move_highlight(&mut self, delta: isize) {
        let (row, len) = match self.focus {
            Pane::Tags => (&mut self.tag_row, self.tags.len()),
            Pane::Tracks => (&mut self.track_row, self.rows.len()),
        };
        if len == 0 {
            *row = 0;
            return;
        }
        *row = (*row as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// The highlighted row of the focused pane, if it exists.
    pub fn highlighted(&self) -> Option<Target> {
        match self.focus {
            Pane::Tags if self.tag_row < self.tags.len() => Some(Target::Tag(self.tag_row)),
            Pane::Tracks if self.track_row < self.rows.len() => {
                Some(Target::Track(self.track_row))
            }
            _ => None,
        }
    }

    /// What activating `target` means.
    pub fn action(&self, target: Target) -> Option<Event> {
        match target {
            Target::Tag(row) => self.tags.get(row).cloned().map(Event::TagToggled),
            Target::Track(row) => (row < self.rows.len()).then_some(Event::TrackSelected(row)),
        }
    }

    /// Action for the highlighted row.
    pub fn activate(&self) -> Option<Event> {
        self.highlighted().and_then(|t| self.action(t))
    }
}

impl RenderSink for View {
    fn playlist_changed(&mut self, tracks: &[&Track], current: usize) {
        self.rows = tracks.iter().map(|t| t.display().to_string()).collect();
        self.current = current;
        self.track_row = current;
    }

    fn tags_changed(&mut self, all_tags: &[String], selected: &TagSelection) {
        self.tags = all_tags.to_vec();
        self.selected = selected.clone();
        if self.tag_row >= self.tags.len() {
            self.tag_row = 0;
        }
    }

    fn playback_changed(&mut self, state: PlaybackState) {
        self.playback = state;
    }

    fn shuffle_changed(&mut self, enabled: bool) {
        self.shuffle = enabled;
    }

    fn volume_changed(&mut self, volume: u8) {
        self.volume = volume;
    }

    fn progress_changed(&mut self, position: Duration, duration: Option<Duration>) {
        self.position = position;
        self.duration = duration;
    }

    fn background_changed(&mut self, image: Option<&Image>) {
        self.background = image.map(|i| {
            if i.title.trim().is_empty() {
                i.file.clone()
            } else {
                i.title.clone()
            }
        });
    }
}

fn status_text(view: &View) -> String {
    let mut parts: Vec<String> = Vec::new();

    let state = match view.playback {
        PlaybackState::Stopped => "Stopped",
        PlaybackState::Paused => "Paused",
        PlaybackState::Playing => "Playing",
    };
    match view.rows.get(view.current) {
        Some(song) if view.playback != PlaybackState::Stopped => {
            parts.push(format!("Song: {song}"));
        }
        _ => {}
    }
    parts.push(state.to_string());
    parts.push(format!("Shuffle: {}", if view.shuffle { "ON" } else { "OFF" }));
    parts.push(format!("Volume: {}%", view.volume));

    if !view.selected.is_empty() {
        parts.push(format!("Tags: {}", view.selected.to_vec().join(", ")));
    }
    if let Some(bg) = &view.background {
        parts.push(format!("Backdrop: {bg}"));
    }

    parts.join(" • ")
}

fn progress_ratio(view: &View) -> f64 {
    match view.duration {
        Some(total) if !total.is_zero() => {
            (view.position.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

fn left_padded(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn draw_tags(frame: &mut Frame, view: &View, area: Rect) {
    let block = pane_block(" tags ", view.focus == Pane::Tags);
    if view.tags.is_empty() {
        frame.render_widget(Paragraph::new("No tags available").block(block), area);
        return;
    }

    let items: Vec<ListItem> = view
        .tags
        .iter()
        .map(|tag| {
            let mark = if view.selected.contains(tag) { "[x]" } else { "[ ]" };
            ListItem::new(format!("{mark} {tag}"))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if view.focus == Pane::Tags {
        state.select(Some(view.tag_row));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tracks(frame: &mut Frame, view: &View, area: Rect) {
    let items: Vec<ListItem> = view
        .rows
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let item = ListItem::new(title.as_str());
            if i == view.current {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" tracks ", view.focus == Pane::Tracks))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !view.rows.is_empty() {
        state.select(Some(view.track_row.min(view.rows.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    view: &View,
    ui_settings: &UiSettings,
    controls: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tagtune ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(view))
        .block(left_padded(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);
    draw_tags(frame, view, body[0]);
    draw_tracks(frame, view, body[1]);

    let label = match view.duration {
        Some(total) => format!("{} / {}", format_mmss(view.position), format_mmss(total)),
        None => format_mmss(view.position),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .ratio(progress_ratio(view))
        .label(label);
    frame.render_widget(gauge, chunks[3]);

    let footer = Paragraph::new(controls_text(controls.scrub_seconds))
        .block(left_padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
