use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self as term, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

use crate::app::{Direction, Event};
use crate::audio::PlaybackState;
use crate::config;
use crate::ui::{self, View};

use super::Controller;

/// What a key press asks for.
#[derive(Debug, PartialEq)]
enum KeyAction {
    Quit,
    SwitchPane,
    MoveHighlight(isize),
    Dispatch(Event),
    Ignore,
}

/// Main terminal event loop: drains catalog events, reports track end and
/// progress, draws, and turns key presses into controller events. Returns
/// `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller,
    events: &Receiver<Event>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(event) = events.try_recv() {
            controller.dispatch(event);
        }

        if track_over(controller.playback(), controller.sink().is_finished()) {
            debug!(
                index = controller.current_index(),
                file = controller.current_track().map(|t| t.file.as_str()),
                "track over"
            );
            controller.dispatch(Event::TrackEnded);
        }
        controller.dispatch(Event::TimeUpdated);

        terminal.draw(|f| ui::draw(f, controller.view(), &settings.ui, &settings.controls))?;

        if !term::poll(Duration::from_millis(50))? {
            continue;
        }
        let term::Event::Key(key) = term::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key_action(key, &settings.controls, controller.view(), controller.volume()) {
            KeyAction::Quit => break,
            KeyAction::SwitchPane => controller.view_mut().toggle_focus(),
            KeyAction::MoveHighlight(delta) => controller.view_mut().move_highlight(delta),
            KeyAction::Dispatch(event) => controller.dispatch(event),
            KeyAction::Ignore => {}
        }
    }

    Ok(())
}

/// A finished or unplayable source only ends the track while playing.
fn track_over(playback: PlaybackState, sink_finished: bool) -> bool {
    playback == PlaybackState::Playing && sink_finished
}

fn key_action(
    key: KeyEvent,
    controls: &config::ControlsSettings,
    view: &View,
    volume: u8,
) -> KeyAction {
    let scrub = i64::try_from(controls.scrub_seconds).unwrap_or(i64::MAX);
    let step = i32::from(controls.volume_step);

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab => KeyAction::SwitchPane,
        KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveHighlight(1),
        KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveHighlight(-1),
        KeyCode::Enter => view.activate().map_or(KeyAction::Ignore, KeyAction::Dispatch),
        KeyCode::Char(' ') | KeyCode::Char('p') => KeyAction::Dispatch(Event::TogglePause),
        KeyCode::Char('l') => KeyAction::Dispatch(Event::Advance(Direction::Forward)),
        KeyCode::Char('h') => KeyAction::Dispatch(Event::Advance(Direction::Backward)),
        KeyCode::Char('L') => KeyAction::Dispatch(Event::SeekBy(scrub)),
        KeyCode::Char('H') => KeyAction::Dispatch(Event::SeekBy(-scrub)),
        KeyCode::Char('s') => KeyAction::Dispatch(Event::ShuffleToggled),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            KeyAction::Dispatch(Event::VolumeChanged(i32::from(volume) + step))
        }
        KeyCode::Char('-') => KeyAction::Dispatch(Event::VolumeChanged(i32::from(volume) - step)),
        _ => KeyAction::Ignore,
    }
}
