use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::{Event, PlaybackController};
use crate::audio::RodioSink;
use crate::library::JsonCatalog;
use crate::persist::TomlFileStore;
use crate::ui::View;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub type Controller = PlaybackController<TomlFileStore, RodioSink, View>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    if let Some(path) = env::args().nth(1) {
        settings.catalog.path = PathBuf::from(path);
    }

    logging::init(&settings);
    info!(catalog = %settings.catalog.path.display(), "starting");

    let state_dir = settings.state_dir().unwrap_or_else(|| PathBuf::from("."));
    let store = TomlFileStore::in_dir(&state_dir);
    let sink = RodioSink::new(settings.catalog.media_dir.clone())?;
    let mut controller = Controller::new(store, sink, View::default());

    let (event_tx, event_rx) = mpsc::channel::<Event>();
    startup::spawn_catalog_loaders(JsonCatalog::new(settings.catalog.path.clone()), &event_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut controller, &event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        volume = controller.volume(),
        shuffle = controller.shuffle_enabled(),
        state = %controller.store().path().display(),
        "shutting down"
    );
    run_result
}
