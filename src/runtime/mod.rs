use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::visualizer::{FrameScheduler, Visualizer};

mod event_loop;
mod logging;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    logging::init_logging(&settings.logging);
    if let Some(warning) = config_warning {
        log::warn!("{warning}");
    }

    let inputs: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    let mut engine = startup::build_engine(&settings)?;
    startup::open_selection(&mut engine, &inputs, &settings.library);

    let scheduler = FrameScheduler::new();
    let mut visualizer =
        Visualizer::new(&settings.visualizer, settings.audio.fft_size, scheduler.clone());
    let (columns, _) = terminal::size()?;
    visualizer.mount(&engine.graph(), engine.ready_state(), columns);

    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut engine,
        &mut visualizer,
        &scheduler,
    );

    // The tap goes before the source it observes.
    visualizer.unmount();
    drop(visualizer);
    drop(engine);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("shutdown");
    run_result
}
