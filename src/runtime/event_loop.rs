use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Prompt};
use crate::audio::MediaSource;
use crate::config::{self, StrategyKind};
use crate::engine::PlaybackEngine;
use crate::library::split_paths;
use crate::ui;
use crate::visualizer::{FrameScheduler, Visualizer};

use super::startup::open_selection;

/// State tracked by the event loop across iterations.
#[derive(Default)]
struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pending_gg: bool,
}

/// Main terminal event loop. Each iteration mirrors source notifications,
/// runs one animation frame, redraws and waits up to one frame for input.
pub fn run<S: MediaSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<S>,
    visualizer: &mut Visualizer,
    scheduler: &FrameScheduler,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame_budget = Duration::from_millis(settings.visualizer.frame_ms);
    let mut state = EventLoopState::default();

    loop {
        let graph = engine.graph();
        for event in engine.pump() {
            visualizer.on_source_event(&event, &graph);
        }
        app.sync(engine.playlist().len(), engine.state().active_index);

        scheduler.tick();
        terminal.draw(|f| ui::draw(f, app, engine, visualizer, settings))?;

        if event::poll(frame_budget)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, engine, visualizer, &mut state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_prompt_key<S: MediaSource>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<S>,
) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Enter => match app.submit_prompt() {
            Some(Prompt::Open(raw)) => {
                let count = open_selection(engine, &split_paths(&raw), &settings.library);
                log::info!("opened {count} track(s)");
                app.first();
            }
            Some(Prompt::Seek(raw)) => engine.seek(&raw),
            None => {}
        },
        KeyCode::Char(c) if !c.is_control() => app.push_char(c),
        _ => {}
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key_event<S: MediaSource>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &mut PlaybackEngine<S>,
    visualizer: &mut Visualizer,
    state: &mut EventLoopState,
) -> bool {
    if app.is_prompting() {
        handle_prompt_key(key, settings, app, engine);
        return false;
    }

    let len = engine.playlist().len();
    let was_g = std::mem::take(&mut state.pending_gg);
    let scrub = settings.controls.scrub_seconds as f64;
    let step = settings.audio.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('g') => {
            if was_g {
                app.follow_active = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_active = false;
            app.last(len);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.follow_active = false;
            app.next(len);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.follow_active = false;
            app.prev(len);
        }
        KeyCode::Enter => {
            app.follow_active = true;
            engine.select(app.selected);
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.follow_active = true;
            engine.toggle();
        }
        KeyCode::Char('s') => engine.stop(),
        KeyCode::Char('l') => {
            app.follow_active = true;
            engine.next();
        }
        KeyCode::Char('h') => {
            app.follow_active = true;
            engine.prev();
        }
        KeyCode::Char('L') => engine.scrub(scrub),
        KeyCode::Char('H') => engine.scrub(-scrub),
        KeyCode::Char('t') => app.begin_seek(),
        KeyCode::Char('+') | KeyCode::Char('=') => engine.nudge_volume(step),
        KeyCode::Char('-') => engine.nudge_volume(-step),
        KeyCode::Char('d') => {
            engine.remove_track(app.selected);
        }
        KeyCode::Char('o') => app.begin_open(),
        KeyCode::Char('v') => visualizer.cycle(),
        KeyCode::Char(c @ '1'..='3') => {
            let index = c as usize - '1' as usize;
            visualizer.switch(StrategyKind::ALL[index]);
        }
        _ => {}
    }

    false
}
