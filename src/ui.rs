//! UI rendering for the terminal user interface.
//!
//! Everything here reads state; nothing mutates the engine.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap,
        canvas::{Canvas, Context, Line as CanvasLine},
    },
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode};
use crate::audio::MediaSource;
use crate::config::{Settings, TimeField, UiSettings};
use crate::engine::{Phase, PlaybackEngine, PlaybackState};
use crate::visualizer::{Shape, Stroke, Surface, Visualizer};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next");
    // H/L is filled dynamically from config.
    map.insert("t", "seek to");
    map.insert("+/-", "volume");
    map.insert("d", "remove");
    map.insert("o", "open files");
    map.insert("v/1-3", "visualizer");
    map.insert("q", "quit");
    map
});

fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "enter", "space/p", "s", "h/l", "H/L", "t", "+/-", "d", "o", "v/1-3", "gg/G",
        "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `m:ss`; unknown or non-finite values show `0:00`.
pub fn format_clock(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Elapsed/total/remaining text per `UiSettings`.
fn time_text(state: &PlaybackState, ui: &UiSettings) -> String {
    let total = state.duration_secs.unwrap_or(f64::NAN);
    ui.time_fields
        .iter()
        .map(|f| match f {
            TimeField::Elapsed => format_clock(state.position_secs),
            TimeField::Total => format_clock(total),
            TimeField::Remaining => {
                let remaining = (total - state.position_secs).max(0.0);
                format!("-{}", format_clock(remaining))
            }
        })
        .collect::<Vec<String>>()
        .join(&ui.time_separator)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn padded(title: &str) -> Block<'_> {
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

/// Render the entire UI.
pub fn draw<S: MediaSource>(
    frame: &mut Frame,
    app: &App,
    engine: &PlaybackEngine<S>,
    visualizer: &Visualizer,
    settings: &Settings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());
    let state = engine.state();

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" yinyang ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let now_playing = match engine.active_track() {
        Some(track) => {
            let marker = match engine.phase() {
                Phase::Playing => "▶",
                Phase::Paused => "⏸",
                Phase::Ready | Phase::Empty => "■",
            };
            let starting = if engine.has_pending_play() { " (starting...)" } else { "" };
            format!("{marker} {}{starting}", track.name())
        }
        None => "Nothing playing...".to_string(),
    };
    frame.render_widget(
        Paragraph::new(now_playing).block(padded(" now playing ")),
        chunks[1],
    );

    draw_seek_bar(frame, chunks[2], state, &settings.ui);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    draw_playlist(frame, body[0], app, engine);
    let label = if visualizer.is_running() {
        format!(" {} ", visualizer.kind().label())
    } else {
        format!(" {} (waiting for audio) ", visualizer.kind().label())
    };
    draw_surface(frame, body[1], &visualizer.surface(), &label);

    let status = format!(
        "{} • Volume: {:>3}% • Visualizer: {}",
        engine.status(),
        (state.volume * 100.0).round() as u32,
        visualizer.kind().label()
    );
    frame.render_widget(
        Paragraph::new(status).block(padded(" status ")),
        chunks[4],
    );

    let footer = Paragraph::new(controls_text(settings.controls.scrub_seconds))
        .block(padded(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);

    draw_prompt(frame, app);
}

fn draw_seek_bar(frame: &mut Frame, area: Rect, state: &PlaybackState, ui: &UiSettings) {
    let label = time_text(state, ui);
    let gauge = match state.progress() {
        Some(ratio) => Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio),
        // no known duration: nothing to seek against
        None => Gauge::default()
            .gauge_style(Style::default().fg(Color::DarkGray))
            .ratio(0.0),
    };
    frame.render_widget(gauge.label(label).block(padded(" seek ")), area);
}

fn draw_playlist<S: MediaSource>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    engine: &PlaybackEngine<S>,
) {
    let tracks = engine.playlist().tracks();
    let active = engine.state().active_index;
    let title = format!(" playlist ({}) ", tracks.len());

    if tracks.is_empty() {
        let hint = Paragraph::new("No tracks. Press [o] to open files.")
            .dim()
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(hint, area);
        return;
    }

    // Only build ListItems for the visible window, keeping the cursor centred.
    let total = tracks.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel = app.selected.min(total - 1);
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let mut start = sel.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height)
    };

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, track)| {
            let index = start + offset;
            if Some(index) == active {
                ListItem::new(format!("▶ {}", track.name())).bold()
            } else {
                ListItem::new(format!("  {}", track.name()))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(sel - start));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Offsets, in braille dots, of the parallel lines drawn for a stroke.
fn stroke_offsets(width: f64) -> impl Iterator<Item = f64> {
    let lines = width.round().max(1.0) as i32;
    let first = -(lines - 1) / 2;
    (first..first + lines).map(f64::from)
}

/// Draw one stroked segment as parallel canvas lines, offset across the
/// segment's dominant direction by one dot each.
fn draw_stroke(
    ctx: &mut Context,
    from: (f64, f64),
    to: (f64, f64),
    stroke: &Stroke,
    dot: (f64, f64),
) {
    let horizontal = (to.0 - from.0).abs() >= (to.1 - from.1).abs();
    for k in stroke_offsets(stroke.width) {
        let (dx, dy) = if horizontal { (0.0, k * dot.1) } else { (k * dot.0, 0.0) };
        ctx.draw(&CanvasLine {
            x1: from.0 + dx,
            y1: from.1 + dy,
            x2: to.0 + dx,
            y2: to.1 + dy,
            color: stroke.color,
        });
    }
}

/// Replay the surface's display list; the canvas has y up, the surface y down.
fn draw_surface(frame: &mut Frame, area: Rect, surface: &Surface, label: &str) {
    let (w, h) = (surface.width(), surface.height());
    let block = Block::default().borders(Borders::ALL).title(label);
    let inner = block.inner(area);
    // braille cells are 2 dots wide and 4 dots tall
    let dot = (
        w / f64::from(inner.width.max(1) * 2),
        h / f64::from(inner.height.max(1) * 4),
    );
    let flip = |(x, y): (f64, f64)| (x, h - y);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .background_color(surface.background())
        .x_bounds([0.0, w])
        .y_bounds([0.0, h])
        .paint(|ctx| {
            for shape in surface.shapes() {
                match shape {
                    Shape::Polyline { points, stroke } => {
                        for pair in points.windows(2) {
                            draw_stroke(ctx, flip(pair[0]), flip(pair[1]), stroke, dot);
                        }
                    }
                    Shape::Segment { from, to, stroke } => {
                        draw_stroke(ctx, flip(*from), flip(*to), stroke, dot);
                    }
                }
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_prompt(frame: &mut Frame, app: &App) {
    let (title, text) = match &app.mode {
        InputMode::Normal => return,
        InputMode::Open(buf) => (" open files or folders (enter / esc) ", buf),
        InputMode::Seek(buf) => (" seek to seconds (enter / esc) ", buf),
    };
    let area = centered_rect_sized(64, 3, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!("{text}█")).block(padded(title)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_width_maps_to_parallel_lines() {
        assert_eq!(stroke_offsets(1.0).collect::<Vec<_>>(), vec![0.0]);
        assert_eq!(stroke_offsets(2.0).collect::<Vec<_>>(), vec![0.0, 1.0]);
        assert_eq!(stroke_offsets(3.0).collect::<Vec<_>>(), vec![-1.0, 0.0, 1.0]);
        assert_eq!(stroke_offsets(0.0).count(), 1);
    }

    #[test]
    fn clock_formats_minutes_and_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(61.9), "1:01");
        assert_eq!(format_clock(3600.0), "60:00");
    }

    #[test]
    fn clock_shows_zero_for_unknown_values() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn time_text_follows_configured_fields() {
        let state = PlaybackState {
            position_secs: 30.0,
            duration_secs: Some(90.0),
            ..PlaybackState::default()
        };
        let ui = UiSettings {
            time_fields: vec![TimeField::Elapsed, TimeField::Total, TimeField::Remaining],
            ..UiSettings::default()
        };
        assert_eq!(time_text(&state, &ui), "0:30 / 1:30 / -1:00");

        let unknown = PlaybackState::default();
        assert_eq!(time_text(&unknown, &ui), "0:00 / 0:00 / -0:00");
    }

    #[test]
    fn controls_include_scrub_step() {
        assert!(controls_text(7).contains("[H/L] scrub -/+7s"));
    }
}
