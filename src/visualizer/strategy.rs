use ratatui::style::Color;

use crate::config::{StrategyKind, VisualizerSettings};
use crate::tap::{SILENCE, SignalFrame};

use super::surface::{Stroke, Surface};

/// Maps one waveform snapshot to shapes on a cleared surface.
pub trait RenderStrategy {
    fn kind(&self) -> StrategyKind;

    fn background(&self) -> Color {
        Color::Black
    }

    fn paint(&self, frame: &SignalFrame, surface: &mut Surface);
}

pub fn strategy_for(kind: StrategyKind, settings: &VisualizerSettings) -> Box<dyn RenderStrategy> {
    match kind {
        StrategyKind::ScopeLine => Box::new(ScopeLine),
        StrategyKind::BarComb => Box::new(BarComb {
            bars: settings.bar_count.max(1),
            scale: settings.bar_scale,
        }),
        StrategyKind::FilledWave => Box::new(FilledWave),
    }
}

/// Byte sample to a y coordinate; 128 lands on the centre line.
fn wave_y(sample: u8, height: f64) -> f64 {
    f64::from(sample) / f64::from(SILENCE) * height / 2.0
}

/// Oscilloscope trace: one point per sample, closed on the centre line.
pub struct ScopeLine;

impl RenderStrategy for ScopeLine {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ScopeLine
    }

    fn background(&self) -> Color {
        Color::Gray
    }

    fn paint(&self, frame: &SignalFrame, surface: &mut Surface) {
        if frame.is_empty() {
            return;
        }
        let (w, h) = (surface.width(), surface.height());
        let slice = w / frame.len() as f64;

        let mut points: Vec<(f64, f64)> = frame
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64 * slice, wave_y(s, h)))
            .collect();
        points.push((w, h / 2.0));

        surface.stroke_polyline(
            points,
            Stroke {
                width: 2.0,
                color: Color::Black,
            },
        );
    }
}

/// Evenly spaced vertical bars, one representative sample per bucket.
pub struct BarComb {
    pub bars: usize,
    pub scale: f64,
}

impl RenderStrategy for BarComb {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BarComb
    }

    fn paint(&self, frame: &SignalFrame, surface: &mut Surface) {
        if frame.is_empty() {
            return;
        }
        let (w, h) = (surface.width(), surface.height());
        let spacing = w / (self.bars + 1) as f64;
        let centre = h / 2.0;
        let stroke = Stroke {
            width: 2.0,
            color: Color::Cyan,
        };

        for i in 0..self.bars {
            let x = (i + 1) as f64 * spacing;
            let sample = frame.get(i * frame.len() / self.bars).unwrap_or(SILENCE);
            let half = (f64::from(sample) / f64::from(SILENCE) - 1.0).abs() * self.scale;
            surface.stroke_segment((x, centre - half), (x, centre + half), stroke);
        }
    }
}

/// Scope mapping resampled to one point per surface column, thicker and green.
pub struct FilledWave;

impl RenderStrategy for FilledWave {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FilledWave
    }

    fn paint(&self, frame: &SignalFrame, surface: &mut Surface) {
        if frame.is_empty() {
            return;
        }
        let h = surface.height();
        let columns = usize::from(surface.size().width);

        let points = (0..columns)
            .map(|x| {
                let sample = frame.get(x * frame.len() / columns).unwrap_or(SILENCE);
                (x as f64, wave_y(sample, h))
            })
            .collect();

        surface.stroke_polyline(
            points,
            Stroke {
                width: 3.0,
                color: Color::LightGreen,
            },
        );
    }
}
