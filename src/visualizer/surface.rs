use ratatui::style::Color;

use crate::config::{StrategyKind, VisualizerSettings};

const NARROW_WIDTH: u16 = 280;
const WIDE_WIDTH: u16 = 300;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u16,
    pub height: u16,
}

impl SurfaceSize {
    /// Size for a surface mounted in a terminal `columns` wide.
    pub fn for_viewport(columns: u16, kind: StrategyKind, settings: &VisualizerSettings) -> Self {
        let narrow = columns < settings.narrow_below_columns;
        let width = if narrow { NARROW_WIDTH } else { WIDE_WIDTH };
        let height = match (kind, narrow) {
            (StrategyKind::ScopeLine, true) => 80,
            (StrategyKind::ScopeLine, false) => 100,
            (_, true) => 120,
            (_, false) => 150,
        };
        Self { width, height }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

/// Recorded drawing command. Coordinates have their origin top-left, y down.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polyline { points: Vec<(f64, f64)>, stroke: Stroke },
    Segment { from: (f64, f64), to: (f64, f64), stroke: Stroke },
}

/// Fixed-size display list the UI replays into a terminal canvas.
#[derive(Clone, Debug)]
pub struct Surface {
    size: SurfaceSize,
    background: Color,
    shapes: Vec<Shape>,
}

impl Surface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            background: Color::Black,
            shapes: Vec::new(),
        }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn width(&self) -> f64 {
        f64::from(self.size.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.size.height)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn stroke_polyline(&mut self, points: Vec<(f64, f64)>, stroke: Stroke) {
        if points.len() > 1 {
            self.shapes.push(Shape::Polyline { points, stroke });
        }
    }

    pub fn stroke_segment(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke) {
        self.shapes.push(Shape::Segment { from, to, stroke });
    }
}
