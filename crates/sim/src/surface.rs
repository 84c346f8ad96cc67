//! Drawing abstraction between the simulation driver and its outputs.
//!
//! The driver emits primitives through [`DrawSurface`]; the CLI renders
//! them to pixels via [`crate::Raster`], while tests capture them with
//! [`Recording`] and assert on the command stream instead of pixels.

use glam::DVec2;
use metaballs_core::Rgba;

/// Receiver for the per-frame draw primitives.
pub trait DrawSurface {
    /// Fills the whole surface with one color.
    fn clear(&mut self, color: Rgba);
    /// Fills an axis-aligned square of side `size` centered on `center`.
    fn fill_rect(&mut self, center: DVec2, size: f64, color: Rgba);
    /// Strokes a circle outline.
    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba);
    /// Strokes an open polyline through `points` in order.
    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba);
    /// Fills a closed polygon with vertices `points` in order.
    fn fill_polygon(&mut self, points: &[DVec2], color: Rgba);
    /// Draws a small text label anchored at `pos`. Backends without text
    /// support may ignore this.
    fn draw_text(&mut self, text: &str, pos: DVec2, color: Rgba);
}

/// One recorded draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    FillRect {
        center: DVec2,
        size: f64,
        color: Rgba,
    },
    StrokeCircle {
        center: DVec2,
        radius: f64,
        color: Rgba,
    },
    StrokePolyline {
        points: Vec<DVec2>,
        color: Rgba,
    },
    FillPolygon {
        points: Vec<DVec2>,
        color: Rgba,
    },
    Text {
        text: String,
        pos: DVec2,
        color: Rgba,
    },
}

/// A surface that records the command stream for inspection.
#[derive(Debug, Default)]
pub struct Recording {
    commands: Vec<DrawCommand>,
}

impl Recording {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command recorded so far, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops all recorded commands.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Circles recorded so far, in draw order.
    pub fn circles(&self) -> Vec<(DVec2, f64, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeCircle {
                    center,
                    radius,
                    color,
                } => Some((*center, *radius, *color)),
                _ => None,
            })
            .collect()
    }

    /// Filled polygons recorded so far, in draw order.
    pub fn polygons(&self) -> Vec<&[DVec2]> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPolygon { points, .. } => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for Recording {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn fill_rect(&mut self, center: DVec2, size: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillRect {
            center,
            size,
            color,
        });
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Rgba) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: DVec2, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            color,
        });
    }
}
