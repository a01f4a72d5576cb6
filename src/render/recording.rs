//! A surface that records every call instead of drawing
//!
//! Handy for tests and for hosts that replay the legend onto their own
//! canvas later.

use glam::DVec2;

use crate::errors::SurfaceError;
use crate::surface::{Font, LineStyle, RenderSurface, TextBlock, TextMeasure};
use crate::types::Color;

use super::metrics::ProportionalMetrics;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    FillPolygon { points: Vec<DVec2>, color: Color },
    BeginLineStyle(LineStyle),
    StrokePolyline(Vec<DVec2>),
    EndLineStyle,
    DrawText(TextBlock),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface<M = ProportionalMetrics> {
    measure: M,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: TextMeasure> RecordingSurface<M> {
    /// Record with custom text metrics
    pub fn with_measure(measure: M) -> Self {
        Self {
            measure,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl<M: TextMeasure> TextMeasure for RecordingSurface<M> {
    fn text_height(&self, lines: &[&str], font: &Font) -> f64 {
        self.measure.text_height(lines, font)
    }

    fn text_width(&self, lines: &[&str], font: &Font) -> f64 {
        self.measure.text_width(lines, font)
    }
}

impl<M: TextMeasure> RenderSurface for RecordingSurface<M> {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Color) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
        Ok(())
    }

    fn begin_line_style(&mut self, style: &LineStyle) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::BeginLineStyle(style.clone()));
        Ok(())
    }

    fn end_line_style(&mut self) {
        self.commands.push(DrawCommand::EndLineStyle);
    }

    fn stroke_polyline(&mut self, points: &[DVec2]) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::StrokePolyline(points.to_vec()));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextBlock) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::DrawText(text.clone()));
        Ok(())
    }
}
