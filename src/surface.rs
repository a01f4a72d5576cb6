//! The rendering surface the engine draws on
//!
//! The engine never rasterizes anything itself. It measures text and issues
//! primitive operations through [`TextMeasure`] and [`RenderSurface`], which
//! a host implements on top of its own painter. All coordinates and sizes
//! handed to a surface are in device units, y growing downwards.
//!
//! Two implementations ship with the crate:
//! [`RecordingSurface`](crate::render::recording::RecordingSurface) and
//! [`SvgSurface`](crate::render::svg::SvgSurface).

use std::ops::{Deref, DerefMut};

use glam::DVec2;

use crate::config::{ArrowStyle, TextStyle};
use crate::errors::SurfaceError;
use crate::types::{Color, Scaler};

/// A text style resolved to device units
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    /// Em size in device units
    pub size: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    pub fn resolve(style: &TextStyle, scaler: &Scaler) -> Self {
        Self {
            family: style.family.clone(),
            size: scaler.font_px(style.size),
            color: style.color,
            bold: style.bold,
            italic: style.italic,
        }
    }
}

/// A line style resolved to device units
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    /// Arrowhead at the end of every stroked polyline, if any
    pub head: Option<ArrowHead>,
}

/// Triangular head drawn at the last point of a polyline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowHead {
    pub length: f64,
    pub width: f64,
}

impl LineStyle {
    pub fn resolve(style: &ArrowStyle, scaler: &Scaler) -> Self {
        let length = scaler.px(style.head_length);
        let head = (length > 0.0).then(|| ArrowHead {
            length,
            width: scaler.px(style.head_width),
        });
        Self {
            color: style.color,
            width: scaler.px(style.width),
            head,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A (possibly multi-line) text block anchored at a point.
///
/// The block is laid out unrotated with `h_align`/`v_align` relative to
/// `anchor`, then rotated about `anchor` by `rotation`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub anchor: DVec2,
    /// Radians, counterclockwise-positive on screen
    pub rotation: f64,
    pub h_align: HAlign,
    pub v_align: VAlign,
    pub font: Font,
}

/// Text metrics capability
pub trait TextMeasure {
    /// Height of a block of lines, including line spacing
    fn text_height(&self, lines: &[&str], font: &Font) -> f64;

    /// Width of the widest line
    fn text_width(&self, lines: &[&str], font: &Font) -> f64;
}

/// Primitive drawing capability
pub trait RenderSurface: TextMeasure {
    /// Push the current pen/brush state
    fn save(&mut self);

    /// Pop the state pushed by the matching `save`
    fn restore(&mut self);

    /// Fill a closed polygon, no stroke
    fn fill_polygon(&mut self, points: &[DVec2], color: Color) -> Result<(), SurfaceError>;

    /// Make `style` current for the following `stroke_polyline` calls
    fn begin_line_style(&mut self, style: &LineStyle) -> Result<(), SurfaceError>;

    /// Release the style set by `begin_line_style`
    fn end_line_style(&mut self);

    /// Stroke an open polyline with the current line style
    fn stroke_polyline(&mut self, points: &[DVec2]) -> Result<(), SurfaceError>;

    fn draw_text(&mut self, text: &TextBlock) -> Result<(), SurfaceError>;
}

/// Saved surface state, restored when dropped
pub struct SavedState<'s, S: RenderSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: RenderSurface + ?Sized> SavedState<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: RenderSurface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;
    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: RenderSurface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// An active line style, ended when dropped
pub struct LineStyleScope<'s, S: RenderSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: RenderSurface + ?Sized> LineStyleScope<'s, S> {
    pub fn begin(surface: &'s mut S, style: &LineStyle) -> Result<Self, SurfaceError> {
        surface.begin_line_style(style)?;
        Ok(Self { surface })
    }

    pub fn stroke_polyline(&mut self, points: &[DVec2]) -> Result<(), SurfaceError> {
        self.surface.stroke_polyline(points)
    }
}

impl<S: RenderSurface + ?Sized> Drop for LineStyleScope<'_, S> {
    fn drop(&mut self) {
        self.surface.end_line_style();
    }
}
