//! Error types with diagnostics using miette
//!
//! Every variant is a precondition violation detected before the first
//! drawing call, except [`LegendError::Surface`], which wraps a failure
//! reported by the drawing backend itself.

use miette::Diagnostic;
use thiserror::Error;

use crate::grid::Axis;
use crate::types::NumericError;

// ============================================================================
// Legend Errors
// ============================================================================

/// Errors that reject a render request
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LegendError {
    #[error("legend grid has no cells")]
    #[diagnostic(
        code(bivariate_legend::grid::empty),
        help("the classification must produce at least one cell")
    )]
    EmptyGrid,

    #[error("{count} cells cannot form a square grid")]
    #[diagnostic(
        code(bivariate_legend::grid::not_square),
        help("provide side × side cells, e.g. {smaller} or {larger}")
    )]
    NonSquareGrid {
        count: usize,
        smaller: usize,
        larger: usize,
    },

    #[error("cell ({x}, {y}) lies outside a {side}×{side} grid")]
    #[diagnostic(code(bivariate_legend::grid::out_of_range))]
    CellOutOfRange { x: u32, y: u32, side: u32 },

    #[error("cell ({x}, {y}) appears more than once")]
    #[diagnostic(
        code(bivariate_legend::grid::duplicate_cell),
        help("cells must not overlap; each position needs exactly one color")
    )]
    DuplicateCell { x: u32, y: u32 },

    #[error("tick labels are enabled but the {axis} axis has no boundary values")]
    #[diagnostic(
        code(bivariate_legend::ticks::missing),
        help("pass the class boundaries for both axes or disable tick labels")
    )]
    MissingTicks { axis: Axis },

    #[error("{axis} axis boundary #{index} is not a finite number")]
    #[diagnostic(code(bivariate_legend::ticks::non_finite))]
    NonFiniteTick { axis: Axis, index: usize },

    #[error("invalid output size {width}×{height}: {reason}")]
    #[diagnostic(
        code(bivariate_legend::config::output_size),
        help("both sides of the output must be positive and finite")
    )]
    InvalidOutputSize {
        width: f64,
        height: f64,
        reason: NumericError,
    },

    #[error("invalid scale factor {value}: {reason}")]
    #[diagnostic(code(bivariate_legend::config::scale_factor))]
    InvalidScaleFactor { value: f64, reason: NumericError },

    #[error("legend square of {square} device units cannot be laid out")]
    #[diagnostic(
        code(bivariate_legend::config::degenerate_square),
        help("the output size times the scale factor must stay finite and well above zero")
    )]
    DegenerateSquare { square: f64 },

    #[error("invalid tick label spacing {value}: {reason}")]
    #[diagnostic(
        code(bivariate_legend::config::tick_spacing),
        help("use zero or a positive length")
    )]
    InvalidTickSpacing { value: f64, reason: NumericError },

    #[error("tick precision {precision} is out of range")]
    #[diagnostic(
        code(bivariate_legend::config::precision),
        help("use between 0 and {max} decimal places")
    )]
    PrecisionOutOfRange { precision: u8, max: u8 },

    #[error("reserved annotation zones ({reserved}) leave no room in a {square} square")]
    #[diagnostic(
        code(bivariate_legend::layout::zones_exceed_square),
        help("enlarge the legend, shrink the fonts, or disable some annotations")
    )]
    ZonesExceedSquare { reserved: f64, square: f64 },

    #[error(transparent)]
    #[diagnostic(code(bivariate_legend::surface))]
    Surface(#[from] SurfaceError),
}

// ============================================================================
// Surface Errors
// ============================================================================

/// A drawing backend failed to carry out a primitive operation
#[derive(Error, Debug, Clone, PartialEq)]
#[error("rendering surface failed to {operation}: {message}")]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
}

impl SurfaceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}
