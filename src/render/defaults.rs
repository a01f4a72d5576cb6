//! Default sizes, ratios and settings

use crate::types::{Length, Points};

/// Text zone padding, as a fraction of the square side
pub const MARGIN_RATIO: f64 = 0.02;
/// Arrow zone thickness, as a fraction of the square side
pub const ARROW_ZONE_RATIO: f64 = 0.05;
/// Inset of the arrow start from the reserved edge, as a fraction of the square side
pub const ARROW_INSET_RATIO: f64 = 0.025;

/// Subtracted from the truncated 45° scale so the diamond never touches the
/// square edges after rounding. Empirical; tune it, it is not derived.
pub const ROTATION_SAFETY_MARGIN: f64 = 0.02;
/// The 45° scale is truncated to this many steps per unit
pub const ROTATION_SCALE_STEPS: f64 = 100.0;

pub const OUTPUT_SIZE: Length = Length::mm(50.0);
pub const ARROW_WIDTH: Length = Length::mm(0.8);
pub const ARROW_HEAD_LENGTH: Length = Length::mm(3.0);
pub const ARROW_HEAD_WIDTH: Length = Length::mm(2.0);

pub const FONT_FAMILY: &str = "sans-serif";
pub const FONT_SIZE: Points = Points(10.0);
/// Baseline-to-baseline distance, in ems
pub const LINE_SPACING: f64 = 1.2;
/// Average glyph advance per em for the proportional width table
pub const CHARWID: f64 = 0.08 / 0.14;
/// Bold text is this much wider
pub const BOLD_WIDEN: f64 = 1.1;

/// Gap between the tick labels and the arrow or grid
pub const TICK_LABEL_SPACING: Length = Length::ZERO;
pub const TICK_PRECISION: u8 = 2;
pub const MAX_TICK_PRECISION: u8 = 15;

pub const AXIS_TITLE_X: &str = "Axis X";
pub const AXIS_TITLE_Y: &str = "Axis Y";
