//! Legend configuration
//!
//! [`LegendConfig`] is an immutable value owned by the caller and passed into
//! every render call. The host GUI edits its own copy between renders; the
//! engine never keeps one.

use crate::errors::LegendError;
use crate::render::defaults;
use crate::types::{Angle, Color, Length, Points, Scaler};

/// Direction in which upright Y-axis text is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YAxisTextDirection {
    /// +90°, text reads bottom to top
    #[default]
    Counterclockwise,
    /// −90°, text reads top to bottom
    Clockwise,
}

impl YAxisTextDirection {
    pub fn angle(self) -> Angle {
        match self {
            YAxisTextDirection::Counterclockwise => Angle(90.0),
            YAxisTextDirection::Clockwise => Angle(-90.0),
        }
    }
}

/// Font and color used for a group of texts
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: Points,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: defaults::FONT_FAMILY.to_string(),
            size: defaults::FONT_SIZE,
            color: Color::BLACK,
            bold: false,
            italic: false,
        }
    }
}

impl TextStyle {
    pub fn with_size(mut self, size: Points) -> Self {
        self.size = size;
        self
    }
}

/// Style of the two axis arrows, in millimetres
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowStyle {
    pub color: Color,
    pub width: Length,
    /// Head length along the line; zero draws a plain line
    pub head_length: Length,
    /// Full width of the head base
    pub head_width: Length,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: defaults::ARROW_WIDTH,
            head_length: defaults::ARROW_HEAD_LENGTH,
            head_width: defaults::ARROW_HEAD_WIDTH,
        }
    }
}

/// Everything the engine needs to know besides the data itself
#[derive(Debug, Clone, PartialEq)]
pub struct LegendConfig {
    /// Output width in millimetres
    pub width: Length,
    /// Output height in millimetres
    pub height: Length,
    /// Device units per millimetre
    pub scale_factor: f64,
    pub show_arrows: bool,
    pub show_axis_titles: bool,
    pub show_tick_labels: bool,
    /// Diamond layout; overrides `y_axis_text_direction`
    pub rotated_45: bool,
    pub y_axis_text_direction: YAxisTextDirection,
    pub axis_title_x: String,
    pub axis_title_y: String,
    pub title_style: TextStyle,
    pub tick_label_style: TextStyle,
    /// Extra space between the tick labels and the arrow or grid
    pub tick_label_spacing: Length,
    /// Decimal places of X-axis tick labels
    pub x_tick_precision: u8,
    /// Decimal places of Y-axis tick labels
    pub y_tick_precision: u8,
    pub arrow_style: ArrowStyle,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: defaults::OUTPUT_SIZE,
            height: defaults::OUTPUT_SIZE,
            scale_factor: 1.0,
            show_arrows: false,
            show_axis_titles: false,
            show_tick_labels: false,
            rotated_45: false,
            y_axis_text_direction: YAxisTextDirection::default(),
            axis_title_x: defaults::AXIS_TITLE_X.to_string(),
            axis_title_y: defaults::AXIS_TITLE_Y.to_string(),
            title_style: TextStyle::default(),
            tick_label_style: TextStyle::default(),
            tick_label_spacing: defaults::TICK_LABEL_SPACING,
            x_tick_precision: defaults::TICK_PRECISION,
            y_tick_precision: defaults::TICK_PRECISION,
            arrow_style: ArrowStyle::default(),
        }
    }
}

impl LegendConfig {
    pub fn new(width: Length, height: Length) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_arrows(mut self, show: bool) -> Self {
        self.show_arrows = show;
        self
    }

    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.show_axis_titles = true;
        self.axis_title_x = x.into();
        self.axis_title_y = y.into();
        self
    }

    pub fn with_show_axis_titles(mut self, show: bool) -> Self {
        self.show_axis_titles = show;
        self
    }

    pub fn with_tick_labels(mut self, show: bool) -> Self {
        self.show_tick_labels = show;
        self
    }

    pub fn with_rotated_45(mut self, rotated: bool) -> Self {
        self.rotated_45 = rotated;
        self
    }

    pub fn with_y_axis_text_direction(mut self, direction: YAxisTextDirection) -> Self {
        self.y_axis_text_direction = direction;
        self
    }

    pub fn with_title_style(mut self, style: TextStyle) -> Self {
        self.title_style = style;
        self
    }

    pub fn with_tick_label_style(mut self, style: TextStyle) -> Self {
        self.tick_label_style = style;
        self
    }

    pub fn with_tick_label_spacing(mut self, spacing: Length) -> Self {
        self.tick_label_spacing = spacing;
        self
    }

    /// Set the same precision on both axes
    pub fn with_tick_precision(mut self, precision: u8) -> Self {
        self.x_tick_precision = precision;
        self.y_tick_precision = precision;
        self
    }

    pub fn with_tick_precisions(mut self, x: u8, y: u8) -> Self {
        self.x_tick_precision = x;
        self.y_tick_precision = y;
        self
    }

    pub fn with_arrow_style(mut self, style: ArrowStyle) -> Self {
        self.arrow_style = style;
        self
    }

    /// X title split into lines
    pub fn title_x_lines(&self) -> Vec<&str> {
        split_lines(&self.axis_title_x)
    }

    /// Y title split into lines
    pub fn title_y_lines(&self) -> Vec<&str> {
        split_lines(&self.axis_title_y)
    }

    /// Side of the normalized square in millimetres
    pub fn square_side(&self) -> Length {
        self.width.min(self.height)
    }

    /// Validate the numeric settings and return the mm → device scaler.
    pub(crate) fn validate(&self) -> Result<Scaler, LegendError> {
        for side in [self.width, self.height] {
            Length::try_positive(side.raw()).map_err(|reason| LegendError::InvalidOutputSize {
                width: self.width.raw(),
                height: self.height.raw(),
                reason,
            })?;
        }
        let scaler = Scaler::try_new(self.scale_factor).map_err(|reason| {
            LegendError::InvalidScaleFactor {
                value: self.scale_factor,
                reason,
            }
        })?;
        let square = scaler.px(self.square_side());
        if !square.is_finite() {
            return Err(LegendError::DegenerateSquare { square });
        }
        let spacing = self.tick_label_spacing.raw();
        if spacing != 0.0 {
            Length::try_positive(spacing)
                .map_err(|reason| LegendError::InvalidTickSpacing { value: spacing, reason })?;
        }
        for precision in [self.x_tick_precision, self.y_tick_precision] {
            if precision > defaults::MAX_TICK_PRECISION {
                return Err(LegendError::PrecisionOutOfRange {
                    precision,
                    max: defaults::MAX_TICK_PRECISION,
                });
            }
        }
        Ok(scaler)
    }
}

/// Split on explicit line breaks, tolerating `\r\n`
fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
