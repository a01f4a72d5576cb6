//! Layout calculation: zone sizes, cell size and anchor points
//!
//! Everything lives in the pre-transform square `[0, S] × [0, S]` (device
//! units, y down). The annotation zones are stacked along the bottom and left
//! edges, outermost first: titles, tick labels, arrows. The grid fills what
//! is left, anchored to the top-right corner.
//!
//! ```text
//!   0 ┌──┬──┬──┬───────────────┐
//!     │  │  │  │               │
//!     │T │K │A │     grid      │
//!     │  │  │  │               │
//!     │  │  │  ├───────────────┤ S - reserved_edge_with_arrows
//!     │  │  │  arrow zone      │
//!     │  │  tick label zone    │
//!     │  title zone            │
//!   S └────────────────────────┘
//! ```

use glam::{DVec2, dvec2};

use crate::config::LegendConfig;
use crate::errors::LegendError;
use crate::grid::{Axis, AxisTickSet, GridCell, format_tick};
use crate::surface::{Font, TextMeasure};
use crate::types::{Angle, Scaler};

use super::defaults;

/// A formatted label and its anchor in layout space
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel {
    pub text: String,
    pub anchor: DVec2,
}

/// Tick label anchors for both axes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickPlacement {
    /// Left to right
    pub x: Vec<PlacedLabel>,
    /// Top to bottom (last boundary first)
    pub y: Vec<PlacedLabel>,
}

/// All derived geometry of one render pass, before the transform
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub square_size: f64,
    pub margin: f64,
    pub title_zone: f64,
    pub tick_zone: f64,
    /// Part of `tick_zone` between the labels and the arrow or grid
    pub tick_spacing: f64,
    /// Width of the widest Y tick label
    pub tick_label_width: f64,
    pub arrow_zone: f64,
    pub reserved_edge: f64,
    pub reserved_edge_with_arrows: f64,
    pub side: u32,
    pub cell_size: f64,
    /// Bottom-left corner of the grid
    pub grid_origin: DVec2,
    pub arrow_start: DVec2,
    pub arrow_x_end: DVec2,
    pub arrow_y_end: DVec2,
    pub x_title_anchor: DVec2,
    pub y_title_anchor: DVec2,
    pub ticks: TickPlacement,
    /// Text angle of X annotations relative to the layout
    pub x_text_angle: Angle,
    /// Text angle of Y annotations relative to the layout
    pub y_text_angle: Angle,
    pub title_font: Font,
    pub tick_font: Font,
}

impl LegendLayout {
    /// Derive every zone and anchor from the configuration.
    ///
    /// Tick sets are only read when tick labels are enabled; they must then
    /// hold at least one value each.
    pub fn compute(
        config: &LegendConfig,
        scaler: &Scaler,
        side: u32,
        x_ticks: &AxisTickSet,
        y_ticks: &AxisTickSet,
        measure: &dyn TextMeasure,
    ) -> Result<Self, LegendError> {
        let title_font = Font::resolve(&config.title_style, scaler);
        let tick_font = Font::resolve(&config.tick_label_style, scaler);

        let s = scaler.px(config.square_side());
        let margin = s * defaults::MARGIN_RATIO;

        let title_zone = if config.show_axis_titles {
            let x = measure.text_height(&config.title_x_lines(), &title_font);
            let y = measure.text_height(&config.title_y_lines(), &title_font);
            x.max(y) + 2.0 * margin
        } else {
            0.0
        };

        let tick_spacing = if config.show_tick_labels {
            scaler.px(config.tick_label_spacing)
        } else {
            0.0
        };
        let (tick_zone, tick_label_width) = if config.show_tick_labels {
            let first_x = x_ticks.first().ok_or(LegendError::MissingTicks { axis: Axis::X })?;
            let max_y = y_ticks.max().ok_or(LegendError::MissingTicks { axis: Axis::Y })?;
            let height_label = format_tick(first_x, config.x_tick_precision);
            let width_label = format_tick(max_y, config.y_tick_precision);
            (
                measure.text_height(&[height_label.as_str()], &tick_font) + 2.0 * margin + tick_spacing,
                measure.text_width(&[width_label.as_str()], &tick_font),
            )
        } else {
            (0.0, 0.0)
        };

        let arrow_zone = if config.show_arrows {
            s * defaults::ARROW_ZONE_RATIO
        } else {
            0.0
        };

        let reserved_edge = title_zone + tick_zone;
        let reserved_edge_with_arrows = reserved_edge + arrow_zone;
        let span = s - reserved_edge_with_arrows;
        if !(span > 0.0) {
            crate::log::warn!(
                reserved = reserved_edge_with_arrows,
                square = s,
                "annotation zones exceed the legend square"
            );
            return Err(LegendError::ZonesExceedSquare {
                reserved: reserved_edge_with_arrows,
                square: s,
            });
        }
        let cell_size = span / side as f64;
        if !cell_size.is_normal() {
            return Err(LegendError::DegenerateSquare { square: s });
        }
        let grid_origin = dvec2(reserved_edge_with_arrows, s - reserved_edge_with_arrows);

        let inset = s * defaults::ARROW_INSET_RATIO;
        let arrow_start = dvec2(reserved_edge + inset, s - reserved_edge - inset);

        let x_text_angle = Angle::ZERO;
        let y_text_angle = if config.rotated_45 {
            Angle(-90.0)
        } else {
            config.y_axis_text_direction.angle()
        };

        let mut layout = Self {
            square_size: s,
            margin,
            title_zone,
            tick_zone,
            tick_spacing,
            tick_label_width,
            arrow_zone,
            reserved_edge,
            reserved_edge_with_arrows,
            side,
            cell_size,
            grid_origin,
            arrow_start,
            arrow_x_end: dvec2(s, arrow_start.y),
            arrow_y_end: dvec2(arrow_start.x, 0.0),
            x_title_anchor: dvec2(reserved_edge_with_arrows + span / 2.0, s - title_zone / 2.0),
            y_title_anchor: dvec2(title_zone / 2.0, span / 2.0),
            ticks: TickPlacement::default(),
            x_text_angle,
            y_text_angle,
            title_font,
            tick_font,
        };

        if config.show_tick_labels {
            layout.ticks = layout.place_ticks(config, x_ticks, y_ticks);
        }

        crate::log::debug!(
            square = layout.square_size,
            title_zone = layout.title_zone,
            tick_zone = layout.tick_zone,
            arrow_zone = layout.arrow_zone,
            cell_size = layout.cell_size,
            "legend layout computed"
        );

        Ok(layout)
    }

    /// Side length of the grid zone
    pub fn grid_span(&self) -> f64 {
        self.square_size - self.reserved_edge_with_arrows
    }

    /// Top-left corner and side of a cell's square
    pub fn cell_rect(&self, cell: &GridCell) -> (DVec2, f64) {
        let top_left = dvec2(
            self.grid_origin.x + cell.x as f64 * self.cell_size,
            self.grid_origin.y - (cell.y + 1) as f64 * self.cell_size,
        );
        (top_left, self.cell_size)
    }

    /// Cell corners clockwise from the top-left
    pub fn cell_corners(&self, cell: &GridCell) -> [DVec2; 4] {
        let (tl, size) = self.cell_rect(cell);
        [
            tl,
            tl + dvec2(size, 0.0),
            tl + dvec2(size, size),
            tl + dvec2(0.0, size),
        ]
    }

    /// One label per boundary: X along the bottom, Y along the left edge.
    ///
    /// X labels are centered in the label band. Y labels are top-aligned, so
    /// their anchor is the text's top edge, offset one margin into the band
    /// rather than centered in it.
    fn place_ticks(
        &self,
        config: &LegendConfig,
        x_ticks: &AxisTickSet,
        y_ticks: &AxisTickSet,
    ) -> TickPlacement {
        let span = self.grid_span();
        let step = |n: usize| if n > 1 { span / (n - 1) as f64 } else { 0.0 };

        let x_step = step(x_ticks.len());
        // the label band excludes the spacing next to the arrow or grid
        let band = self.tick_zone - self.tick_spacing;
        let x_row = self.square_size - self.title_zone - band / 2.0;
        let x = x_ticks
            .values()
            .iter()
            .enumerate()
            .map(|(i, value)| PlacedLabel {
                text: format_tick(*value, config.x_tick_precision),
                anchor: dvec2(self.grid_origin.x + i as f64 * x_step, x_row),
            })
            .collect();

        // top edge one margin inside the band, on the side the glyphs grow away from
        let down = self.y_text_angle.radians().sin();
        let y_column = self.title_zone + band / 2.0 - down * (band / 2.0 - self.margin);
        let y_step = step(y_ticks.len());
        let y = y_ticks
            .values()
            .iter()
            .enumerate()
            .rev()
            .map(|(i, value)| PlacedLabel {
                text: format_tick(*value, config.y_tick_precision),
                anchor: dvec2(y_column, self.grid_origin.y - i as f64 * y_step),
            })
            .collect();

        TickPlacement { x, y }
    }
}
