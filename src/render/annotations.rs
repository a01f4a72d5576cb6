//! Annotation rendering: axis arrows, axis titles and tick labels

use glam::DVec2;

use crate::config::LegendConfig;
use crate::errors::LegendError;
use crate::surface::{HAlign, LineStyle, LineStyleScope, RenderSurface, TextBlock, VAlign};
use crate::types::{Angle, Scaler};

use super::layers::Draw;
use super::layout::{LegendLayout, PlacedLabel};
use super::transform::LegendTransform;

/// The two axis arrows, both starting at the grid's outer corner
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowLayer {
    pub style: LineStyle,
    pub x_axis: [DVec2; 2],
    pub y_axis: [DVec2; 2],
}

impl ArrowLayer {
    pub fn build(
        layout: &LegendLayout,
        transform: &LegendTransform,
        config: &LegendConfig,
        scaler: &Scaler,
    ) -> Self {
        Self {
            style: LineStyle::resolve(&config.arrow_style, scaler),
            x_axis: transform.map_points([layout.arrow_start, layout.arrow_x_end]),
            y_axis: transform.map_points([layout.arrow_start, layout.arrow_y_end]),
        }
    }
}

impl Draw for ArrowLayer {
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError> {
        let mut scope = LineStyleScope::begin(surface, &self.style)?;
        scope.stroke_polyline(&self.x_axis)?;
        scope.stroke_polyline(&self.y_axis)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "arrows"
    }
}

/// Both axis titles, X first
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayer {
    pub x: TextBlock,
    pub y: TextBlock,
}

impl TitleLayer {
    pub fn build(layout: &LegendLayout, transform: &LegendTransform, config: &LegendConfig) -> Self {
        let block = |lines: Vec<&str>, anchor: DVec2, angle: Angle| TextBlock {
            lines: lines.into_iter().map(str::to_string).collect(),
            anchor: transform.map_point(anchor),
            rotation: transform.screen_angle(angle).radians(),
            h_align: HAlign::Center,
            v_align: VAlign::Center,
            font: layout.title_font.clone(),
        };
        Self {
            x: block(config.title_x_lines(), layout.x_title_anchor, layout.x_text_angle),
            y: block(config.title_y_lines(), layout.y_title_anchor, layout.y_text_angle),
        }
    }
}

impl Draw for TitleLayer {
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError> {
        surface.draw_text(&self.x)?;
        surface.draw_text(&self.y)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "titles"
    }
}

/// Tick labels: X left to right, then Y top to bottom
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabelLayer {
    pub labels: Vec<TextBlock>,
}

impl TickLabelLayer {
    pub fn build(layout: &LegendLayout, transform: &LegendTransform) -> Self {
        let place = |label: &PlacedLabel, angle: Angle, v_align: VAlign| TextBlock {
            lines: vec![label.text.clone()],
            anchor: transform.map_point(label.anchor),
            rotation: transform.screen_angle(angle).radians(),
            h_align: HAlign::Center,
            v_align,
            font: layout.tick_font.clone(),
        };
        let x = layout
            .ticks
            .x
            .iter()
            .map(|label| place(label, layout.x_text_angle, VAlign::Center));
        let y = layout
            .ticks
            .y
            .iter()
            .map(|label| place(label, layout.y_text_angle, VAlign::Top));
        Self {
            labels: x.chain(y).collect(),
        }
    }
}

impl Draw for TickLabelLayer {
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError> {
        for label in &self.labels {
            surface.draw_text(label)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "tick labels"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YAxisTextDirection;
    use crate::grid::Axis;
    use crate::render::layout::tests::{FixedMetrics, ticks};
    use crate::types::Length;
    use std::f64::consts::FRAC_PI_2;

    fn layout(config: &LegendConfig) -> (LegendLayout, Scaler) {
        let scaler = Scaler::try_new(config.scale_factor).unwrap();
        let layout = LegendLayout::compute(
            config,
            &scaler,
            3,
            &ticks(Axis::X, &[0.0, 1.0, 2.0, 3.0]),
            &ticks(Axis::Y, &[10.0, 20.0, 30.0, 40.0]),
            &FixedMetrics,
        )
        .unwrap();
        (layout, scaler)
    }

    fn config() -> LegendConfig {
        LegendConfig::new(Length::mm(100.0), Length::mm(100.0))
    }

    #[test]
    fn arrows_share_start_and_reach_edges() {
        let config = config().with_arrows(true);
        let (layout, scaler) = layout(&config);
        let layer = ArrowLayer::build(&layout, &LegendTransform::identity(), &config, &scaler);
        assert_eq!(layer.x_axis[0], layer.y_axis[0]);
        assert_eq!(layer.x_axis[1].x, 100.0);
        assert_eq!(layer.y_axis[1].y, 0.0);
        assert!((layer.style.width - 0.8).abs() < 1e-12);
    }

    #[test]
    fn titles_rotate_with_y_direction() {
        let config = config()
            .with_axis_titles("Income", "Density")
            .with_y_axis_text_direction(YAxisTextDirection::Clockwise);
        let (layout, _) = layout(&config);
        let layer = TitleLayer::build(&layout, &LegendTransform::identity(), &config);
        assert_eq!(layer.x.lines, vec!["Income"]);
        assert_eq!(layer.x.rotation, 0.0);
        assert!((layer.y.rotation + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(layer.y.h_align, HAlign::Center);
    }

    #[test]
    fn tick_labels_x_then_reversed_y() {
        let config = config().with_tick_labels(true).with_tick_precisions(0, 1);
        let (layout, _) = layout(&config);
        let layer = TickLabelLayer::build(&layout, &LegendTransform::identity());
        let texts: Vec<&str> = layer.labels.iter().map(|l| l.lines[0].as_str()).collect();
        assert_eq!(texts, ["0", "1", "2", "3", "40.0", "30.0", "20.0", "10.0"]);
        assert!(layer.labels[..4].iter().all(|l| l.v_align == VAlign::Center));
        assert!(layer.labels[4..].iter().all(|l| l.v_align == VAlign::Top));
        // the topmost Y label sits on the top grid line
        assert!(layer.labels[4].anchor.y.abs() < 1e-9);
    }
}
