//! Legend rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, ratios and style constants
//! - `metrics`: Proportional text metrics
//! - `layout`: Zone sizes, cell size and anchor points
//! - `transform`: The upright or diamond transform
//! - `layers`: Prepared draw layers and their dispatch
//! - `grid`, `annotations`: Layer builders
//! - `recording`, `svg`: Bundled surfaces
//!
//! Rendering happens in two phases. [`RenderSession::prepare`] validates the
//! inputs and computes every primitive; nothing touches the surface until
//! that succeeds. [`RenderSession::draw`] then replays the layers inside a
//! single save/restore pair.

pub mod annotations;
pub mod defaults;
pub mod grid;
pub mod layers;
pub mod layout;
pub mod metrics;
pub mod recording;
pub mod svg;
pub mod transform;

pub use layers::{Draw, LegendLayer};
pub use layout::LegendLayout;
pub use metrics::ProportionalMetrics;
pub use recording::{DrawCommand, RecordingSurface};
pub use svg::SvgSurface;
pub use transform::LegendTransform;

use crate::config::LegendConfig;
use crate::errors::LegendError;
use crate::grid::{AxisTickSet, LegendGrid};
use crate::surface::{RenderSurface, SavedState, TextMeasure};

use annotations::{ArrowLayer, TickLabelLayer, TitleLayer};
use grid::GridLayer;

/// Everything needed to draw one legend
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSession {
    pub layout: LegendLayout,
    pub transform: LegendTransform,
    /// In draw order: grid, arrows, titles, tick labels
    pub layers: Vec<LegendLayer>,
}

impl RenderSession {
    pub fn prepare(
        config: &LegendConfig,
        grid: &LegendGrid,
        x_ticks: &AxisTickSet,
        y_ticks: &AxisTickSet,
        measure: &dyn TextMeasure,
    ) -> Result<Self, LegendError> {
        let scaler = config.validate()?;
        let layout = LegendLayout::compute(config, &scaler, grid.side(), x_ticks, y_ticks, measure)?;
        let transform = LegendTransform::build(&layout, config.rotated_45);

        let mut layers: Vec<LegendLayer> = vec![GridLayer::build(&layout, &transform, grid).into()];
        if config.show_arrows {
            layers.push(ArrowLayer::build(&layout, &transform, config, &scaler).into());
        }
        if config.show_axis_titles {
            layers.push(TitleLayer::build(&layout, &transform, config).into());
        }
        if config.show_tick_labels {
            layers.push(TickLabelLayer::build(&layout, &transform).into());
        }

        Ok(Self {
            layout,
            transform,
            layers,
        })
    }

    /// Draw every layer; the surface state is restored even on failure.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError> {
        let mut saved = SavedState::new(surface);
        for layer in &self.layers {
            crate::log::trace!(layer = layer.name(), "drawing layer");
            layer.draw(&mut *saved)?;
        }
        Ok(())
    }
}

/// Lay out and draw a legend onto `surface`, measuring text with it.
pub fn render_legend<S: RenderSurface>(
    surface: &mut S,
    config: &LegendConfig,
    grid: &LegendGrid,
    x_ticks: &AxisTickSet,
    y_ticks: &AxisTickSet,
) -> Result<RenderSession, LegendError> {
    let session = RenderSession::prepare(config, grid, x_ticks, y_ticks, &*surface)?;
    crate::log::debug!(
        side = grid.side(),
        layers = session.layers.len(),
        rotated = config.rotated_45,
        "rendering legend"
    );
    session.draw(surface)?;
    Ok(session)
}
