//! Prepared draw layers
//!
//! Each layer holds primitives already mapped through the legend transform,
//! so drawing is a plain replay. Layers are drawn in a fixed order: grid,
//! arrows, titles, tick labels.

use enum_dispatch::enum_dispatch;

use crate::errors::LegendError;
use crate::surface::RenderSurface;

use super::annotations::{ArrowLayer, TickLabelLayer, TitleLayer};
use super::grid::GridLayer;

/// Common behavior for all layers
#[enum_dispatch]
pub trait Draw {
    /// Issue this layer's primitives
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// A layer enum wrapping all layer types
#[enum_dispatch(Draw)]
#[derive(Debug, Clone, PartialEq)]
pub enum LegendLayer {
    Grid(GridLayer),
    Arrows(ArrowLayer),
    Titles(TitleLayer),
    TickLabels(TickLabelLayer),
}
