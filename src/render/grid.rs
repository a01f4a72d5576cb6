//! Grid rendering: one filled quadrilateral per cell

use glam::DVec2;

use crate::errors::LegendError;
use crate::grid::LegendGrid;
use crate::surface::RenderSurface;
use crate::types::Color;

use super::layers::Draw;
use super::layout::LegendLayout;
use super::transform::LegendTransform;

/// A transformed cell ready to fill
#[derive(Debug, Clone, PartialEq)]
pub struct FilledQuad {
    pub corners: [DVec2; 4],
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayer {
    pub cells: Vec<FilledQuad>,
}

impl GridLayer {
    pub fn build(layout: &LegendLayout, transform: &LegendTransform, grid: &LegendGrid) -> Self {
        let cells = grid
            .cells()
            .iter()
            .map(|cell| FilledQuad {
                corners: transform.map_points(layout.cell_corners(cell)),
                color: cell.color,
            })
            .collect();
        Self { cells }
    }
}

impl Draw for GridLayer {
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LegendError> {
        for cell in &self.cells {
            surface.fill_polygon(&cell.corners, cell.color)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LegendConfig;
    use crate::grid::AxisTickSet;
    use crate::render::layout::tests::FixedMetrics;
    use crate::types::{Length, Scaler};
    use glam::dvec2;

    #[test]
    fn quads_follow_cell_order_and_colors() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let grid = LegendGrid::from_fn(2, |x, y| if x == y { red } else { blue }).unwrap();
        let config = LegendConfig::new(Length::mm(100.0), Length::mm(100.0));
        let scaler = Scaler::try_new(1.0).unwrap();
        let empty = AxisTickSet::empty();
        let layout = LegendLayout::compute(&config, &scaler, 2, &empty, &empty, &FixedMetrics).unwrap();
        let layer = GridLayer::build(&layout, &LegendTransform::identity(), &grid);

        assert_eq!(layer.cells.len(), 4);
        // (0, 0) is the bottom-left cell
        assert_eq!(
            layer.cells[0].corners,
            [
                dvec2(0.0, 50.0),
                dvec2(50.0, 50.0),
                dvec2(50.0, 100.0),
                dvec2(0.0, 100.0)
            ]
        );
        assert_eq!(layer.cells[0].color, red);
        assert_eq!(layer.cells[1].color, blue);
        // (1, 1) is the top-right cell
        assert_eq!(layer.cells[3].corners[0], dvec2(50.0, 0.0));
    }
}
