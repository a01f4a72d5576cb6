//! Layout and rendering engine for square bivariate color legends.
//!
//! A legend is an N×N grid of color swatches, optionally annotated with axis
//! arrows, axis titles and tick value labels, optionally turned 45° into a
//! diamond. The engine computes every placement from a [`LegendConfig`] and
//! issues primitive calls on a [`RenderSurface`] supplied by the host.
//!
//! ```
//! use bivariate_legend::{AxisTickSet, LegendConfig, LegendGrid, Color, Length};
//!
//! let grid = LegendGrid::from_fn(3, |x, y| Color::rgb(80 * x as u8, 80 * y as u8, 160)).unwrap();
//! let config = LegendConfig::new(Length::mm(60.0), Length::mm(60.0))
//!     .with_arrows(true)
//!     .with_axis_titles("Income", "Density");
//! let svg = bivariate_legend::legend_svg(&config, &grid, &AxisTickSet::empty(), &AxisTickSet::empty()).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod config;
pub mod errors;
pub mod grid;
pub mod log;
pub mod render;
pub mod surface;
pub mod types;

pub use config::{ArrowStyle, LegendConfig, TextStyle, YAxisTextDirection};
pub use errors::{LegendError, SurfaceError};
pub use grid::{Axis, AxisTickSet, GridCell, LegendGrid, format_tick};
pub use render::{RecordingSurface, RenderSession, SvgSurface, render_legend};
pub use surface::{RenderSurface, TextMeasure};
pub use types::{Angle, Color, Length, Points};

/// Render a legend to a standalone SVG document.
///
/// Text is measured with the built-in proportional metrics. Returns the SVG
/// string on success, or an error with diagnostics.
pub fn legend_svg(
    config: &LegendConfig,
    grid: &LegendGrid,
    x_ticks: &AxisTickSet,
    y_ticks: &AxisTickSet,
) -> Result<String, miette::Report> {
    let side = config.square_side().raw() * config.scale_factor;
    let mut surface = SvgSurface::new(side, side);
    render_legend(&mut surface, config, grid, x_ticks, y_ticks)?;
    Ok(surface.finish().map_err(LegendError::from)?)
}
