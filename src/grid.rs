//! Input data consumed from the classification collaborator
//!
//! - [`LegendGrid`]: a validated `side × side` set of colored cells
//! - [`AxisTickSet`]: the class boundaries of one axis
//!
//! Neither type is mutated by the engine; a render pass only reads them.

use std::collections::HashSet;
use std::fmt;

use crate::errors::LegendError;
use crate::types::Color;

/// One of the two classified fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// One classification combination: column `x` (class of the first field),
/// row `y` (class of the second field) and its mixed fill color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    pub x: u32,
    pub y: u32,
    pub color: Color,
}

impl GridCell {
    pub fn new(x: u32, y: u32, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// A validated square grid of cells.
///
/// Every position in `[0, side) × [0, side)` holds exactly one cell, so the
/// cells tile the grid zone with no gap and no overlap. Cell order is kept
/// and is the drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendGrid {
    side: u32,
    cells: Vec<GridCell>,
}

impl LegendGrid {
    /// Validate an ordered list of cells.
    pub fn new(cells: Vec<GridCell>) -> Result<Self, LegendError> {
        let count = cells.len();
        if count == 0 {
            return Err(LegendError::EmptyGrid);
        }

        let side = integer_sqrt(count);
        if side * side != count {
            return Err(LegendError::NonSquareGrid {
                count,
                smaller: side * side,
                larger: (side + 1) * (side + 1),
            });
        }
        let side = u32::try_from(side).map_err(|_| LegendError::NonSquareGrid {
            count,
            smaller: side * side,
            larger: (side + 1) * (side + 1),
        })?;

        let mut seen = HashSet::with_capacity(count);
        for cell in &cells {
            if cell.x >= side || cell.y >= side {
                return Err(LegendError::CellOutOfRange {
                    x: cell.x,
                    y: cell.y,
                    side,
                });
            }
            if !seen.insert((cell.x, cell.y)) {
                return Err(LegendError::DuplicateCell { x: cell.x, y: cell.y });
            }
        }

        Ok(Self { side, cells })
    }

    /// Build a full grid row by row (y outer, x inner) from a color function.
    pub fn from_fn(side: u32, mut color: impl FnMut(u32, u32) -> Color) -> Result<Self, LegendError> {
        let cells = (0..side)
            .flat_map(|y| (0..side).map(move |x| (x, y)))
            .map(|(x, y)| GridCell::new(x, y, color(x, y)))
            .collect();
        Self::new(cells)
    }

    /// Number of classes per axis
    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Largest `n` with `n * n <= value`
fn integer_sqrt(value: usize) -> usize {
    let mut n = (value as f64).sqrt() as usize;
    while n * n > value {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= value {
        n += 1;
    }
    n
}

/// Ordered class boundaries of one axis.
///
/// Usually `classes + 1` values, one per grid line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisTickSet {
    values: Vec<f64>,
}

impl AxisTickSet {
    /// Validate boundary values for `axis` (rejects NaN and infinities).
    pub fn new(axis: Axis, values: Vec<f64>) -> Result<Self, LegendError> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(LegendError::NonFiniteTick { axis, index });
        }
        Ok(Self { values })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First boundary, the representative label for height measurement
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Largest boundary, assumed to produce the widest label
    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().max_by(f64::total_cmp)
    }
}

/// Format a boundary value with a fixed number of decimal places.
///
/// Rounding is done on the exact binary value, with exact ties going to the
/// even digit: `1.005` is stored as `1.00499…` and formats as `"1.00"` at
/// precision 2. A result that rounds to zero never carries a minus sign.
pub fn format_tick(value: f64, precision: u8) -> String {
    let text = format!("{:.prec$}", value, prec = precision as usize);
    match text.strip_prefix('-') {
        Some(unsigned) if unsigned.bytes().all(|b| b == b'0' || b == b'.') => unsigned.to_string(),
        _ => text,
    }
}
