//! The single affine transform shared by every drawn primitive
//!
//! Built fresh for each render pass from the layout, in one of two modes:
//!
//! - **Upright**: shrink uniformly and shift down so the topmost Y tick label,
//!   centered on the top grid line, is not clipped. Identity without tick
//!   labels.
//! - **Diamond**: rotate 45° counterclockwise about the square's center and
//!   scale down so the rotated content stays inscribed in the square.

use std::f64::consts::{FRAC_PI_4, SQRT_2};

use glam::{DAffine2, DVec2, dvec2};

use crate::types::Angle;

use super::defaults;
use super::layout::LegendLayout;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformMode {
    /// `p' = scale * (p + (0, shift))`
    Upright { scale: f64, shift: f64 },
    /// Rotation by 45° counterclockwise with a uniform `scale`
    Diamond { scale: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendTransform {
    pub mode: TransformMode,
    pub affine: DAffine2,
    /// Added to every layout-relative text angle to get the screen angle
    pub text_rotation: Angle,
}

impl LegendTransform {
    pub fn build(layout: &LegendLayout, rotated_45: bool) -> Self {
        let transform = if rotated_45 {
            Self::diamond(layout)
        } else {
            Self::upright(layout)
        };
        crate::log::debug!(mode = ?transform.mode, "legend transform built");
        transform
    }

    pub fn identity() -> Self {
        Self {
            mode: TransformMode::Upright {
                scale: 1.0,
                shift: 0.0,
            },
            affine: DAffine2::IDENTITY,
            text_rotation: Angle::ZERO,
        }
    }

    /// Make room for half the widest Y tick label above the grid.
    pub fn upright(layout: &LegendLayout) -> Self {
        let s = layout.square_size;
        let shift = layout.tick_label_width / 2.0;
        if shift <= 0.0 {
            return Self::identity();
        }
        let scale = s / (s + shift);
        Self {
            mode: TransformMode::Upright { scale, shift },
            affine: DAffine2::from_scale(DVec2::splat(scale))
                * DAffine2::from_translation(dvec2(0.0, shift)),
            text_rotation: Angle::ZERO,
        }
    }

    /// Center → rotate −45° (counterclockwise on a y-down screen) → scale →
    /// back, centered on the content square `[R, S] × [0, S − R]` where `R`
    /// is the reserved edge.
    ///
    /// The arrow zone is not part of `R`, so with arrows on the centering
    /// offset is half the title and tick zones. Hosts that instead shift by
    /// half the arrow start (`arrow_start.x / 2`, scaled) place the diamond
    /// differently whenever arrows are shown.
    pub fn diamond(layout: &LegendLayout) -> Self {
        let s = layout.square_size;
        let scale = diamond_scale(s);
        let content_center = dvec2(
            (layout.reserved_edge + s) / 2.0,
            (s - layout.reserved_edge) / 2.0,
        );
        let affine = DAffine2::from_translation(DVec2::splat(s / 2.0))
            * DAffine2::from_angle(-FRAC_PI_4)
            * DAffine2::from_scale(DVec2::splat(scale))
            * DAffine2::from_translation(-content_center);
        Self {
            mode: TransformMode::Diamond { scale },
            affine,
            text_rotation: Angle(45.0),
        }
    }

    pub fn scale(&self) -> f64 {
        match self.mode {
            TransformMode::Upright { scale, .. } | TransformMode::Diamond { scale } => scale,
        }
    }

    pub fn map_point(&self, point: DVec2) -> DVec2 {
        self.affine.transform_point2(point)
    }

    pub fn map_points<const N: usize>(&self, points: [DVec2; N]) -> [DVec2; N] {
        points.map(|p| self.map_point(p))
    }

    /// Screen angle of text laid out at `layout_angle`
    pub fn screen_angle(&self, layout_angle: Angle) -> Angle {
        layout_angle + self.text_rotation
    }
}

/// Scale of the diamond: the exact inscribing ratio `S / (S·√2)`, truncated
/// to two decimals, minus [`defaults::ROTATION_SAFETY_MARGIN`].
pub fn diamond_scale(square_size: f64) -> f64 {
    let exact = square_size / (square_size * SQRT_2);
    (exact * defaults::ROTATION_SCALE_STEPS).floor() / defaults::ROTATION_SCALE_STEPS
        - defaults::ROTATION_SAFETY_MARGIN
}
