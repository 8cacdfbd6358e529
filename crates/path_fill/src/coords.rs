//! Affine remap between path coordinates and the triangulation grid.

use glam::{DVec2, IVec2};

use crate::constants::{FUDGE_DELTA, GRID_DIM};
use crate::types::DAabb2;

/// Maps an fp64 bounding box onto the integer grid `[1, 1 + 2^24]²`.
///
/// The forward map scales each axis independently so the box fills the
/// whole grid. The fudge delta is additive and lives below f32 precision
/// at grid magnitudes; see [`crate::constants`].
#[derive(Clone, Debug)]
pub struct CoordinateConverter {
  bounds: DAabb2,
  scale: DVec2,
}

impl CoordinateConverter {
  /// Build a converter for the given box. Degenerate axes map with unit
  /// scale so the converter stays invertible.
  pub fn new(bounds: DAabb2) -> Self {
    let size = bounds.size();
    let scale = DVec2::new(
      if size.x > 0.0 {
        GRID_DIM as f64 / size.x
      } else {
        1.0
      },
      if size.y > 0.0 {
        GRID_DIM as f64 / size.y
      } else {
        1.0
      },
    );
    Self { bounds, scale }
  }

  /// Forward map to integer grid coordinates in `[1, 1 + GRID_DIM]`.
  pub fn iapply(&self, p: DVec2) -> IVec2 {
    let v = (p - self.bounds.min) * self.scale;
    IVec2::new(
      1 + v.x.clamp(0.0, GRID_DIM as f64) as i32,
      1 + v.y.clamp(0.0, GRID_DIM as f64) as i32,
    )
  }

  /// Inverse map from an integer grid point.
  pub fn unapply(&self, ip: IVec2) -> DVec2 {
    self.unapply_d(ip.as_dvec2())
  }

  /// Inverse map from fractional grid coordinates (used for vertices the
  /// triangulator synthesizes without source ids).
  pub fn unapply_d(&self, p: DVec2) -> DVec2 {
    (p - DVec2::ONE) / self.scale + self.bounds.min
  }

  /// The additive fudge offset, in grid units.
  #[inline]
  pub fn fudge_delta(&self) -> f64 {
    FUDGE_DELTA
  }

  /// The box this converter was built for.
  pub fn bounds(&self) -> DAabb2 {
    self.bounds
  }
}

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;
