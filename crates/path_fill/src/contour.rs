//! Contour points tagged with bounding-rectangle boundary flags, and the
//! cyclic progress arithmetic used to fold boundary-hugging contours into
//! winding offsets.
//!
//! A point can lie on up to two sides of its sub-path rectangle; opposite
//! sides are mutually exclusive. Walking the rectangle boundary visits
//! eight stations in cyclic order, four corners interleaved with four
//! sides:
//!
//! ```text
//!             maxY
//!      2 ----- 3 ----- 4
//!      |               |
//! minX 1               5 maxX
//!      |               |
//!      0 ----- 7 ----- 6
//!             minY
//! ```
//!
//! Corner minXminY is station 0, side minX is 1, corner minXmaxY is 2,
//! side maxY is 3, corner maxXmaxY is 4, side maxX is 5, corner maxXminY
//! is 6, side minY is 7. One full lap is eight stations; a
//! counter-clockwise lap (0 → 6 → 4 → 2) advances by minus eight.

use std::ops::{BitAnd, BitOr};

use glam::DVec2;

/// Stations in one full lap of the rectangle boundary.
pub const STATIONS_PER_LAP: i32 = 8;

/// Which sides of the bounding rectangle a point lies on.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct BoundaryFlags(u8);

impl BoundaryFlags {
  pub const NONE: Self = Self(0);
  pub const MIN_X: Self = Self(1 << 0);
  pub const MAX_X: Self = Self(1 << 1);
  pub const MIN_Y: Self = Self(1 << 2);
  pub const MAX_Y: Self = Self(1 << 3);

  /// True when every bit of `other` is set in `self`.
  #[inline]
  pub fn contains(self, other: Self) -> bool {
    self.0 & other.0 == other.0
  }

  /// Remove the bits of `other`.
  #[inline]
  pub fn without(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  pub fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// On at least one side of the rectangle.
  #[inline]
  pub fn on_boundary(self) -> bool {
    self.0 != 0
  }

  /// Drop any axis whose min and max bits are both set; such a combination
  /// can only arise from unioning the flags of two distinct points and
  /// names no position on the rectangle.
  pub fn sanitized(self) -> Self {
    let mut out = self;
    if out.contains(Self::MIN_X | Self::MAX_X) {
      out = out.without(Self::MIN_X | Self::MAX_X);
    }
    if out.contains(Self::MIN_Y | Self::MAX_Y) {
      out = out.without(Self::MIN_Y | Self::MAX_Y);
    }
    out
  }

  /// Cyclic boundary station named by these flags, when they name one.
  /// Corners map to even stations, single sides to odd ones.
  pub fn station(self) -> Option<u8> {
    const MIN_X: u8 = 1 << 0;
    const MAX_X: u8 = 1 << 1;
    const MIN_Y: u8 = 1 << 2;
    const MAX_Y: u8 = 1 << 3;
    match self.0 {
      v if v == MIN_X | MIN_Y => Some(0),
      MIN_X => Some(1),
      v if v == MIN_X | MAX_Y => Some(2),
      MAX_Y => Some(3),
      v if v == MAX_X | MAX_Y => Some(4),
      MAX_X => Some(5),
      v if v == MAX_X | MIN_Y => Some(6),
      MIN_Y => Some(7),
      _ => None,
    }
  }

  /// True when the flags name one of the four corners.
  pub fn is_corner(self) -> bool {
    matches!(self.station(), Some(s) if s % 2 == 0)
  }
}

impl BitOr for BoundaryFlags {
  type Output = Self;
  fn bitor(self, rhs: Self) -> Self {
    Self(self.0 | rhs.0)
  }
}

impl BitAnd for BoundaryFlags {
  type Output = Self;
  fn bitand(self, rhs: Self) -> Self {
    Self(self.0 & rhs.0)
  }
}

/// Signed stations advanced walking the boundary from `a` to `b` along
/// one side both points share.
///
/// `Some(0)` for a stay on one side, `±1` side-to-corner, `±2`
/// corner-to-corner. `None` when either point is off the boundary or the
/// two share no side, in which case the edge cuts through the interior
/// rather than hugging the rectangle.
pub fn boundary_progress(a: BoundaryFlags, b: BoundaryFlags) -> Option<i32> {
  let sa = a.station()? as i32;
  let sb = b.station()? as i32;
  if (a & b).is_empty() {
    return None;
  }
  let mut d = (sb - sa).rem_euclid(STATIONS_PER_LAP);
  if d > STATIONS_PER_LAP / 2 {
    d -= STATIONS_PER_LAP;
  }
  Some(d)
}

/// Net stations advanced over one closed walk of boundary points.
///
/// Returns the total only when every step stays on the boundary with an
/// unambiguous direction and all nonzero steps agree on that direction;
/// `None` otherwise. A contour satisfying this with a nonzero total hugs
/// the rectangle and is equivalent to a constant winding contribution.
pub fn closed_walk_progress(flags: &[BoundaryFlags]) -> Option<i32> {
  if flags.is_empty() {
    return None;
  }
  let mut total = 0;
  let mut dir = 0;
  for i in 0..flags.len() {
    let step = boundary_progress(flags[i], flags[(i + 1) % flags.len()])?;
    if step != 0 {
      if dir != 0 && (step < 0) != (dir < 0) {
        return None;
      }
      dir = step.signum();
    }
    total += step;
  }
  Some(total)
}

/// A contour point bound to a sub-path rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourPoint {
  pub position: DVec2,
  pub flags: BoundaryFlags,
}

impl ContourPoint {
  pub fn new(position: DVec2, flags: BoundaryFlags) -> Self {
    Self { position, flags }
  }
}

#[cfg(test)]
#[path = "contour_test.rs"]
mod contour_test;
