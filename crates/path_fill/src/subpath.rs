//! A path fragment bound to a rectangle, and its half-plane splitting.
//!
//! Splitting walks every contour against the split line. Points on the
//! line belong to both halves; edges straddling the line gain an
//! interpolated crossing point in each half carrying the surviving
//! boundary flags of its endpoints plus the flag of the new child
//! boundary. Contours that end up hugging a child's rectangle are folded
//! into a winding offset later, during discretization.

use glam::DVec2;

use crate::constants::SIZE_MAX_RATIO;
use crate::contour::{closed_walk_progress, BoundaryFlags, ContourPoint};
use crate::types::{DAabb2, TessellatedPath};

/// Axis of a half-plane split.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
  X,
  Y,
}

impl Axis {
  /// Project a point onto this axis.
  #[inline]
  pub fn of(self, p: DVec2) -> f64 {
    match self {
      Axis::X => p.x,
      Axis::Y => p.y,
    }
  }

  fn min_flag(self) -> BoundaryFlags {
    match self {
      Axis::X => BoundaryFlags::MIN_X,
      Axis::Y => BoundaryFlags::MIN_Y,
    }
  }

  fn max_flag(self) -> BoundaryFlags {
    match self {
      Axis::X => BoundaryFlags::MAX_X,
      Axis::Y => BoundaryFlags::MAX_Y,
    }
  }

  fn both_flags(self) -> BoundaryFlags {
    self.min_flag() | self.max_flag()
  }
}

/// One closed contour of a sub-path.
pub type SubContour = Vec<ContourPoint>;

/// A path fragment bound to a double-precision rectangle.
///
/// `total_points` counts only contours that do not hug the rectangle
/// boundary; hugging contours reduce to winding offsets and cost the
/// triangulator nothing.
#[derive(Clone, Debug)]
pub struct SubPath {
  bounds: DAabb2,
  contours: Vec<SubContour>,
  generation: u32,
  total_points: usize,
}

impl SubPath {
  /// Root sub-path over a whole tessellated path: every point tagged with
  /// the sides of the tight bounds it lies on.
  pub fn from_path(path: &TessellatedPath) -> Self {
    let bounds = path.bounds();
    let contours = path
      .contours()
      .iter()
      .map(|c| {
        c.iter()
          .map(|&p| ContourPoint::new(p, flags_for(&bounds, p)))
          .collect()
      })
      .collect();
    Self::new(bounds, contours, 0)
  }

  fn new(bounds: DAabb2, contours: Vec<SubContour>, generation: u32) -> Self {
    let total_points = contours
      .iter()
      .filter(|c| !is_boundary_lap(c))
      .map(|c| c.len())
      .sum();
    Self {
      bounds,
      contours,
      generation,
      total_points,
    }
  }

  pub fn bounds(&self) -> DAabb2 {
    self.bounds
  }

  pub fn contours(&self) -> &[SubContour] {
    &self.contours
  }

  /// How many splits produced this sub-path.
  pub fn generation(&self) -> u32 {
    self.generation
  }

  /// Point count over contours the triangulator will actually see.
  pub fn total_points(&self) -> usize {
    self.total_points
  }

  /// Split into two halves, or `None` when no split shrinks both halves
  /// below this sub-path's point count.
  pub fn split(&self) -> Option<[SubPath; 2]> {
    let (axis, value) = self.choose_split();
    assert!(value.is_finite(), "splitting coordinate must be finite");

    let mut before = Vec::new();
    let mut after = Vec::new();
    for contour in &self.contours {
      split_contour(contour, axis, value, &mut before, &mut after);
    }

    let mut before_bounds = self.bounds;
    let mut after_bounds = self.bounds;
    match axis {
      Axis::X => {
        before_bounds.max.x = value;
        after_bounds.min.x = value;
      }
      Axis::Y => {
        before_bounds.max.y = value;
        after_bounds.min.y = value;
      }
    }

    let before = SubPath::new(before_bounds, before, self.generation + 1);
    let after = SubPath::new(after_bounds, after, self.generation + 1);
    if before.total_points >= self.total_points || after.total_points >= self.total_points {
      return None;
    }
    Some([before, after])
  }

  /// Splitting axis and value: midpoint of the longer axis for elongated
  /// boxes, otherwise the point median of whichever axis yields fewer
  /// points across both halves.
  fn choose_split(&self) -> (Axis, f64) {
    let size = self.bounds.size();
    if SIZE_MAX_RATIO > 0.0 {
      if size.x >= size.y * SIZE_MAX_RATIO {
        return (Axis::X, self.bounds.center().x);
      }
      if size.y >= size.x * SIZE_MAX_RATIO {
        return (Axis::Y, self.bounds.center().y);
      }
    }
    let (vx, cx) = self.split_cost(Axis::X);
    let (vy, cy) = self.split_cost(Axis::Y);
    if cx <= cy {
      (Axis::X, vx)
    } else {
      (Axis::Y, vy)
    }
  }

  /// Median candidate for `axis` and the number of points both halves
  /// would hold together (on-line points and crossings count on both
  /// sides).
  fn split_cost(&self, axis: Axis) -> (f64, usize) {
    let mut vals: Vec<f64> = self
      .contours
      .iter()
      .flatten()
      .map(|p| axis.of(p.position))
      .collect();
    if vals.is_empty() {
      return (axis.of(self.bounds.center()), 0);
    }
    vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let value = vals[vals.len() / 2];

    let mut total = 0usize;
    for contour in &self.contours {
      let n = contour.len();
      for i in 0..n {
        let cp = axis.of(contour[i].position);
        let cq = axis.of(contour[(i + 1) % n].position);
        if cp <= value {
          total += 1;
        }
        if cp >= value {
          total += 1;
        }
        if (cp < value && cq > value) || (cp > value && cq < value) {
          total += 2;
        }
      }
    }
    (value, total)
  }
}

fn flags_for(bounds: &DAabb2, p: DVec2) -> BoundaryFlags {
  let mut flags = BoundaryFlags::NONE;
  if p.x == bounds.min.x {
    flags = flags | BoundaryFlags::MIN_X;
  } else if p.x == bounds.max.x {
    flags = flags | BoundaryFlags::MAX_X;
  }
  if p.y == bounds.min.y {
    flags = flags | BoundaryFlags::MIN_Y;
  } else if p.y == bounds.max.y {
    flags = flags | BoundaryFlags::MAX_Y;
  }
  flags
}

fn is_boundary_lap(contour: &SubContour) -> bool {
  if !contour.iter().all(|p| p.flags.on_boundary()) {
    return false;
  }
  let flags: Vec<BoundaryFlags> = contour.iter().map(|p| p.flags).collect();
  matches!(closed_walk_progress(&flags), Some(total) if total != 0)
}

/// Split one contour against `axis = value`, pushing the nonempty halves.
fn split_contour(
  points: &[ContourPoint],
  axis: Axis,
  value: f64,
  before: &mut Vec<SubContour>,
  after: &mut Vec<SubContour>,
) {
  let mut b = Vec::new();
  let mut a = Vec::new();
  let n = points.len();
  for i in 0..n {
    let p = points[i];
    let q = points[(i + 1) % n];
    let cp = axis.of(p.position);
    let cq = axis.of(q.position);

    if cp <= value {
      let mut flags = p.flags;
      if cp == value {
        flags = flags.without(axis.both_flags()) | axis.max_flag();
      }
      b.push(ContourPoint::new(p.position, flags.sanitized()));
    }
    if cp >= value {
      let mut flags = p.flags;
      if cp == value {
        flags = flags.without(axis.both_flags()) | axis.min_flag();
      }
      a.push(ContourPoint::new(p.position, flags.sanitized()));
    }

    if (cp < value && cq > value) || (cp > value && cq < value) {
      let t = (value - cp) / (cq - cp);
      let mut pos = p.position.lerp(q.position, t);
      match axis {
        Axis::X => pos.x = value,
        Axis::Y => pos.y = value,
      }
      let shared = (p.flags | q.flags).without(axis.both_flags());
      b.push(ContourPoint::new(pos, (shared | axis.max_flag()).sanitized()));
      a.push(ContourPoint::new(pos, (shared | axis.min_flag()).sanitized()));
    }
  }
  if !b.is_empty() {
    before.push(b);
  }
  if !a.is_empty() {
    after.push(a);
  }
}

#[cfg(test)]
#[path = "subpath_test.rs"]
mod subpath_test;
