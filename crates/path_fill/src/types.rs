//! Core geometric types shared across the fill engine.

use glam::{DVec2, Vec2};

/// Double-precision axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb2 {
  /// Minimum corner (inclusive).
  pub min: DVec2,
  /// Maximum corner (inclusive).
  pub max: DVec2,
}

impl DAabb2 {
  /// Create a rectangle from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on both axes.
  pub fn new(min: DVec2, max: DVec2) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y,
      "rectangle min must be <= max on both axes"
    );
    Self { min, max }
  }

  /// Tight rectangle over a point set. Empty input yields a zero rectangle
  /// at the origin.
  pub fn from_points<I: IntoIterator<Item = DVec2>>(points: I) -> Self {
    let mut min = DVec2::splat(f64::INFINITY);
    let mut max = DVec2::splat(f64::NEG_INFINITY);
    for p in points {
      min = min.min(p);
      max = max.max(p);
    }
    if min.x > max.x {
      return Self {
        min: DVec2::ZERO,
        max: DVec2::ZERO,
      };
    }
    Self { min, max }
  }

  /// Size of the rectangle (max - min).
  #[inline]
  pub fn size(&self) -> DVec2 {
    self.max - self.min
  }

  /// Center of the rectangle.
  #[inline]
  pub fn center(&self) -> DVec2 {
    (self.min + self.max) * 0.5
  }

  /// One of the four corners.
  #[inline]
  pub fn corner(&self, max_x: bool, max_y: bool) -> DVec2 {
    DVec2::new(
      if max_x { self.max.x } else { self.min.x },
      if max_y { self.max.y } else { self.min.y },
    )
  }

  /// Narrow to single precision.
  pub fn as_aabb2(&self) -> Aabb2 {
    Aabb2 {
      min: self.min.as_vec2(),
      max: self.max.as_vec2(),
    }
  }
}

/// Single-precision rectangle handed to render-side consumers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
  pub min: Vec2,
  pub max: Vec2,
}

impl Aabb2 {
  /// One of the four corners.
  #[inline]
  pub fn corner(&self, max_x: bool, max_y: bool) -> Vec2 {
    Vec2::new(
      if max_x { self.max.x } else { self.min.x },
      if max_y { self.max.y } else { self.min.y },
    )
  }

  /// The rectangle as a closed four-segment path, counter-clockwise.
  pub fn bounding_path(&self) -> [Vec2; 4] {
    [
      self.corner(false, false),
      self.corner(true, false),
      self.corner(true, true),
      self.corner(false, true),
    ]
  }
}

/// Fill rules selectable at draw time. The discriminants are the index
/// chunk ids of the packed fill geometry; chunk ids for specific winding
/// numbers start at [`FILL_RULE_COUNT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillRule {
  /// Inside where the winding number is odd.
  OddEven = 0,
  /// Inside where the winding number is nonzero.
  Nonzero = 1,
  /// Inside where the winding number is even (including zero).
  ComplementOddEven = 2,
  /// Inside where the winding number is zero.
  ComplementNonzero = 3,
}

/// Number of fill rules; also the id of the first per-winding index chunk.
pub const FILL_RULE_COUNT: usize = 4;

/// A tessellated planar path: closed polygonal contours with implicit
/// winding orientation, ready for filling. Curve flattening happens
/// upstream; this type is read-only input.
#[derive(Clone, Debug)]
pub struct TessellatedPath {
  contours: Vec<Vec<DVec2>>,
  bounds: DAabb2,
}

impl TessellatedPath {
  /// Wrap flattened contours. Contours with fewer than three points cannot
  /// enclose area and are kept only for bounds purposes downstream; empty
  /// contours are discarded.
  pub fn new(contours: Vec<Vec<DVec2>>) -> Self {
    let contours: Vec<Vec<DVec2>> = contours.into_iter().filter(|c| !c.is_empty()).collect();
    let bounds = DAabb2::from_points(contours.iter().flatten().copied());
    Self { contours, bounds }
  }

  /// The closed contours.
  pub fn contours(&self) -> &[Vec<DVec2>] {
    &self.contours
  }

  /// Tight bounds over all contour points.
  pub fn bounds(&self) -> DAabb2 {
    self.bounds
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
