//! Tests for sub-path construction and half-plane splitting.

use glam::DVec2;

use super::*;
use crate::contour::BoundaryFlags;
use crate::types::TessellatedPath;

fn square_path() -> TessellatedPath {
  TessellatedPath::new(vec![vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(0.0, 1.0),
  ]])
}

/// A zigzag strip with `n` vertices spanning [0, width] x [0, 1].
fn zigzag(n: usize, width: f64) -> TessellatedPath {
  let pts: Vec<DVec2> = (0..n)
    .map(|i| {
      let x = width * i as f64 / (n - 1) as f64;
      let y = if i % 2 == 0 { 0.25 } else { 0.75 };
      DVec2::new(x, y)
    })
    .chain([DVec2::new(width, 1.0), DVec2::new(0.0, 1.0), DVec2::new(0.0, 0.0)])
    .collect();
  TessellatedPath::new(vec![pts])
}

// =============================================================================
// Batch 1: Construction and boundary tagging
// =============================================================================

#[test]
fn test_root_tags_corner_flags() {
  let sp = SubPath::from_path(&square_path());
  let contour = &sp.contours()[0];
  assert_eq!(contour[0].flags, BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y);
  assert_eq!(contour[1].flags, BoundaryFlags::MAX_X | BoundaryFlags::MIN_Y);
  assert_eq!(contour[2].flags, BoundaryFlags::MAX_X | BoundaryFlags::MAX_Y);
  assert_eq!(contour[3].flags, BoundaryFlags::MIN_X | BoundaryFlags::MAX_Y);
}

#[test]
fn test_boundary_lap_excluded_from_point_count() {
  // the square IS its bounds, so it reduces and costs no points
  let sp = SubPath::from_path(&square_path());
  assert_eq!(sp.total_points(), 0);
}

#[test]
fn test_interior_contour_counts_points() {
  let path = TessellatedPath::new(vec![
    vec![
      DVec2::new(0.0, 0.0),
      DVec2::new(4.0, 0.0),
      DVec2::new(4.0, 4.0),
      DVec2::new(0.0, 4.0),
    ],
    vec![
      DVec2::new(1.0, 1.0),
      DVec2::new(3.0, 1.0),
      DVec2::new(3.0, 3.0),
      DVec2::new(1.0, 3.0),
    ],
  ]);
  let sp = SubPath::from_path(&path);
  // outer contour reduces, inner one does not
  assert_eq!(sp.total_points(), 4);
}

// =============================================================================
// Batch 2: Splitting
// =============================================================================

#[test]
fn test_split_reduces_both_children() {
  let sp = SubPath::from_path(&zigzag(64, 1.0));
  let parent = sp.total_points();
  let [before, after] = sp.split().expect("zigzag should split");
  assert!(before.total_points() < parent);
  assert!(after.total_points() < parent);
  assert_eq!(before.generation(), 1);
  assert_eq!(after.generation(), 1);
}

#[test]
fn test_split_children_partition_bounds() {
  let sp = SubPath::from_path(&zigzag(64, 1.0));
  let bounds = sp.bounds();
  let [before, after] = sp.split().expect("zigzag should split");
  assert_eq!(before.bounds().min, bounds.min);
  assert_eq!(after.bounds().max, bounds.max);
  // the two halves meet on the split plane
  assert!(
    before.bounds().max.x == after.bounds().min.x
      || before.bounds().max.y == after.bounds().min.y
  );
}

#[test]
fn test_elongated_box_splits_long_axis_at_midpoint() {
  let sp = SubPath::from_path(&zigzag(64, 100.0));
  let [before, after] = sp.split().expect("wide zigzag should split");
  assert_eq!(before.bounds().max.x, 50.0);
  assert_eq!(after.bounds().min.x, 50.0);
}

#[test]
fn test_crossing_points_carry_split_plane_flags() {
  let sp = SubPath::from_path(&zigzag(64, 100.0));
  let [before, after] = sp.split().expect("wide zigzag should split");
  let on_plane = |sp: &SubPath, flag: BoundaryFlags| {
    sp.contours()
      .iter()
      .flatten()
      .filter(|p| p.flags.contains(flag) && p.position.x == 50.0)
      .count()
  };
  assert!(on_plane(&before, BoundaryFlags::MAX_X) > 0);
  assert!(on_plane(&after, BoundaryFlags::MIN_X) > 0);
}

#[test]
fn test_unhelpful_split_declined() {
  // a strip zigzagging across the full width: the x median lands on an
  // extreme and the y median keeps a child as large as the parent
  let path = TessellatedPath::new(vec![vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.2),
    DVec2::new(0.0, 0.4),
    DVec2::new(1.0, 0.6),
    DVec2::new(0.0, 0.8),
    DVec2::new(1.0, 1.0),
  ]]);
  let sp = SubPath::from_path(&path);
  assert!(sp.split().is_none());
}

#[test]
fn test_flag_exclusivity_survives_splitting() {
  let sp = SubPath::from_path(&zigzag(64, 1.0));
  let [before, after] = sp.split().expect("zigzag should split");
  for child in [&before, &after] {
    for p in child.contours().iter().flatten() {
      assert!(
        !(p.flags.contains(BoundaryFlags::MIN_X) && p.flags.contains(BoundaryFlags::MAX_X)),
        "x flags must stay exclusive"
      );
      assert!(
        !(p.flags.contains(BoundaryFlags::MIN_Y) && p.flags.contains(BoundaryFlags::MAX_Y)),
        "y flags must stay exclusive"
      );
    }
  }
}
