//! Tests for the grid remap.

use glam::{DVec2, IVec2};

use super::*;
use crate::constants::GRID_DIM;
use crate::types::DAabb2;

fn unit_converter() -> CoordinateConverter {
  CoordinateConverter::new(DAabb2::new(DVec2::ZERO, DVec2::new(1.0, 1.0)))
}

#[test]
fn test_corners_map_to_grid_extremes() {
  let c = unit_converter();
  assert_eq!(c.iapply(DVec2::new(0.0, 0.0)), IVec2::new(1, 1));
  assert_eq!(
    c.iapply(DVec2::new(1.0, 1.0)),
    IVec2::new(1 + GRID_DIM, 1 + GRID_DIM)
  );
}

#[test]
fn test_grid_range_invariant() {
  let c = CoordinateConverter::new(DAabb2::new(DVec2::new(-3.0, 2.0), DVec2::new(5.0, 9.0)));
  for &p in &[
    DVec2::new(-3.0, 2.0),
    DVec2::new(5.0, 9.0),
    DVec2::new(0.31, 4.7),
    DVec2::new(4.9999, 8.9999),
    // out-of-box points clamp into range
    DVec2::new(-100.0, 100.0),
  ] {
    let ip = c.iapply(p);
    assert!(ip.x >= 1 && ip.x <= 1 + GRID_DIM, "x out of range: {ip:?}");
    assert!(ip.y >= 1 && ip.y <= 1 + GRID_DIM, "y out of range: {ip:?}");
  }
}

#[test]
fn test_unapply_inverts_corners_exactly() {
  let c = unit_converter();
  assert_eq!(c.unapply(IVec2::new(1, 1)), DVec2::new(0.0, 0.0));
  assert_eq!(
    c.unapply(IVec2::new(1 + GRID_DIM, 1 + GRID_DIM)),
    DVec2::new(1.0, 1.0)
  );
}

#[test]
fn test_roundtrip_within_grid_resolution() {
  let c = CoordinateConverter::new(DAabb2::new(DVec2::new(10.0, -5.0), DVec2::new(14.0, 3.0)));
  let resolution = 4.0 / GRID_DIM as f64;
  for &p in &[
    DVec2::new(10.1, -4.9),
    DVec2::new(12.0, 0.0),
    DVec2::new(13.999, 2.999),
  ] {
    let back = c.unapply(c.iapply(p));
    assert!(
      (back - p).length() < 2.0 * resolution,
      "roundtrip drifted: {p:?} -> {back:?}"
    );
  }
}

#[test]
fn test_degenerate_box_stays_invertible() {
  let c = CoordinateConverter::new(DAabb2::new(DVec2::new(2.0, 3.0), DVec2::new(2.0, 3.0)));
  let ip = c.iapply(DVec2::new(2.0, 3.0));
  assert_eq!(ip, IVec2::new(1, 1));
  assert_eq!(c.unapply(ip), DVec2::new(2.0, 3.0));
}

#[test]
fn test_fudge_delta_constant() {
  let c = unit_converter();
  assert_eq!(c.fudge_delta(), 1.0 / (1 << 20) as f64);
}
