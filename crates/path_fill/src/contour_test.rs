//! Tests for boundary flags and cyclic progress arithmetic.

use super::*;

// =============================================================================
// Batch 1: Flags and stations
// =============================================================================

#[test]
fn test_corners_map_to_even_stations() {
  assert_eq!((BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y).station(), Some(0));
  assert_eq!((BoundaryFlags::MIN_X | BoundaryFlags::MAX_Y).station(), Some(2));
  assert_eq!((BoundaryFlags::MAX_X | BoundaryFlags::MAX_Y).station(), Some(4));
  assert_eq!((BoundaryFlags::MAX_X | BoundaryFlags::MIN_Y).station(), Some(6));
}

#[test]
fn test_sides_map_to_odd_stations() {
  assert_eq!(BoundaryFlags::MIN_X.station(), Some(1));
  assert_eq!(BoundaryFlags::MAX_Y.station(), Some(3));
  assert_eq!(BoundaryFlags::MAX_X.station(), Some(5));
  assert_eq!(BoundaryFlags::MIN_Y.station(), Some(7));
}

#[test]
fn test_interior_and_invalid_combinations_have_no_station() {
  assert_eq!(BoundaryFlags::NONE.station(), None);
  assert_eq!((BoundaryFlags::MIN_X | BoundaryFlags::MAX_X).station(), None);
  assert_eq!((BoundaryFlags::MIN_Y | BoundaryFlags::MAX_Y).station(), None);
}

#[test]
fn test_corner_classification() {
  assert!((BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y).is_corner());
  assert!(!BoundaryFlags::MIN_X.is_corner());
  assert!(!BoundaryFlags::NONE.is_corner());
}

#[test]
fn test_sanitized_clears_contradictory_axes() {
  let both_x = BoundaryFlags::MIN_X | BoundaryFlags::MAX_X | BoundaryFlags::MIN_Y;
  assert_eq!(both_x.sanitized(), BoundaryFlags::MIN_Y);
  let both_y = BoundaryFlags::MIN_Y | BoundaryFlags::MAX_Y;
  assert_eq!(both_y.sanitized(), BoundaryFlags::NONE);
}

// =============================================================================
// Batch 2: Progress between stations
// =============================================================================

#[test]
fn test_progress_same_side_is_zero() {
  assert_eq!(
    boundary_progress(BoundaryFlags::MIN_X, BoundaryFlags::MIN_X),
    Some(0)
  );
}

#[test]
fn test_progress_side_to_adjacent_corner() {
  // side minX sits between corners minXminY and minXmaxY
  assert_eq!(
    boundary_progress(BoundaryFlags::MIN_X, BoundaryFlags::MIN_X | BoundaryFlags::MAX_Y),
    Some(1)
  );
  assert_eq!(
    boundary_progress(BoundaryFlags::MIN_X, BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y),
    Some(-1)
  );
}

#[test]
fn test_progress_corner_to_corner() {
  let c00 = BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y;
  let c01 = BoundaryFlags::MIN_X | BoundaryFlags::MAX_Y;
  assert_eq!(boundary_progress(c00, c01), Some(2));
  assert_eq!(boundary_progress(c01, c00), Some(-2));
}

#[test]
fn test_progress_opposite_stations_ambiguous() {
  let c00 = BoundaryFlags::MIN_X | BoundaryFlags::MIN_Y;
  let c11 = BoundaryFlags::MAX_X | BoundaryFlags::MAX_Y;
  assert_eq!(boundary_progress(c00, c11), None);
  assert_eq!(boundary_progress(BoundaryFlags::MIN_X, BoundaryFlags::MAX_X), None);
}

#[test]
fn test_progress_requires_a_shared_side() {
  // endpoints on the boundary, but the edge between them crosses the
  // interior: no shared side, no progress
  let c10 = BoundaryFlags::MAX_X | BoundaryFlags::MIN_Y;
  assert_eq!(boundary_progress(BoundaryFlags::MIN_X, c10), None);
  assert_eq!(boundary_progress(BoundaryFlags::MIN_Y, BoundaryFlags::MAX_X), None);
}

#[test]
fn test_progress_off_boundary_is_none() {
  assert_eq!(boundary_progress(BoundaryFlags::NONE, BoundaryFlags::MIN_X), None);
}

// =============================================================================
// Batch 3: Closed walks
// =============================================================================

fn corner(max_x: bool, max_y: bool) -> BoundaryFlags {
  (if max_x { BoundaryFlags::MAX_X } else { BoundaryFlags::MIN_X })
    | (if max_y { BoundaryFlags::MAX_Y } else { BoundaryFlags::MIN_Y })
}

#[test]
fn test_counter_clockwise_lap_is_minus_one_lap() {
  // (min,min) -> (max,min) -> (max,max) -> (min,max): mathematically CCW
  let walk = [
    corner(false, false),
    corner(true, false),
    corner(true, true),
    corner(false, true),
  ];
  assert_eq!(closed_walk_progress(&walk), Some(-STATIONS_PER_LAP));
}

#[test]
fn test_clockwise_lap_is_plus_one_lap() {
  let walk = [
    corner(false, false),
    corner(false, true),
    corner(true, true),
    corner(true, false),
  ];
  assert_eq!(closed_walk_progress(&walk), Some(STATIONS_PER_LAP));
}

#[test]
fn test_walk_with_collinear_side_points_still_closes() {
  // two extra stops on the minX side do not break the lap
  let walk = [
    corner(false, false),
    corner(true, false),
    corner(true, true),
    corner(false, true),
    BoundaryFlags::MIN_X,
    BoundaryFlags::MIN_X,
  ];
  assert_eq!(closed_walk_progress(&walk), Some(-STATIONS_PER_LAP));
}

#[test]
fn test_direction_reversal_rejected() {
  let walk = [
    corner(false, false),
    corner(false, true),
    corner(false, false),
    corner(true, false),
    corner(true, true),
    corner(false, true),
  ];
  assert_eq!(closed_walk_progress(&walk), None);
}

#[test]
fn test_interior_point_rejects_walk() {
  let walk = [corner(false, false), BoundaryFlags::NONE, corner(true, false)];
  assert_eq!(closed_walk_progress(&walk), None);
}
