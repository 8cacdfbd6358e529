//! Deduplicating, discretizing point table feeding the triangulator.
//!
//! Every point of a sub-path is snapped to the integer grid; points that
//! claim a boundary side are forced onto that side exactly, so everything
//! on one side becomes collinear after snapping. Snap-coincident points
//! collapse to one id. The triangulator nevertheless needs pairwise
//! distinct f64 input, which [`PointHoard::apply`] provides by pushing the
//! snapped grid position a per-vertex number of fudge steps toward the
//! grid center.
//!
//! Contour generation runs a five-step pipeline per input contour:
//!
//! ```text
//!   snap + drop consecutive duplicates
//!     → trim cyclically equal head/tail
//!       → discard contours under three vertices
//!         → unloop repeated vertices into separate simple contours
//!           → fold boundary laps into the winding offset
//! ```

use std::collections::HashMap;

use glam::{DVec2, IVec2};

use crate::constants::{FUDGE_DELTA, GRID_DIM};
use crate::contour::{closed_walk_progress, BoundaryFlags, STATIONS_PER_LAP};
use crate::coords::CoordinateConverter;
use crate::subpath::SubPath;
use crate::types::DAabb2;

/// One discretized contour: hoard ids plus surviving boundary flags.
pub type HoardContour = Vec<(u32, BoundaryFlags)>;

/// Discretized contours of one sub-path plus the winding offset folded out
/// of boundary-hugging contours.
#[derive(Debug, Default)]
pub struct HoardPath {
  pub contours: Vec<HoardContour>,
  pub winding_offset: i32,
}

/// Point table of one sub-path realization.
pub struct PointHoard {
  converter: CoordinateConverter,
  pts: Vec<DVec2>,
  ipts: Vec<IVec2>,
  map: HashMap<IVec2, u32>,
}

impl PointHoard {
  pub fn new(bounds: DAabb2) -> Self {
    Self {
      converter: CoordinateConverter::new(bounds),
      pts: Vec::new(),
      ipts: Vec::new(),
      map: HashMap::new(),
    }
  }

  pub fn converter(&self) -> &CoordinateConverter {
    &self.converter
  }

  pub fn len(&self) -> usize {
    self.pts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pts.is_empty()
  }

  /// The path-space position first fetched for `id`.
  #[inline]
  pub fn point(&self, id: u32) -> DVec2 {
    self.pts[id as usize]
  }

  /// The snapped grid position of `id`.
  #[inline]
  pub fn ipoint(&self, id: u32) -> IVec2 {
    self.ipts[id as usize]
  }

  /// The snapped path-space position of `id` (grid position mapped back).
  /// Coincident boundary points of sibling sub-paths agree bit-exactly
  /// here.
  #[inline]
  pub fn snapped(&self, id: u32) -> DVec2 {
    self.converter.unapply(self.ipts[id as usize])
  }

  fn push(&mut self, pt: DVec2, ip: IVec2) -> u32 {
    let id = self.pts.len() as u32;
    self.pts.push(pt);
    self.ipts.push(ip);
    id
  }

  /// Snap `pt` to the grid, force claimed boundary sides exact, and
  /// deduplicate against previously fetched points.
  pub fn fetch_discretized(&mut self, pt: DVec2, flags: BoundaryFlags) -> u32 {
    let mut ip = self.converter.iapply(pt);
    if flags.contains(BoundaryFlags::MIN_X) {
      ip.x = 1;
    }
    if flags.contains(BoundaryFlags::MAX_X) {
      ip.x = 1 + GRID_DIM;
    }
    if flags.contains(BoundaryFlags::MIN_Y) {
      ip.y = 1;
    }
    if flags.contains(BoundaryFlags::MAX_Y) {
      ip.y = 1 + GRID_DIM;
    }
    if let Some(&id) = self.map.get(&ip) {
      return id;
    }
    let id = self.push(pt, ip);
    self.map.insert(ip, id);
    id
  }

  /// Snap `pt` without deduplication; used for vertices the triangulator
  /// synthesizes, which must keep their own identity.
  pub fn fetch_undiscretized(&mut self, pt: DVec2) -> u32 {
    let ip = self.converter.iapply(pt);
    self.push(pt, ip)
  }

  /// The canonical point of one rectangle corner.
  pub fn fetch_corner(&mut self, is_max_x: bool, is_max_y: bool) -> u32 {
    let ip = IVec2::new(
      if is_max_x { 1 + GRID_DIM } else { 1 },
      if is_max_y { 1 + GRID_DIM } else { 1 },
    );
    if let Some(&id) = self.map.get(&ip) {
      return id;
    }
    let pt = self.converter.bounds().corner(is_max_x, is_max_y);
    let id = self.push(pt, ip);
    self.map.insert(ip, id);
    id
  }

  /// Grid-space delivery position of vertex `id`, pushed `k` fudge steps
  /// toward the grid center. Distinct `k` per delivered vertex keeps the
  /// triangulator's input pairwise distinct in f64 even where ids repeat.
  pub fn apply(&self, id: u32, k: u32) -> DVec2 {
    let ip = self.ipts[id as usize];
    let half = GRID_DIM / 2 + 1;
    let f = k as f64 * FUDGE_DELTA;
    DVec2::new(
      ip.x as f64 + if ip.x <= half { f } else { -f },
      ip.y as f64 + if ip.y <= half { f } else { -f },
    )
  }

  /// True when the edge `(a, b)` runs along one extreme of the grid on
  /// some axis. Such edges were manufactured by splitting, not drawn by
  /// the input, and get no anti-alias fuzz.
  pub fn edge_hugs_boundary(&self, a: u32, b: u32) -> bool {
    let pa = self.ipts[a as usize];
    let pb = self.ipts[b as usize];
    hugs_axis(pa.x, pb.x) || hugs_axis(pa.y, pb.y)
  }

  /// Discretize one sub-path into simple contours, folding boundary laps
  /// into the winding offset.
  pub fn generate(&mut self, subpath: &SubPath) -> HoardPath {
    let mut out = HoardPath::default();
    for contour in subpath.contours() {
      let mut pts: HoardContour = Vec::with_capacity(contour.len());
      for cp in contour {
        let id = self.fetch_discretized(cp.position, cp.flags);
        match pts.last_mut() {
          Some(last) if last.0 == id => last.1 = (last.1 | cp.flags).sanitized(),
          _ => pts.push((id, cp.flags)),
        }
      }
      while pts.len() > 1 && pts.first().map(|p| p.0) == pts.last().map(|p| p.0) {
        let tail = pts.pop().unwrap();
        pts[0].1 = (pts[0].1 | tail.1).sanitized();
      }
      if pts.len() < 3 {
        continue;
      }
      for simple in unloop(pts) {
        if simple.len() < 3 {
          continue;
        }
        let flags: Vec<BoundaryFlags> = simple.iter().map(|p| p.1).collect();
        match closed_walk_progress(&flags) {
          Some(total) if total != 0 => {
            assert!(
              total % STATIONS_PER_LAP == 0,
              "boundary lap must close to whole laps, got {total} stations"
            );
            out.winding_offset -= total / STATIONS_PER_LAP;
          }
          _ => out.contours.push(simple),
        }
      }
    }
    out
  }
}

#[inline]
fn hugs_axis(a: i32, b: i32) -> bool {
  (a <= 1 && b <= 1) || (a >= GRID_DIM - 1 && b >= GRID_DIM - 1)
}

/// Split a closed contour at repeated vertices until every piece visits
/// each vertex once. Quadratic in contour length.
fn unloop(points: HoardContour) -> Vec<HoardContour> {
  let mut stack = vec![points];
  let mut out = Vec::new();
  'outer: while let Some(pts) = stack.pop() {
    for i in 0..pts.len() {
      for j in (i + 1)..pts.len() {
        if pts[i].0 == pts[j].0 {
          let inner: HoardContour = pts[i..j].to_vec();
          let mut rest = pts;
          rest.drain(i..j);
          stack.push(inner);
          stack.push(rest);
          continue 'outer;
        }
      }
    }
    out.push(pts);
  }
  out
}

#[cfg(test)]
#[path = "hoard_test.rs"]
mod hoard_test;
