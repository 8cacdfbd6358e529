//! Drives the triangulator over one sub-path and collects its output.
//!
//! The tesser feeds every discretized contour vertex through
//! [`PointHoard::apply`] with a running fudge count, so the triangulator
//! sees pairwise distinct f64 positions even where snapped vertices
//! coincide. Coming back, triangles are grouped into winding components
//! keyed by the *stored* winding (the triangulator's winding plus the
//! sub-path's winding offset), and monotone boundaries become silhouette
//! edge lists with draw and bevel flags.

use std::collections::BTreeMap;

use glam::DVec2;

use crate::constants::{FUDGE_DELTA, GRID_DIM, MIN_HEIGHT};
use crate::hoard::{HoardPath, PointHoard};
use crate::tess::{ClientId, FillListener, Triangulator, NULL_CLIENT_ID};

/// Silhouette edge of one winding component.
#[derive(Clone, Copy, Debug)]
pub struct FuzzEdge {
  pub start: u32,
  pub end: u32,
  /// Index of the following edge within the component's edge list; the
  /// edges of one monotone boundary thread into a cycle.
  pub next: u32,
  /// Real silhouette: not hugging the rectangle, different winding across.
  pub draw_edge: bool,
  /// A bevel joins this edge to the next one at their shared vertex.
  pub draw_bevel: bool,
}

/// Triangles and silhouette edges of one stored winding number.
#[derive(Clone, Debug, Default)]
pub struct WindingComponent {
  /// Vertex ids, three per triangle.
  pub triangles: Vec<u32>,
  pub edges: Vec<FuzzEdge>,
}

/// Output of one triangulation run.
#[derive(Debug, Default)]
pub struct TesserOutput {
  pub components: BTreeMap<i32, WindingComponent>,
  /// Set when the triangulator signalled failure via the null sentinel.
  pub failed: bool,
}

/// Listener state for one run.
pub struct Tesser<'a> {
  hoard: &'a mut PointHoard,
  winding_offset: i32,
  components: BTreeMap<i32, WindingComponent>,
  current_winding: i32,
  triple: [ClientId; 3],
  triple_len: usize,
  delivered: u32,
  failed: bool,
}

impl<'a> Tesser<'a> {
  /// Feed `path` through `tess` and collect its winding components.
  pub fn run<T: Triangulator>(
    hoard: &'a mut PointHoard,
    path: &HoardPath,
    tess: &mut T,
  ) -> TesserOutput {
    let mut tesser = Tesser {
      hoard,
      winding_offset: path.winding_offset,
      components: BTreeMap::new(),
      current_winding: 0,
      triple: [NULL_CLIENT_ID; 3],
      triple_len: 0,
      delivered: 0,
      failed: false,
    };

    tess.set_boundary_only(false);
    tess.begin_polygon();
    for contour in &path.contours {
      tess.begin_contour(true);
      for &(id, _) in contour {
        tesser.delivered += 1;
        let pos = tesser.hoard.apply(id, tesser.delivered);
        tess.add_vertex(pos, id);
      }
      tess.end_contour();
    }
    tess.end_polygon(&mut tesser);

    TesserOutput {
      components: tesser.components,
      failed: tesser.failed,
    }
  }

  fn flush_triple(&mut self) {
    let [a, b, c] = self.triple;
    self.triple_len = 0;
    if a == NULL_CLIENT_ID || b == NULL_CLIENT_ID || c == NULL_CLIENT_ID {
      self.failed = true;
      return;
    }
    if a == b || b == c || a == c {
      return;
    }
    let pa = self.hoard.ipoint(a).as_dvec2();
    let pb = self.hoard.ipoint(b).as_dvec2();
    let pc = self.hoard.ipoint(c).as_dvec2();
    let v = pb - pa;
    let w = pc - pa;
    let area2 = v.perp_dot(w).abs();
    if area2 <= 0.0 {
      return;
    }
    // All three altitudes at least MIN_HEIGHT, i.e. twice the area covers
    // the longest side at that height.
    let longest = v.length().max(w.length()).max((w - v).length());
    if area2 < MIN_HEIGHT * longest {
      return;
    }
    self
      .components
      .entry(self.current_winding)
      .or_default()
      .triangles
      .extend([a, b, c]);
  }
}

impl FillListener for Tesser<'_> {
  fn begin_region(&mut self, winding: i32) {
    self.current_winding = winding + self.winding_offset;
    self.triple_len = 0;
    self.components.entry(self.current_winding).or_default();
  }

  fn region_vertex(&mut self, id: ClientId) {
    self.triple[self.triple_len] = id;
    self.triple_len += 1;
    if self.triple_len == 3 {
      self.flush_triple();
    }
  }

  fn combine(&mut self, pos: DVec2, data: [ClientId; 4], weights: [f64; 4]) -> ClientId {
    let pt = if data.iter().all(|&d| d != NULL_CLIENT_ID) {
      data
        .iter()
        .zip(weights)
        .map(|(&d, w)| self.hoard.point(d) * w)
        .sum()
    } else {
      self.hoard.converter().unapply_d(pos)
    };
    self.hoard.fetch_undiscretized(pt)
  }

  fn boundary_corner(&mut self, step: u32, is_max_x: bool, is_max_y: bool) -> (ClientId, DVec2) {
    let id = self.hoard.fetch_corner(is_max_x, is_max_y);
    let ip = self.hoard.ipoint(id);
    let half = GRID_DIM / 2 + 1;
    let f = step as f64 * FUDGE_DELTA;
    let pos = DVec2::new(
      ip.x as f64 + if ip.x <= half { -f } else { f },
      ip.y as f64 + if ip.y <= half { -f } else { f },
    );
    (id, pos)
  }

  fn accepts_winding(&mut self, _winding: i32) -> bool {
    true
  }

  fn monotone_boundary(&mut self, winding: i32, vertices: &[ClientId], neighbor_windings: &[i32]) {
    if vertices.iter().any(|&v| v == NULL_CLIENT_ID) {
      self.failed = true;
      return;
    }
    debug_assert_eq!(vertices.len(), neighbor_windings.len());

    let n = vertices.len();
    let mut draws: Vec<(u32, u32, bool)> = Vec::with_capacity(n);
    for i in 0..n {
      let a = vertices[i];
      let b = vertices[(i + 1) % n];
      let hugs = self.hoard.edge_hugs_boundary(a, b);
      let same = neighbor_windings[i] == winding;
      draws.push((a, b, !hugs && !same));
    }

    let component = self
      .components
      .entry(winding + self.winding_offset)
      .or_default();
    let base = component.edges.len() as u32;
    for (i, &(a, b, draw)) in draws.iter().enumerate() {
      let next_draw = draws[(i + 1) % n].2;
      component.edges.push(FuzzEdge {
        start: a,
        end: b,
        next: base + ((i as u32 + 1) % n as u32),
        draw_edge: draw,
        draw_bevel: draw || next_draw,
      });
    }
  }
}

#[cfg(test)]
#[path = "tesser_test.rs"]
mod tesser_test;
