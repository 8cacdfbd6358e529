//! Slab-sweep reference triangulator.
//!
//! Decomposes the plane inside the enclosing rectangle into trapezoids
//! between consecutive active segments, carrying the winding number as a
//! prefix sum of signed segment crossings, then emits each trapezoid as a
//! fan of triangles plus one monotone boundary ring.
//!
//! ```text
//!  y3 ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄
//!     │      ╲  w=1  ╱│    w=0      │   active segments of a slab are
//!  y2 ┄┄┄┄┄┄┄┄╲┄┄┄┄╱┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄   ordered by x; the gap between two
//!     │  w=0  ╱ w=1 ╲ │    w=0     │   neighbors is one trapezoid run,
//!  y1 ┄┄┄┄┄┄╱┄┄┄┄┄┄┄┄╲┄┄┄┄┄┄┄┄┄┄┄┄┄   merged vertically while the same
//!     │    ╱    w=1    ╲    w=0    │   pair of segments bounds it
//!  y0 ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄
//! ```
//!
//! Processing passes:
//!
//! 1. **Segments**: contour edges, endpoints ordered bottom-up, each with
//!    a winding delta (+1 when the drawn direction is descending).
//! 2. **Intersections**: pairwise crossings split segments; the crossing
//!    vertex comes from the listener's combine callback.
//! 3. **Sweep**: one slab per event-y interval; trapezoids continue while
//!    their bounding sub-segments and winding hold, and close into a fan
//!    of triangles plus a monotone ring otherwise.
//!
//! Horizontal trapezoid edges are subdivided at every segment touching the
//! shared event line from either side, and the subdivision vertices are
//! cached per (segment, y), so adjacent regions reference identical vertex
//! ids and the output mesh stays watertight.

use std::collections::HashMap;

use glam::DVec2;

use super::{ClientId, FillListener, Triangulator};

/// One end of a sweep segment.
#[derive(Clone, Copy, Debug)]
struct SegEnd {
  pos: DVec2,
  id: ClientId,
}

/// A sweep segment with endpoints ordered by (y, x).
#[derive(Clone, Copy, Debug)]
struct SubSeg {
  lo: SegEnd,
  hi: SegEnd,
  /// Winding change when crossing this segment left to right.
  delta: i32,
}

impl SubSeg {
  fn x_at(&self, y: f64) -> f64 {
    let dy = self.hi.pos.y - self.lo.pos.y;
    if dy == 0.0 {
      self.lo.pos.x
    } else {
      self.lo.pos.x + (self.hi.pos.x - self.lo.pos.x) * (y - self.lo.pos.y) / dy
    }
  }

  fn spans(&self, y0: f64, y1: f64) -> bool {
    self.lo.pos.y <= y0 && self.hi.pos.y >= y1
  }

  fn touches(&self, y: f64) -> bool {
    self.lo.pos.y <= y && self.hi.pos.y >= y
  }
}

/// Active segments of one slab, ordered left to right.
struct SlabInfo {
  active: Vec<usize>,
  /// x of each active segment at the slab midline.
  xs: Vec<f64>,
  /// Winding after crossing each active segment.
  prefix: Vec<i32>,
}

impl SlabInfo {
  /// Winding of the region containing `x`.
  fn winding_at(&self, x: f64) -> i32 {
    let mut w = 0;
    for (k, &sx) in self.xs.iter().enumerate() {
      if sx < x {
        w = self.prefix[k];
      } else {
        break;
      }
    }
    w
  }
}

/// A trapezoid run still growing upward.
struct OpenTrap {
  left: usize,
  right: usize,
  winding: i32,
  /// Bottom chain, left to right, corners included.
  bottom: Vec<SegEnd>,
  /// Winding below each bottom sub-edge.
  bottom_neighbors: Vec<i32>,
}

/// Built-in slab-sweep triangulator implementing the fill contract.
#[derive(Default)]
pub struct SweepTriangulator {
  contours: Vec<Vec<(DVec2, ClientId)>>,
  current: Vec<(DVec2, ClientId)>,
  boundary_only: bool,
}

impl SweepTriangulator {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Triangulator for SweepTriangulator {
  fn begin_polygon(&mut self) {
    self.contours.clear();
    self.current.clear();
  }

  fn begin_contour(&mut self, _is_closed: bool) {
    self.current.clear();
  }

  fn add_vertex(&mut self, pos: DVec2, id: ClientId) {
    self.current.push((pos, id));
  }

  fn end_contour(&mut self) {
    if !self.current.is_empty() {
      self.contours.push(std::mem::take(&mut self.current));
    }
  }

  fn end_polygon(&mut self, listener: &mut dyn FillListener) {
    let contours = std::mem::take(&mut self.contours);
    Sweep {
      listener,
      segs: Vec::new(),
      cuts: HashMap::new(),
      boundary_only: self.boundary_only,
    }
    .run(&contours);
  }

  fn set_boundary_only(&mut self, boundary_only: bool) {
    self.boundary_only = boundary_only;
  }
}

struct Sweep<'l> {
  listener: &'l mut dyn FillListener,
  segs: Vec<SubSeg>,
  /// Cache of cut vertices per (segment, y-bits); shared across regions.
  cuts: HashMap<(usize, u64), SegEnd>,
  boundary_only: bool,
}

impl<'l> Sweep<'l> {
  fn run(mut self, contours: &[Vec<(DVec2, ClientId)>]) {
    self.build_segments(contours);
    if self.segs.len() < 2 {
      return;
    }

    let mut events: Vec<f64> = self
      .segs
      .iter()
      .flat_map(|s| [s.lo.pos.y, s.hi.pos.y])
      .collect();
    events.sort_by(|a, b| a.partial_cmp(b).unwrap());
    events.dedup();

    let mut open: Vec<OpenTrap> = Vec::new();
    let mut below: Option<SlabInfo> = None;
    for w in 0..events.len() {
      let y = events[w];
      let above = if w + 1 < events.len() {
        Some(self.slab_info(y, events[w + 1]))
      } else {
        None
      };

      let mut next_open: Vec<OpenTrap> = Vec::new();
      if let Some(info) = &above {
        for k in 1..info.active.len() {
          let left = info.active[k - 1];
          let right = info.active[k];
          let winding = info.prefix[k - 1];
          if let Some(pos) = open
            .iter()
            .position(|t| t.left == left && t.right == right && t.winding == winding)
          {
            next_open.push(open.swap_remove(pos));
          } else {
            next_open.push(self.open_trap(left, right, winding, y, below.as_ref(), info));
          }
        }
      }
      for trap in open.drain(..) {
        self.close_trap(trap, y, below.as_ref(), above.as_ref());
      }
      open = next_open;
      below = above;
    }
  }

  /// Pass 1 + 2: rectangle sides, contour edges, pairwise intersection
  /// splitting.
  fn build_segments(&mut self, contours: &[Vec<(DVec2, ClientId)>]) {
    let (ll_id, ll) = self.listener.boundary_corner(0, false, false);
    let (ul_id, ul) = self.listener.boundary_corner(1, false, true);
    let (lr_id, lr) = self.listener.boundary_corner(2, true, false);
    let (ur_id, ur) = self.listener.boundary_corner(3, true, true);

    let mut raw: Vec<SubSeg> = Vec::new();
    raw.push(SubSeg {
      lo: SegEnd { pos: ll, id: ll_id },
      hi: SegEnd { pos: ul, id: ul_id },
      delta: 0,
    });
    raw.push(SubSeg {
      lo: SegEnd { pos: lr, id: lr_id },
      hi: SegEnd { pos: ur, id: ur_id },
      delta: 0,
    });

    let key = |p: DVec2| (p.y, p.x);
    for contour in contours {
      let n = contour.len();
      for i in 0..n {
        let (pa, ia) = contour[i];
        let (pb, ib) = contour[(i + 1) % n];
        if pa == pb {
          continue;
        }
        let a = SegEnd { pos: pa, id: ia };
        let b = SegEnd { pos: pb, id: ib };
        let (lo, hi, delta) = if key(pa) > key(pb) {
          (b, a, 1)
        } else {
          (a, b, -1)
        };
        raw.push(SubSeg { lo, hi, delta });
      }
    }

    // Pairwise crossings; each one synthesizes a vertex via combine.
    let mut splits: Vec<Vec<(f64, SegEnd)>> = vec![Vec::new(); raw.len()];
    for i in 0..raw.len() {
      for j in (i + 1)..raw.len() {
        if let Some((ti, tj, pos)) = crossing(&raw[i], &raw[j]) {
          let id = self.listener.combine(
            pos,
            [raw[i].lo.id, raw[i].hi.id, raw[j].lo.id, raw[j].hi.id],
            [(1.0 - ti) / 2.0, ti / 2.0, (1.0 - tj) / 2.0, tj / 2.0],
          );
          let end = SegEnd { pos, id };
          splits[i].push((ti, end));
          splits[j].push((tj, end));
        }
      }
    }

    for (seg, mut sp) in raw.into_iter().zip(splits) {
      sp.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
      sp.dedup_by(|a, b| a.0 == b.0);
      let mut start = seg.lo;
      for (_, end) in sp.into_iter().chain(std::iter::once((1.0, seg.hi))) {
        self.push_piece(start, end, seg.delta);
        start = end;
      }
    }
  }

  fn push_piece(&mut self, a: SegEnd, b: SegEnd, delta: i32) {
    if a.pos == b.pos {
      return;
    }
    let key = |p: DVec2| (p.y, p.x);
    let (lo, hi) = if key(a.pos) > key(b.pos) { (b, a) } else { (a, b) };
    self.segs.push(SubSeg { lo, hi, delta });
  }

  fn slab_info(&self, y0: f64, y1: f64) -> SlabInfo {
    let mid = 0.5 * (y0 + y1);
    let mut active: Vec<usize> = (0..self.segs.len())
      .filter(|&i| self.segs[i].spans(y0, y1))
      .collect();
    active.sort_by(|&a, &b| {
      self.segs[a]
        .x_at(mid)
        .partial_cmp(&self.segs[b].x_at(mid))
        .unwrap()
    });
    let xs: Vec<f64> = active.iter().map(|&i| self.segs[i].x_at(mid)).collect();
    let mut prefix = Vec::with_capacity(active.len());
    let mut running = 0;
    for &i in &active {
      running += self.segs[i].delta;
      prefix.push(running);
    }
    SlabInfo { active, xs, prefix }
  }

  /// Vertex where segment `seg` meets the event line `y`. Endpoints keep
  /// their own ids; interior cuts are synthesized once and cached.
  fn cut_point(&mut self, seg: usize, y: f64) -> SegEnd {
    let s = self.segs[seg];
    if y == s.lo.pos.y {
      return s.lo;
    }
    if y == s.hi.pos.y {
      return s.hi;
    }
    let key = (seg, y.to_bits());
    if let Some(&end) = self.cuts.get(&key) {
      return end;
    }
    let t = (y - s.lo.pos.y) / (s.hi.pos.y - s.lo.pos.y);
    let mut pos = s.lo.pos.lerp(s.hi.pos, t);
    pos.y = y;
    let id = self.listener.combine(
      pos,
      [s.lo.id, s.hi.id, s.lo.id, s.hi.id],
      [(1.0 - t) / 2.0, t / 2.0, (1.0 - t) / 2.0, t / 2.0],
    );
    let end = SegEnd { pos, id };
    self.cuts.insert(key, end);
    end
  }

  /// Cut vertices strictly inside `(xl, xr)` on the event line `y`, from
  /// segments active in either adjacent slab. Both regions sharing the
  /// line see the same set, keeping the mesh watertight.
  fn merged_cuts(
    &mut self,
    y: f64,
    xl: f64,
    xr: f64,
    a: Option<&SlabInfo>,
    b: Option<&SlabInfo>,
    skip: [usize; 2],
  ) -> Vec<SegEnd> {
    let mut segs: Vec<usize> = Vec::new();
    for info in a.into_iter().chain(b) {
      for &s in &info.active {
        if !skip.contains(&s) && self.segs[s].touches(y) && !segs.contains(&s) {
          segs.push(s);
        }
      }
    }
    let mut cuts: Vec<SegEnd> = segs
      .into_iter()
      .map(|s| self.cut_point(s, y))
      .filter(|c| c.pos.x > xl && c.pos.x < xr)
      .collect();
    cuts.sort_by(|p, q| p.pos.x.partial_cmp(&q.pos.x).unwrap());
    cuts.dedup_by(|p, q| p.id == q.id);
    cuts
  }

  fn open_trap(
    &mut self,
    left: usize,
    right: usize,
    winding: i32,
    y: f64,
    below: Option<&SlabInfo>,
    above: &SlabInfo,
  ) -> OpenTrap {
    let lb = self.cut_point(left, y);
    let rb = self.cut_point(right, y);
    let cuts = self.merged_cuts(y, lb.pos.x, rb.pos.x, below, Some(above), [left, right]);

    let mut bottom = Vec::with_capacity(cuts.len() + 2);
    bottom.push(lb);
    bottom.extend(cuts);
    bottom.push(rb);

    let bottom_neighbors = (0..bottom.len() - 1)
      .map(|i| {
        let xm = 0.5 * (bottom[i].pos.x + bottom[i + 1].pos.x);
        below.map_or(0, |info| info.winding_at(xm))
      })
      .collect();

    OpenTrap {
      left,
      right,
      winding,
      bottom,
      bottom_neighbors,
    }
  }

  fn close_trap(
    &mut self,
    trap: OpenTrap,
    y: f64,
    below: Option<&SlabInfo>,
    above: Option<&SlabInfo>,
  ) {
    if !self.listener.accepts_winding(trap.winding) {
      return;
    }

    let lt = self.cut_point(trap.left, y);
    let rt = self.cut_point(trap.right, y);
    let top_cuts = self.merged_cuts(
      y,
      lt.pos.x,
      rt.pos.x,
      below,
      above,
      [trap.left, trap.right],
    );

    // Top sub-edge neighbors, left to right across [lt, cuts.., rt].
    let mut top_stops: Vec<f64> = Vec::with_capacity(top_cuts.len() + 2);
    top_stops.push(lt.pos.x);
    top_stops.extend(top_cuts.iter().map(|c| c.pos.x));
    top_stops.push(rt.pos.x);
    let top_neighbors: Vec<i32> = (0..top_stops.len() - 1)
      .map(|i| {
        let xm = 0.5 * (top_stops[i] + top_stops[i + 1]);
        above.map_or(0, |info| info.winding_at(xm))
      })
      .collect();

    // Counter-clockwise ring: bottom left→right, right side up, top
    // right→left, left side down. `nbrs[i]` belongs to the edge from
    // ring[i] to ring[i + 1], so each push after the first carries the
    // neighbor of the edge arriving at the pushed vertex.
    let mut ring: Vec<SegEnd> = trap.bottom;
    let mut nbrs: Vec<i32> = trap.bottom_neighbors;
    ring.push(rt);
    nbrs.push(trap.winding + self.segs[trap.right].delta);
    for (cut, nbr) in top_cuts
      .into_iter()
      .rev()
      .zip(top_neighbors.iter().rev().copied())
    {
      ring.push(cut);
      nbrs.push(nbr);
    }
    ring.push(lt);
    nbrs.push(top_neighbors[0]);
    nbrs.push(trap.winding - self.segs[trap.left].delta);

    // Drop zero-length edges from coincident corners: keep the start
    // vertex of every non-degenerate edge, in order.
    loop {
      let n = ring.len();
      let mut fring = Vec::with_capacity(n);
      let mut fnbrs = Vec::with_capacity(n);
      for i in 0..n {
        if ring[i].id == ring[(i + 1) % n].id {
          continue;
        }
        fring.push(ring[i]);
        fnbrs.push(nbrs[i]);
      }
      let stable = fring.len() == ring.len();
      ring = fring;
      nbrs = fnbrs;
      if stable {
        break;
      }
    }
    if ring.len() < 3 {
      return;
    }

    if !self.boundary_only {
      self.listener.begin_region(trap.winding);
      for k in 1..ring.len() - 1 {
        self.listener.region_vertex(ring[0].id);
        self.listener.region_vertex(ring[k].id);
        self.listener.region_vertex(ring[k + 1].id);
      }
    }

    let ids: Vec<ClientId> = ring.iter().map(|e| e.id).collect();
    self.listener.monotone_boundary(trap.winding, &ids, &nbrs);
  }
}

/// Proper interior crossing of two segments, as parameters along each and
/// the crossing position. Parallel and endpoint-touching pairs yield
/// nothing.
fn crossing(p: &SubSeg, q: &SubSeg) -> Option<(f64, f64, DVec2)> {
  let d1 = p.hi.pos - p.lo.pos;
  let d2 = q.hi.pos - q.lo.pos;
  let denom = d1.perp_dot(d2);
  if denom == 0.0 {
    return None;
  }
  let w = q.lo.pos - p.lo.pos;
  let t = w.perp_dot(d2) / denom;
  let u = w.perp_dot(d1) / denom;
  if t <= 0.0 || t >= 1.0 || u <= 0.0 || u >= 1.0 {
    return None;
  }
  Some((t, u, p.lo.pos + d1 * t))
}

#[cfg(test)]
#[path = "sweep_test.rs"]
mod sweep_test;
