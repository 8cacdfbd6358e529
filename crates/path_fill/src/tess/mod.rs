//! Planar triangulator contract.
//!
//! The fill engine feeds a triangulator closed contours of fudged
//! grid-space f64 positions, each vertex carrying a client id, and listens
//! for the output stream: triangles grouped by winding number, requests
//! for synthesized vertices (intersections and rectangle corners), and
//! monotone-polygon boundaries annotated with the winding on the far side
//! of each edge.
//!
//! Vertices flow client → triangulator through [`Triangulator`]; results
//! flow back through [`FillListener`]. The [`NULL_CLIENT_ID`] sentinel in
//! a triangle marks a failed run; the engine degrades such a sub-path to
//! its bounding rectangle instead of surfacing an error.

use glam::DVec2;

pub mod sweep;

pub use sweep::SweepTriangulator;

/// Vertex handle owned by the listener.
pub type ClientId = u32;

/// Sentinel id: a triangle containing it signals triangulation failure.
pub const NULL_CLIENT_ID: ClientId = u32::MAX;

/// Receives a triangulator's output stream.
pub trait FillListener {
  /// A run of triangles in a region with the given winding starts.
  fn begin_region(&mut self, winding: i32);

  /// Triangle vertices, delivered in groups of three after
  /// [`begin_region`](Self::begin_region).
  fn region_vertex(&mut self, id: ClientId);

  /// The triangulator created a vertex (an intersection) and needs an id
  /// for it. `pos` is in grid space; `data` and `weights` reference and
  /// weight the source vertices when all four ids are valid.
  fn combine(&mut self, pos: DVec2, data: [ClientId; 4], weights: [f64; 4]) -> ClientId;

  /// The triangulator needs a corner of the enclosing rectangle. The
  /// listener returns its id and grid-space position, pushed `step` fudge
  /// steps outward so repeated corner requests stay distinct.
  fn boundary_corner(&mut self, step: u32, is_max_x: bool, is_max_y: bool) -> (ClientId, DVec2);

  /// Winding filter: regions whose winding is rejected are not emitted.
  fn accepts_winding(&mut self, winding: i32) -> bool;

  /// One monotone polygon boundary: a vertex ring plus, per edge
  /// `(vertices[i], vertices[i + 1])`, the winding of the region on the
  /// far side of that edge.
  fn monotone_boundary(&mut self, winding: i32, vertices: &[ClientId], neighbor_windings: &[i32]);
}

/// Contour feeding and execution interface of a planar triangulator.
pub trait Triangulator {
  fn begin_polygon(&mut self);

  fn begin_contour(&mut self, is_closed: bool);

  /// One contour vertex: grid-space f64 position plus the client's id.
  fn add_vertex(&mut self, pos: DVec2, id: ClientId);

  fn end_contour(&mut self);

  /// Run the triangulation, streaming output into `listener`.
  fn end_polygon(&mut self, listener: &mut dyn FillListener);

  /// When set, triangle emission is skipped and only monotone boundaries
  /// are reported.
  fn set_boundary_only(&mut self, boundary_only: bool);
}
