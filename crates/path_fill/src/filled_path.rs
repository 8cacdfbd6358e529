//! Caller-facing filled path: a spatial hierarchy of triangulated
//! sub-regions over one tessellated planar path.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ TessellatedPath                                                  │
//! │      │ FilledPath::new: tree skeleton only, no triangulation    │
//! │      ▼                                                           │
//! │ SubsetNode (root)                                                │
//! │      │ recursive half-plane splits, preorder ids                 │
//! │      ▼                                                           │
//! │ leaves: SubPath ──realize──▶ PointHoard ─▶ Tesser ─▶ SubsetData  │
//! │      │                                      (fill + fuzz chunks) │
//! │      ▼                                                           │
//! │ interiors: merge children's SubsetData upward on demand          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Realization is lazy: `subset(i)` forces one subset,
//! `select_subsets` forces the leaves it needs for size bounds, and
//! `make_ready_all` realizes every leaf in parallel up front.

use glam::{Mat3, Vec2, Vec3};
use rayon::prelude::*;

use crate::attrib;
use crate::attrib::{FillData, FuzzData};
use crate::builder::SubsetData;
use crate::subpath::SubPath;
use crate::subset::SubsetNode;
use crate::types::{Aabb2, FillRule, TessellatedPath};

/// A filled path: the spatial hierarchy plus its packed geometry.
///
/// One instance is single-threaded; separate instances may be used in
/// parallel freely.
pub struct FilledPath {
  root: SubsetNode,
}

impl FilledPath {
  /// Build the subset tree over a tessellated path. Splits are decided
  /// here; triangulation is deferred until a subset is first needed.
  pub fn new(path: &TessellatedPath) -> Self {
    Self {
      root: SubsetNode::build(SubPath::from_path(path), 0),
    }
  }

  /// Total number of subsets (tree nodes). Subset ids are
  /// `0..number_subsets()`, assigned in depth-first preorder.
  pub fn number_subsets(&self) -> usize {
    self.root.subtree_size() as usize
  }

  /// Access subset `i`, realizing it first if needed. Idempotent: the
  /// same id always yields the same data.
  pub fn subset(&mut self, i: usize) -> Subset<'_> {
    let node = self.root.find_mut(i as u32);
    node.make_ready();
    Subset {
      bounds: node.bounds_f32(),
      data: node.data().expect("subset realized"),
    }
  }

  /// Realize every leaf in parallel, then merge interiors bottom-up.
  /// Afterwards no call on this instance triangulates anything.
  pub fn make_ready_all(&mut self) {
    let mut pending = Vec::new();
    self.root.collect_pending(&mut pending);
    pending.into_par_iter().for_each(|node| node.make_ready());
    self.root.make_ready();
  }

  /// Select the subsets to draw: clip the tree against the half-planes
  /// `eq · (clip_matrix_local · (x, y, 1)) >= 0`, pruning subtrees whose
  /// rectangles fall outside and aggregating unclipped subtrees into
  /// single subsets no larger than the given attribute and index caps.
  /// Returns how many ids were written to `out`.
  pub fn select_subsets(
    &mut self,
    clip_equations: &[Vec3],
    clip_matrix_local: Mat3,
    max_attr: usize,
    max_idx: usize,
    out: &mut [u32],
  ) -> usize {
    let local: Vec<Vec3> = clip_equations
      .iter()
      .map(|&eq| clip_matrix_local.transpose() * eq)
      .collect();
    let mut count = 0;
    self.root.select(&local, max_attr, max_idx, out, &mut count);
    count
  }

  /// Bounds of the whole path.
  pub fn bounds(&self) -> Aabb2 {
    self.root.bounds_f32()
  }

  /// Index chunk id holding exactly the triangles of winding `w`.
  pub fn fill_chunk_from_winding_number(w: i32) -> usize {
    attrib::fill_chunk_from_winding_number(w)
  }

  /// Index chunk id of a fill rule.
  pub fn fill_chunk_from_fill_rule(rule: FillRule) -> usize {
    attrib::fill_chunk_from_fill_rule(rule)
  }

  /// Fuzz chunk id of winding `w`.
  pub fn aa_fuzz_chunk_from_winding_number(w: i32) -> usize {
    attrib::aa_fuzz_chunk_from_winding_number(w)
  }
}

/// Borrowed view of one realized subset.
pub struct Subset<'a> {
  bounds: Aabb2,
  data: &'a SubsetData,
}

impl Subset<'_> {
  /// The subset rectangle as a closed four-segment path.
  pub fn bounding_path(&self) -> [Vec2; 4] {
    self.bounds.bounding_path()
  }

  pub fn bounds(&self) -> Aabb2 {
    self.bounds
  }

  /// Winding numbers present in this subset's triangulation, ascending.
  pub fn winding_numbers(&self) -> &[i32] {
    &self.data.windings
  }

  /// Packed fill geometry.
  pub fn fill_data(&self) -> &FillData {
    &self.data.fill
  }

  /// Packed anti-alias fuzz geometry.
  pub fn fuzz_data(&self) -> &FuzzData {
    &self.data.fuzz
  }
}

#[cfg(test)]
#[path = "filled_path_test.rs"]
mod filled_path_test;
