//! Subset tree: recursive half-plane partition of a filled path with lazy
//! realization, child merging, and clip-driven selection.
//!
//! Nodes are numbered in depth-first preorder at construction; the ids are
//! stable across equal inputs. A node owns either its not-yet-triangulated
//! sub-path or its two children; realization is one-way and idempotent,
//! and an interior node realizes by merging its children's packed data
//! rather than re-triangulating.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::builder;
use crate::builder::SubsetData;
use crate::constants::{BOUNDS_INFLATE, POINTS_PER_SUBSET, RECURSION_DEPTH};
use crate::subpath::SubPath;
use crate::types::{Aabb2, DAabb2};

enum Content {
  /// Leaf awaiting triangulation.
  Pending(Box<SubPath>),
  /// Realized leaf.
  Ready(Box<SubsetData>),
  /// Interior node; data appears once both children are realized.
  Split {
    children: Box<[SubsetNode; 2]>,
    data: Option<Box<SubsetData>>,
  },
}

/// One node of the subset tree.
pub struct SubsetNode {
  id: u32,
  subtree_size: u32,
  bounds: DAabb2,
  bounds_f32: Aabb2,
  content: Content,
  /// (attributes, indices) once known; an upper bound for interiors.
  sizes: Option<(usize, usize)>,
}

impl SubsetNode {
  /// Build the tree skeleton under `subpath`, assigning preorder ids
  /// starting at `id`. No triangulation happens here.
  pub fn build(subpath: SubPath, id: u32) -> SubsetNode {
    let bounds = subpath.bounds();
    let bounds_f32 = bounds.as_aabb2();

    let mut content = None;
    if subpath.generation() < RECURSION_DEPTH && subpath.total_points() > POINTS_PER_SUBSET {
      if let Some([before, after]) = subpath.split() {
        let c0 = SubsetNode::build(before, id + 1);
        let c1 = SubsetNode::build(after, id + 1 + c0.subtree_size);
        content = Some(Content::Split {
          children: Box::new([c0, c1]),
          data: None,
        });
      }
    }
    let content = content.unwrap_or_else(|| Content::Pending(Box::new(subpath)));

    let subtree_size = 1
      + match &content {
        Content::Split { children, .. } => children[0].subtree_size + children[1].subtree_size,
        _ => 0,
      };

    SubsetNode {
      id,
      subtree_size,
      bounds,
      bounds_f32,
      content,
      sizes: None,
    }
  }

  pub fn id(&self) -> u32 {
    self.id
  }

  /// Nodes in this subtree, self included.
  pub fn subtree_size(&self) -> u32 {
    self.subtree_size
  }

  pub fn bounds(&self) -> DAabb2 {
    self.bounds
  }

  pub fn bounds_f32(&self) -> Aabb2 {
    self.bounds_f32
  }

  pub fn is_leaf(&self) -> bool {
    !matches!(self.content, Content::Split { .. })
  }

  pub fn children(&self) -> Option<&[SubsetNode; 2]> {
    match &self.content {
      Content::Split { children, .. } => Some(&**children),
      _ => None,
    }
  }

  /// Realized data, once [`make_ready`](Self::make_ready) ran.
  pub fn data(&self) -> Option<&SubsetData> {
    match &self.content {
      Content::Ready(data) => Some(&**data),
      Content::Split {
        data: Some(data), ..
      } => Some(&**data),
      _ => None,
    }
  }

  /// Force realization of this node (and, for interiors, its subtree).
  /// Idempotent; the pending-to-ready transition happens exactly once.
  pub fn make_ready(&mut self) {
    match &mut self.content {
      Content::Ready(_) => {}
      Content::Pending(_) => {
        let pending =
          std::mem::replace(&mut self.content, Content::Ready(Box::new(SubsetData::default())));
        if let Content::Pending(subpath) = pending {
          let data = builder::realize(&subpath);
          self.sizes = Some((data.attribute_count(), data.index_count()));
          self.content = Content::Ready(Box::new(data));
        }
      }
      Content::Split { children, data } => {
        if data.is_none() {
          children[0].make_ready();
          children[1].make_ready();
          let merged = SubsetData::merge(
            children[0].data().expect("child realized"),
            children[1].data().expect("child realized"),
          );
          self.sizes = Some((merged.attribute_count(), merged.index_count()));
          *data = Some(Box::new(merged));
        }
      }
    }
  }

  /// The node with preorder id `id` within this subtree.
  ///
  /// # Panics
  /// When `id` is outside the subtree.
  pub fn find_mut(&mut self, id: u32) -> &mut SubsetNode {
    assert!(
      id >= self.id && id < self.id + self.subtree_size,
      "subset id {id} outside tree"
    );
    if id == self.id {
      return self;
    }
    match &mut self.content {
      Content::Split { children, .. } => {
        let [c0, c1] = &mut **children;
        if id < c1.id {
          c0.find_mut(id)
        } else {
          c1.find_mut(id)
        }
      }
      _ => unreachable!("leaf cannot contain id {id}"),
    }
  }

  /// Collect every not-yet-realized leaf for bulk realization.
  pub fn collect_pending<'a>(&'a mut self, out: &mut Vec<&'a mut SubsetNode>) {
    if matches!(self.content, Content::Pending(_)) {
      out.push(self);
      return;
    }
    if let Content::Split { children, .. } = &mut self.content {
      let [c0, c1] = &mut **children;
      c0.collect_pending(out);
      c1.collect_pending(out);
    }
  }

  /// Select the subsets to draw under the given clip half-planes (already
  /// in this tree's coordinates) and size caps, appending ids to `out`.
  pub fn select(
    &mut self,
    clip_eqs: &[Vec3],
    max_attr: usize,
    max_idx: usize,
    out: &mut [u32],
    count: &mut usize,
  ) {
    let mut poly: SmallVec<[Vec2; 12]> = SmallVec::new();
    let size = self.bounds_f32.max - self.bounds_f32.min;
    let inflate = size * BOUNDS_INFLATE;
    let inflated = Aabb2 {
      min: self.bounds_f32.min - inflate,
      max: self.bounds_f32.max + inflate,
    };
    poly.extend(inflated.bounding_path());

    let clipped = clip_convex(&mut poly, clip_eqs);
    if poly.is_empty() {
      return;
    }
    if !clipped || self.is_leaf() {
      self.select_unculled(max_attr, max_idx, out, count);
      return;
    }
    if let Content::Split { children, .. } = &mut self.content {
      let [c0, c1] = &mut **children;
      c0.select(clip_eqs, max_attr, max_idx, out, count);
      c1.select(clip_eqs, max_attr, max_idx, out, count);
    }
  }

  /// Emit this node when its size bounds fit the caps, else descend and
  /// emit children, learning this node's bounds on the way back up.
  fn select_unculled(&mut self, max_attr: usize, max_idx: usize, out: &mut [u32], count: &mut usize) {
    if self.sizes.is_none() && self.is_leaf() {
      self.make_ready();
    }
    if let Some((attrs, idxs)) = self.sizes {
      if attrs <= max_attr && idxs <= max_idx {
        emit(self.id, out, count);
        return;
      }
    }
    match &mut self.content {
      Content::Split { children, .. } => {
        let [c0, c1] = &mut **children;
        c0.select_unculled(max_attr, max_idx, out, count);
        c1.select_unculled(max_attr, max_idx, out, count);
        if let (Some(a), Some(b)) = (c0.sizes, c1.sizes) {
          self.sizes = Some((a.0 + b.0, a.1 + b.1));
        }
      }
      // A leaf over the caps cannot subdivide further.
      _ => emit(self.id, out, count),
    }
  }
}

fn emit(id: u32, out: &mut [u32], count: &mut usize) {
  assert!(*count < out.len(), "selection buffer too small");
  out[*count] = id;
  *count += 1;
}

/// Clip a convex polygon against the half-planes `eq · (x, y, 1) >= 0`.
/// Returns whether any vertex was cut away; the polygon may become empty.
pub(crate) fn clip_convex(poly: &mut SmallVec<[Vec2; 12]>, clip_eqs: &[Vec3]) -> bool {
  let mut clipped = false;
  for eq in clip_eqs {
    if poly.is_empty() {
      break;
    }
    let mut next: SmallVec<[Vec2; 12]> = SmallVec::new();
    for i in 0..poly.len() {
      let a = poly[i];
      let b = poly[(i + 1) % poly.len()];
      let da = eq.dot(Vec3::new(a.x, a.y, 1.0));
      let db = eq.dot(Vec3::new(b.x, b.y, 1.0));
      if da >= 0.0 {
        next.push(a);
      } else {
        clipped = true;
      }
      if (da < 0.0) != (db < 0.0) {
        let t = da / (da - db);
        next.push(a + (b - a) * t);
      }
    }
    *poly = next;
  }
  clipped
}

#[cfg(test)]
#[path = "subset_test.rs"]
mod subset_test;
