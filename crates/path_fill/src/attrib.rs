//! GPU attribute and index chunk packing for fill and fuzz geometry.
//!
//! # Fill chunks
//!
//! One attribute block per subset and many index chunks, all sub-ranges
//! of one shared index buffer. The buffer groups triangles by winding
//! class (odd windings, then nonzero even, then zero) so every fill
//! rule is a single contiguous range:
//!
//! ```text
//!  indices: [ odd windings | even nonzero | zero ]
//!           |── odd-even ──|
//!           |────── nonzero ─────|
//!                          |── complement-odd-even ──|
//!                                         |─ compl-nonzero ─|
//! ```
//!
//! Chunk ids `[0, FILL_RULE_COUNT)` are the rules; per-winding chunks
//! follow with `chunk(w) = FILL_RULE_COUNT + sign + 2(|w| - 1)`.
//!
//! # Fuzz chunks
//!
//! One attribute and index chunk per winding, located by the interleaved
//! encoding 0, -1, 1, -2, 2, … Each drawn edge emits a quad straddling
//! the edge; each bevel a triangle at the joint, on a fresh draw layer so
//! later edges paint over earlier ones.

use glam::Vec2;

use crate::tesser::FuzzEdge;
use crate::types::{FillRule, FILL_RULE_COUNT};

/// Index chunk id of a fill rule.
#[inline]
pub fn fill_chunk_from_fill_rule(rule: FillRule) -> usize {
  rule as usize
}

/// Index chunk id holding exactly the triangles of winding `w`.
pub fn fill_chunk_from_winding_number(w: i32) -> usize {
  if w == 0 {
    return FillRule::ComplementNonzero as usize;
  }
  let sign = usize::from(w < 0);
  FILL_RULE_COUNT + sign + 2 * (w.unsigned_abs() as usize - 1)
}

/// Fuzz chunk id of winding `w`: the interleaving 0, -1, 1, -2, 2, …
#[inline]
pub fn aa_fuzz_chunk_from_winding_number(w: i32) -> usize {
  2 * w.unsigned_abs() as usize - usize::from(w < 0)
}

/// Fill vertex: snapped path-space position.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillVertex {
  pub position: [f32; 2],
}

/// Fill geometry of one subset.
#[derive(Clone, Debug, Default)]
pub struct FillData {
  attributes: Vec<FillVertex>,
  indices: Vec<u32>,
  /// (start, length) per chunk id.
  chunks: Vec<(u32, u32)>,
  /// (winding, start, length), ascending by winding.
  winding_ranges: Vec<(i32, u32, u32)>,
}

impl FillData {
  /// Pack per-winding triangle index lists over one attribute block.
  pub fn pack(attributes: Vec<FillVertex>, mut per_winding: Vec<(i32, Vec<u32>)>) -> FillData {
    // odd, then even nonzero, then zero; ascending winding inside a class
    let class = |w: i32| -> u32 {
      if w.rem_euclid(2) == 1 {
        0
      } else if w != 0 {
        1
      } else {
        2
      }
    };
    per_winding.sort_by_key(|&(w, _)| (class(w), w));

    let mut indices = Vec::new();
    let mut winding_ranges = Vec::new();
    let mut odd_end = 0u32;
    let mut even_end = 0u32;
    for (w, tris) in &per_winding {
      let start = indices.len() as u32;
      indices.extend_from_slice(tris);
      winding_ranges.push((*w, start, tris.len() as u32));
      if class(*w) == 0 {
        odd_end = indices.len() as u32;
      }
      if class(*w) <= 1 {
        even_end = indices.len() as u32;
      }
    }
    let len = indices.len() as u32;

    let max_chunk = per_winding
      .iter()
      .map(|&(w, _)| fill_chunk_from_winding_number(w))
      .max()
      .unwrap_or(0)
      .max(FILL_RULE_COUNT - 1);
    let mut chunks = vec![(0u32, 0u32); max_chunk + 1];
    chunks[FillRule::OddEven as usize] = (0, odd_end);
    chunks[FillRule::Nonzero as usize] = (0, even_end);
    chunks[FillRule::ComplementOddEven as usize] = (odd_end, len - odd_end);
    chunks[FillRule::ComplementNonzero as usize] = (even_end, len - even_end);
    for &(w, start, count) in &winding_ranges {
      chunks[fill_chunk_from_winding_number(w)] = (start, count);
    }
    winding_ranges.sort_by_key(|&(w, _, _)| w);

    FillData {
      attributes,
      indices,
      chunks,
      winding_ranges,
    }
  }

  /// Concatenate two subsets' fill geometry, regrouping the shared index
  /// buffer so rule contiguity survives the merge.
  pub fn merge(a: &FillData, b: &FillData) -> FillData {
    let offset = a.attributes.len() as u32;
    let mut attributes = Vec::with_capacity(a.attributes.len() + b.attributes.len());
    attributes.extend_from_slice(&a.attributes);
    attributes.extend_from_slice(&b.attributes);

    let mut per_winding: Vec<(i32, Vec<u32>)> = Vec::new();
    for &(w, start, count) in &a.winding_ranges {
      let tris = a.indices[start as usize..(start + count) as usize].to_vec();
      per_winding.push((w, tris));
    }
    for &(w, start, count) in &b.winding_ranges {
      let tris: Vec<u32> = b.indices[start as usize..(start + count) as usize]
        .iter()
        .map(|&i| i + offset)
        .collect();
      match per_winding.iter_mut().find(|(pw, _)| *pw == w) {
        Some((_, existing)) => existing.extend(tris),
        None => per_winding.push((w, tris)),
      }
    }
    Self::pack(attributes, per_winding)
  }

  pub fn attributes(&self) -> &[FillVertex] {
    &self.attributes
  }

  pub fn indices(&self) -> &[u32] {
    &self.indices
  }

  /// The index sub-range of one chunk id; empty when absent.
  pub fn chunk(&self, id: usize) -> &[u32] {
    match self.chunks.get(id) {
      Some(&(start, count)) => &self.indices[start as usize..(start + count) as usize],
      None => &[],
    }
  }

  /// The index sub-range of one fill rule.
  pub fn rule(&self, rule: FillRule) -> &[u32] {
    self.chunk(fill_chunk_from_fill_rule(rule))
  }

  /// Winding numbers present, ascending.
  pub fn winding_numbers(&self) -> impl Iterator<Item = i32> + '_ {
    self.winding_ranges.iter().map(|&(w, _, _)| w)
  }

  pub fn attribute_count(&self) -> usize {
    self.attributes.len()
  }

  pub fn index_count(&self) -> usize {
    self.indices.len()
  }
}

/// Fuzz vertex: position, outward edge normal, side sign, draw layer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FuzzVertex {
  pub position: [f32; 2],
  pub normal: [f32; 2],
  /// +1 on the outward row of a quad, -1 on the inward row.
  pub sign: f32,
  pub layer: f32,
}

/// Fuzz geometry of one winding number.
#[derive(Clone, Debug)]
pub struct FuzzChunk {
  pub winding: i32,
  pub attributes: Vec<FuzzVertex>,
  pub indices: Vec<u32>,
  /// Draw layers used; merging stacks one child's layers above the other's.
  pub layers: u32,
}

/// Fuzz geometry of one subset: chunks located by the interleaved winding
/// encoding.
#[derive(Clone, Debug, Default)]
pub struct FuzzData {
  chunks: Vec<Option<FuzzChunk>>,
}

impl FuzzData {
  /// Pack the silhouette edges of one winding component. `position`
  /// resolves a hoard vertex id to its snapped f32 position.
  pub fn push_component<F: Fn(u32) -> Vec2>(&mut self, winding: i32, edges: &[FuzzEdge], position: F) {
    let mut chunk = FuzzChunk {
      winding,
      attributes: Vec::new(),
      indices: Vec::new(),
      layers: 0,
    };

    let normal_of = |e: &FuzzEdge| -> Vec2 {
      let t = (position(e.end) - position(e.start)).normalize_or_zero();
      Vec2::new(-t.y, t.x)
    };

    for edge in edges.iter().filter(|e| e.draw_edge) {
      let p0 = position(edge.start);
      let p1 = position(edge.end);
      let n = normal_of(edge);
      let layer = chunk.layers as f32;
      let base = chunk.attributes.len() as u32;
      for (p, sign) in [(p0, 1.0), (p0, -1.0), (p1, 1.0), (p1, -1.0)] {
        chunk.attributes.push(FuzzVertex {
          position: p.to_array(),
          normal: n.to_array(),
          sign,
          layer,
        });
      }
      chunk
        .indices
        .extend([base, base + 1, base + 2, base + 2, base + 1, base + 3]);
      chunk.layers += 1;
    }

    for edge in edges.iter().filter(|e| e.draw_bevel) {
      let next = &edges[edge.next as usize];
      let v = position(edge.end);
      let layer = chunk.layers as f32;
      let base = chunk.attributes.len() as u32;
      for n in [Vec2::ZERO, normal_of(edge), normal_of(next)] {
        chunk.attributes.push(FuzzVertex {
          position: v.to_array(),
          normal: n.to_array(),
          sign: 1.0,
          layer,
        });
      }
      chunk.indices.extend([base, base + 1, base + 2]);
      chunk.layers += 1;
    }

    if !chunk.indices.is_empty() {
      let slot = aa_fuzz_chunk_from_winding_number(winding);
      if self.chunks.len() <= slot {
        self.chunks.resize(slot + 1, None);
      }
      self.chunks[slot] = Some(chunk);
    }
  }

  /// Merge two subsets' fuzz: indices concatenate per winding, and the
  /// first child's layers shift above the second's so its edges draw on
  /// top.
  pub fn merge(a: &FuzzData, b: &FuzzData) -> FuzzData {
    let slots = a.chunks.len().max(b.chunks.len());
    let mut chunks: Vec<Option<FuzzChunk>> = vec![None; slots];
    for slot in 0..slots {
      let ca = a.chunks.get(slot).and_then(|c| c.as_ref());
      let cb = b.chunks.get(slot).and_then(|c| c.as_ref());
      chunks[slot] = match (ca, cb) {
        (Some(ca), Some(cb)) => {
          let mut merged = FuzzChunk {
            winding: ca.winding,
            attributes: Vec::with_capacity(ca.attributes.len() + cb.attributes.len()),
            indices: Vec::with_capacity(ca.indices.len() + cb.indices.len()),
            layers: ca.layers + cb.layers,
          };
          merged.attributes.extend(ca.attributes.iter().map(|v| FuzzVertex {
            layer: v.layer + cb.layers as f32,
            ..*v
          }));
          merged.attributes.extend_from_slice(&cb.attributes);
          merged.indices.extend_from_slice(&ca.indices);
          let offset = ca.attributes.len() as u32;
          merged.indices.extend(cb.indices.iter().map(|&i| i + offset));
          Some(merged)
        }
        (Some(c), None) | (None, Some(c)) => Some(c.clone()),
        (None, None) => None,
      };
    }
    FuzzData { chunks }
  }

  /// The chunk of winding `w`, when present.
  pub fn chunk_for_winding(&self, w: i32) -> Option<&FuzzChunk> {
    self
      .chunks
      .get(aa_fuzz_chunk_from_winding_number(w))
      .and_then(|c| c.as_ref())
  }

  /// The chunk at one encoded slot.
  pub fn chunk(&self, slot: usize) -> Option<&FuzzChunk> {
    self.chunks.get(slot).and_then(|c| c.as_ref())
  }

  pub fn chunk_count(&self) -> usize {
    self.chunks.len()
  }

  pub fn attribute_count(&self) -> usize {
    self
      .chunks
      .iter()
      .flatten()
      .map(|c| c.attributes.len())
      .sum()
  }

  pub fn index_count(&self) -> usize {
    self.chunks.iter().flatten().map(|c| c.indices.len()).sum()
  }
}

#[cfg(test)]
#[path = "attrib_test.rs"]
mod attrib_test;
