//! Tests for chunk encodings, fill packing, and fuzz packing.

use glam::Vec2;

use super::*;
use crate::tesser::FuzzEdge;

// =============================================================================
// Batch 1: Chunk encodings
// =============================================================================

#[test]
fn test_fill_chunk_winding_encoding() {
  assert_eq!(fill_chunk_from_winding_number(0), FillRule::ComplementNonzero as usize);
  assert_eq!(fill_chunk_from_winding_number(1), 4);
  assert_eq!(fill_chunk_from_winding_number(-1), 5);
  assert_eq!(fill_chunk_from_winding_number(2), 6);
  assert_eq!(fill_chunk_from_winding_number(-2), 7);
  assert_eq!(fill_chunk_from_winding_number(3), 8);
}

#[test]
fn test_fuzz_chunk_winding_interleaving() {
  assert_eq!(aa_fuzz_chunk_from_winding_number(0), 0);
  assert_eq!(aa_fuzz_chunk_from_winding_number(-1), 1);
  assert_eq!(aa_fuzz_chunk_from_winding_number(1), 2);
  assert_eq!(aa_fuzz_chunk_from_winding_number(-2), 3);
  assert_eq!(aa_fuzz_chunk_from_winding_number(2), 4);
}

// =============================================================================
// Batch 2: Fill packing
// =============================================================================

fn vertex(x: f32, y: f32) -> FillVertex {
  FillVertex { position: [x, y] }
}

fn sample_fill() -> FillData {
  let attributes = (0..12).map(|i| vertex(i as f32, 0.0)).collect();
  FillData::pack(
    attributes,
    vec![
      (0, vec![0, 1, 2]),
      (2, vec![3, 4, 5]),
      (1, vec![6, 7, 8]),
      (-1, vec![9, 10, 11]),
    ],
  )
}

#[test]
fn test_fill_rules_are_contiguous_ranges() {
  let fill = sample_fill();
  // odd windings first, then even nonzero, then zero
  assert_eq!(fill.rule(FillRule::OddEven).len(), 6);
  assert_eq!(fill.rule(FillRule::Nonzero).len(), 9);
  assert_eq!(fill.rule(FillRule::ComplementOddEven).len(), 6);
  assert_eq!(fill.rule(FillRule::ComplementNonzero).len(), 3);
  assert_eq!(fill.index_count(), 12);

  // the three class groups tile the buffer in order
  let indices = fill.indices();
  assert_eq!(&indices[0..6], fill.rule(FillRule::OddEven));
  assert_eq!(&indices[6..12], fill.rule(FillRule::ComplementOddEven));
  assert_eq!(&indices[9..12], fill.rule(FillRule::ComplementNonzero));
}

#[test]
fn test_fill_winding_chunks_locate_their_triangles() {
  let fill = sample_fill();
  assert_eq!(fill.chunk(fill_chunk_from_winding_number(1)), &[6, 7, 8]);
  assert_eq!(fill.chunk(fill_chunk_from_winding_number(-1)), &[9, 10, 11]);
  assert_eq!(fill.chunk(fill_chunk_from_winding_number(2)), &[3, 4, 5]);
  assert_eq!(fill.chunk(fill_chunk_from_winding_number(0)), &[0, 1, 2]);
  assert!(fill.chunk(fill_chunk_from_winding_number(5)).is_empty());
}

#[test]
fn test_fill_winding_numbers_sorted() {
  let fill = sample_fill();
  let ws: Vec<i32> = fill.winding_numbers().collect();
  assert_eq!(ws, vec![-1, 0, 1, 2]);
}

#[test]
fn test_fill_merge_offsets_second_child() {
  let a = FillData::pack(vec![vertex(0.0, 0.0); 3], vec![(1, vec![0, 1, 2])]);
  let b = FillData::pack(vec![vertex(1.0, 0.0); 3], vec![(1, vec![0, 1, 2]), (0, vec![0, 1, 2])]);
  let merged = FillData::merge(&a, &b);
  assert_eq!(merged.attribute_count(), 6);
  assert_eq!(merged.chunk(fill_chunk_from_winding_number(1)), &[0, 1, 2, 3, 4, 5]);
  assert_eq!(merged.chunk(fill_chunk_from_winding_number(0)), &[3, 4, 5]);
  let ws: Vec<i32> = merged.winding_numbers().collect();
  assert_eq!(ws, vec![0, 1]);
}

#[test]
fn test_fill_merge_preserves_rule_contiguity() {
  let a = FillData::pack(vec![vertex(0.0, 0.0); 3], vec![(2, vec![0, 1, 2])]);
  let b = FillData::pack(vec![vertex(1.0, 0.0); 3], vec![(1, vec![0, 1, 2])]);
  let merged = FillData::merge(&a, &b);
  let indices = merged.indices();
  assert_eq!(merged.rule(FillRule::OddEven), &indices[0..3]);
  assert_eq!(merged.rule(FillRule::Nonzero), &indices[0..6]);
  assert_eq!(merged.rule(FillRule::ComplementOddEven), &indices[3..6]);
  assert!(merged.rule(FillRule::ComplementNonzero).is_empty());
}

// =============================================================================
// Batch 3: Fuzz packing
// =============================================================================

fn edge(start: u32, end: u32, next: u32, draw_edge: bool, draw_bevel: bool) -> FuzzEdge {
  FuzzEdge {
    start,
    end,
    next,
    draw_edge,
    draw_bevel,
  }
}

fn positions(id: u32) -> Vec2 {
  match id {
    0 => Vec2::new(0.0, 0.0),
    1 => Vec2::new(1.0, 0.0),
    2 => Vec2::new(1.0, 1.0),
    _ => Vec2::new(0.0, 1.0),
  }
}

#[test]
fn test_fuzz_quad_per_drawn_edge_and_triangle_per_bevel() {
  let edges = [
    edge(0, 1, 1, true, true),
    edge(1, 2, 2, true, true),
    edge(2, 3, 3, false, true),
    edge(3, 0, 0, false, true),
  ];
  let mut fuzz = FuzzData::default();
  fuzz.push_component(1, &edges, positions);
  let chunk = fuzz.chunk_for_winding(1).expect("chunk for winding 1");
  // 2 quads + 4 bevels
  assert_eq!(chunk.attributes.len(), 2 * 4 + 4 * 3);
  assert_eq!(chunk.indices.len(), 2 * 6 + 4 * 3);
  assert_eq!(chunk.layers, 6);
}

#[test]
fn test_fuzz_quad_normal_is_left_of_tangent() {
  let edges = [edge(0, 1, 0, true, false)];
  let mut fuzz = FuzzData::default();
  fuzz.push_component(1, &edges, positions);
  let chunk = fuzz.chunk_for_winding(1).expect("chunk");
  // tangent +x, normal +y
  assert_eq!(chunk.attributes[0].normal, [0.0, 1.0]);
  let signs: Vec<f32> = chunk.attributes.iter().map(|v| v.sign).collect();
  assert_eq!(signs, vec![1.0, -1.0, 1.0, -1.0]);
}

#[test]
fn test_fuzz_skips_undrawn_components() {
  let edges = [edge(0, 1, 1, false, false), edge(1, 0, 0, false, false)];
  let mut fuzz = FuzzData::default();
  fuzz.push_component(1, &edges, positions);
  assert!(fuzz.chunk_for_winding(1).is_none());
  assert_eq!(fuzz.attribute_count(), 0);
}

#[test]
fn test_fuzz_merge_stacks_first_child_layers_on_top() {
  let edges = [edge(0, 1, 0, true, false)];
  let mut a = FuzzData::default();
  a.push_component(1, &edges, positions);
  let mut b = FuzzData::default();
  b.push_component(1, &edges, positions);
  b.push_component(0, &edges, positions);

  let merged = FuzzData::merge(&a, &b);
  let chunk = merged.chunk_for_winding(1).expect("chunk");
  assert_eq!(chunk.layers, 2);
  // child A's quad sits above child B's single layer
  assert_eq!(chunk.attributes[0].layer, 1.0);
  assert_eq!(chunk.attributes[4].layer, 0.0);
  // child B's indices were rebased past A's attributes
  assert_eq!(chunk.indices[..6], [0, 1, 2, 2, 1, 3]);
  assert_eq!(chunk.indices[6..], [4, 5, 6, 6, 5, 7]);
  // the winding-0 chunk came over untouched
  assert!(merged.chunk_for_winding(0).is_some());
}
