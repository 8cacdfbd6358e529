//! Shared helpers for unit tests.

use glam::DVec2;

use crate::attrib::FillData;

/// Signed area covered by one index chunk, from the packed f32 attributes.
/// Triangles are emitted counter-clockwise, so real coverage is positive.
pub fn chunk_area(fill: &FillData, chunk: usize) -> f64 {
  let attrs = fill.attributes();
  fill
    .chunk(chunk)
    .chunks_exact(3)
    .map(|t| {
      let a = attrs[t[0] as usize].position;
      let b = attrs[t[1] as usize].position;
      let c = attrs[t[2] as usize].position;
      let u = (b[0] as f64 - a[0] as f64, b[1] as f64 - a[1] as f64);
      let v = (c[0] as f64 - a[0] as f64, c[1] as f64 - a[1] as f64);
      0.5 * (u.0 * v.1 - u.1 * v.0)
    })
    .sum()
}

/// Area selected by a fill rule.
pub fn rule_area(fill: &FillData, rule: crate::types::FillRule) -> f64 {
  chunk_area(fill, crate::attrib::fill_chunk_from_fill_rule(rule))
}

/// A counter-clockwise regular polygon approximating a circle.
pub fn circle(center: DVec2, radius: f64, points: usize) -> Vec<DVec2> {
  (0..points)
    .map(|i| {
      let angle = std::f64::consts::TAU * i as f64 / points as f64;
      center + radius * DVec2::new(angle.cos(), angle.sin())
    })
    .collect()
}
