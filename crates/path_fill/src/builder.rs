//! One sub-path realization: discretize, triangulate, pack.

use std::collections::HashMap;

use crate::attrib::{FillData, FillVertex, FuzzData};
use crate::hoard::PointHoard;
use crate::subpath::SubPath;
use crate::tess::SweepTriangulator;
use crate::tesser::{Tesser, WindingComponent};

/// Realized geometry of one subset.
#[derive(Clone, Debug, Default)]
pub struct SubsetData {
  pub fill: FillData,
  pub fuzz: FuzzData,
  /// Winding numbers present in the triangulation, ascending.
  pub windings: Vec<i32>,
}

impl SubsetData {
  pub fn attribute_count(&self) -> usize {
    self.fill.attribute_count() + self.fuzz.attribute_count()
  }

  pub fn index_count(&self) -> usize {
    self.fill.index_count() + self.fuzz.index_count()
  }

  /// Merge two children's realized geometry without re-triangulating.
  pub fn merge(a: &SubsetData, b: &SubsetData) -> SubsetData {
    let mut windings: Vec<i32> = a.windings.clone();
    for &w in &b.windings {
      if !windings.contains(&w) {
        windings.push(w);
      }
    }
    windings.sort_unstable();
    SubsetData {
      fill: FillData::merge(&a.fill, &b.fill),
      fuzz: FuzzData::merge(&a.fuzz, &b.fuzz),
      windings,
    }
  }
}

/// Triangulate one sub-path and pack its attribute data.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "builder::realize"))]
pub fn realize(subpath: &SubPath) -> SubsetData {
  let mut hoard = PointHoard::new(subpath.bounds());
  let path = hoard.generate(subpath);

  let mut tess = SweepTriangulator::new();
  let mut output = Tesser::run(&mut hoard, &path, &mut tess);

  #[cfg(feature = "tracing")]
  if output.failed {
    tracing::debug!("triangulation failed; subset degrades toward its rectangle");
  }

  output.components.retain(|_, c| !c.triangles.is_empty());
  if output.components.is_empty() {
    // Keep the complement rules drawable: the whole rectangle, carrying
    // the winding the reduced contours folded away.
    let ll = hoard.fetch_corner(false, false);
    let lr = hoard.fetch_corner(true, false);
    let ur = hoard.fetch_corner(true, true);
    let ul = hoard.fetch_corner(false, true);
    output.components.insert(
      path.winding_offset,
      WindingComponent {
        triangles: vec![ll, lr, ur, ll, ur, ul],
        edges: Vec::new(),
      },
    );
  }

  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("pack").entered();

  // Compact the hoard down to the vertices the triangles reference.
  let mut remap: HashMap<u32, u32> = HashMap::new();
  let mut attributes: Vec<FillVertex> = Vec::new();
  let mut per_winding: Vec<(i32, Vec<u32>)> = Vec::new();
  for (&winding, component) in &output.components {
    let tris = component
      .triangles
      .iter()
      .map(|&id| {
        *remap.entry(id).or_insert_with(|| {
          let packed = attributes.len() as u32;
          attributes.push(FillVertex {
            position: hoard.snapped(id).as_vec2().to_array(),
          });
          packed
        })
      })
      .collect();
    per_winding.push((winding, tris));
  }
  let fill = FillData::pack(attributes, per_winding);

  let mut fuzz = FuzzData::default();
  for (&winding, component) in &output.components {
    fuzz.push_component(winding, &component.edges, |id| {
      hoard.snapped(id).as_vec2()
    });
  }

  let windings = output.components.keys().copied().collect();
  SubsetData {
    fill,
    fuzz,
    windings,
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
