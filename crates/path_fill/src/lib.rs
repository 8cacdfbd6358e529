//! path_fill - Framework/engine independent filled-path geometry
//!
//! This crate turns a tessellated planar path (closed polygonal contours
//! with integer winding contributions) into a spatial hierarchy of
//! triangulated sub-regions ready for GPU rasterization under any fill
//! rule, plus anti-alias fuzz geometry along the silhouette edges of each
//! winding component.
//!
//! # Features
//!
//! - **Robust triangulation under overlapping edges**: input is snapped
//!   onto a `2^24` integer grid, then nudged by a sub-f32-precision fudge
//!   so the f64 sweep never sees coincident points
//! - **Recursive half-plane partitioning**: a binary subset tree with a
//!   bounded vertex count per leaf, triangulated lazily and merged upward
//! - **Winding bookkeeping across splits**: contours that wrap a
//!   sub-region's boundary fold into a scalar winding offset
//! - **Silhouette fuzz extraction**: monotone-boundary edges between
//!   different winding regions become anti-alias quads and bevels
//!
//! # Example
//!
//! ```ignore
//! use glam::DVec2;
//! use path_fill::{FilledPath, FillRule, TessellatedPath};
//!
//! let square = TessellatedPath::new(vec![vec![
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(1.0, 0.0),
//!     DVec2::new(1.0, 1.0),
//!     DVec2::new(0.0, 1.0),
//! ]]);
//! let mut filled = FilledPath::new(&square);
//! let subset = filled.subset(0);
//! let triangles = subset.fill_data().rule(FillRule::Nonzero);
//! ```

pub mod constants;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used items
pub use types::{Aabb2, DAabb2, FillRule, TessellatedPath, FILL_RULE_COUNT};

// Grid remap and contour primitives
pub mod contour;
pub mod coords;
pub use contour::{BoundaryFlags, ContourPoint};
pub use coords::CoordinateConverter;

// Sub-path splitting and the discretizing point table
pub mod hoard;
pub mod subpath;
pub use hoard::PointHoard;
pub use subpath::{Axis, SubPath};

// Triangulator contract and the built-in sweep implementation
pub mod tess;
pub use tess::{ClientId, FillListener, SweepTriangulator, Triangulator, NULL_CLIENT_ID};

// Driving the triangulator and packing its output
pub mod attrib;
pub mod builder;
pub mod tesser;
pub use attrib::{
  aa_fuzz_chunk_from_winding_number, fill_chunk_from_fill_rule, fill_chunk_from_winding_number,
  FillData, FillVertex, FuzzChunk, FuzzData, FuzzVertex,
};
pub use builder::SubsetData;

// Subset tree and the caller-facing path
pub mod filled_path;
pub mod subset;
pub use filled_path::{FilledPath, Subset};
pub use subset::SubsetNode;
