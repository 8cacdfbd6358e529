//! Tuning constants for the fill engine.
//!
//! Everything here is compile-time; there is no runtime configuration.
//!
//! # Integer grid
//!
//! Path coordinates are remapped onto an integer grid of `2^24` cells per
//! axis before triangulation. `2^24` fits inside an f32 significand, so a
//! sub-integer fudge offset of `2^-20` is visible to the f64 sweep but
//! vanishes when positions are narrowed to f32 for rendering:
//!
//! ```text
//!  magnitude ~2^24:   f32 ULP = 2.0        f64 ULP = 2^-28
//!
//!  2^-20 sits far below one f32 ULP (invisible after narrowing)
//!  and 256 f64 ULPs above rounding noise (robust for the sweep).
//! ```

/// log2 of the integer grid dimension.
pub const LOG2_BOX_DIM: u32 = 24;

/// Integer grid dimension (2^24). Grid coordinates lie in `[1, 1 + GRID_DIM]`.
pub const GRID_DIM: i32 = 1 << LOG2_BOX_DIM;

/// Negative log2 of the fudge offset applied to triangulator input.
pub const NEGATIVE_LOG2_FUDGE: u32 = 20;

/// Additive fudge offset in grid units: representable in f64, invisible in
/// f32 at grid magnitudes.
pub const FUDGE_DELTA: f64 = 1.0 / ((1u64 << NEGATIVE_LOG2_FUDGE) as f64);

/// Minimum triangle altitude in grid units. A triangle thinner than this
/// against any of its sides is a sliver below display resolution and is
/// dropped.
pub const MIN_HEIGHT: f64 = 128.0;

/// Maximum subdivision depth of the subset tree.
pub const RECURSION_DEPTH: u32 = 12;

/// Target number of contour points per leaf subset.
pub const POINTS_PER_SUBSET: usize = 64;

/// Aspect ratio above which a box is split at the midpoint of its longer
/// axis instead of at a point median.
pub const SIZE_MAX_RATIO: f64 = 4.0;

/// Relative inflation of a subset rectangle when tested against clip
/// half-planes, so silhouette fuzz straddling the rectangle survives
/// culling.
pub const BOUNDS_INFLATE: f32 = 1.0 / 128.0;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
