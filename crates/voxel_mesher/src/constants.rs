//! Numeric policy and lattice layout constants.
//!
//! # Cell Layout
//!
//! A regular cell at LOD `l` spans `step = 2^l` lattice units per axis. Its
//! eight corners follow the Transvoxel corner numbering:
//!
//! ```text
//!         +Y
//!          │
//!          │
//!          │
//!          └───────── +X
//!         /
//!        /
//!       +Z
//!
//! Cell corner indices (binary: ZYX):
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```
//!
//! # Dirty Cell Indexing
//!
//! Cached cell lists address a cell by its minimum corner:
//!
//! ```text
//! index = x * n² + y * n + z        (n = grid size)
//! ```

/// Density value treated as the solid/air boundary.
pub const ISO_LEVEL: f32 = 0.5;

/// Tolerance used by the interpolation snapping rules.
pub const INTERPOLATION_EPSILON: f32 = 0.00001;

/// Density reported for samples above the elevation clip.
pub const EMPTY_DENSITY: f32 = 0.0;

/// Maximum number of LOD bundles a single extraction can produce.
pub const MAX_LOD_COUNT: usize = 7;

/// Coarsest LOD that still resolves materials with the nearest-corner rule.
pub const NEAREST_MATERIAL_MAX_LOD: usize = 0;

/// Coarsest LOD that resolves materials by sampling the lattice midpoint.
pub const MIDPOINT_MATERIAL_MAX_LOD: usize = 4;

/// Lattice step size of a cell at the given LOD (`2^lod`).
#[inline(always)]
pub const fn lod_step(lod: usize) -> i32 {
  1 << lod
}

/// Convert a cell's minimum corner to its cached-list index.
#[inline(always)]
pub const fn cell_index(x: i32, y: i32, z: i32, grid_size: i32) -> usize {
  (x as usize * grid_size as usize + y as usize) * grid_size as usize + z as usize
}

/// Convert a cached-list index back to the cell's minimum corner.
#[inline(always)]
pub const fn index_to_cell(index: usize, grid_size: i32) -> (i32, i32, i32) {
  let n = grid_size as usize;
  let x = index / (n * n);
  let y = (index / n) % n;
  let z = index % n;
  (x as i32, y as i32, z as i32)
}

/// Unit lattice offsets of the eight cell corners.
///
/// Corner layout (binary: ZYX):
/// - 0 = (0,0,0)
/// - 1 = (1,0,0)
/// - 2 = (0,1,0)
/// - 3 = (1,1,0)
/// - 4 = (0,0,1)
/// - 5 = (1,0,1)
/// - 6 = (0,1,1)
/// - 7 = (1,1,1)
pub const CORNER_OFFSETS: [[i32; 3]; 8] = [
  [0, 0, 0],
  [1, 0, 0],
  [0, 1, 0],
  [1, 1, 0],
  [0, 0, 1],
  [1, 0, 1],
  [0, 1, 1],
  [1, 1, 1],
];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
