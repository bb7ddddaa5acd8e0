//! Errors reported before extraction starts.

use thiserror::Error;

/// Invalid extraction request.
///
/// Degenerate geometry never produces an error; only request/field
/// combinations that cannot be meshed are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
  #[error("LOD count {requested} is outside 1..={max}")]
  LodCountOutOfRange { requested: usize, max: usize },

  #[error("collision LOD {collision_lod} is not below the LOD count {lod_count}")]
  CollisionLodOutOfRange { collision_lod: usize, lod_count: usize },

  #[error("grid size {grid_size} cannot hold a single cell")]
  GridTooSmall { grid_size: i32 },
}
