//! Extraction request parameters.

use crate::constants::{lod_step, MAX_LOD_COUNT};
use crate::error::ExtractionError;

/// Configuration for one extraction call.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionConfig {
  /// Build one bundle per LOD and stitch LOD faces with transition cells.
  /// When false only LOD 0 is produced.
  pub generate_lod: bool,

  /// Number of LOD bundles built when `generate_lod` is set.
  pub lod_count: usize,

  /// LOD whose unified mesh is exposed for collision.
  pub collision_lod: usize,

  /// World-space Z above which density is forced to empty.
  pub elevation_clip: Option<f32>,
}

impl Default for ExtractionConfig {
  fn default() -> Self {
    Self {
      generate_lod: false,
      lod_count: MAX_LOD_COUNT,
      collision_lod: 0,
      elevation_clip: None,
    }
  }
}

impl ExtractionConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_lod(mut self, lod_count: usize) -> Self {
    self.generate_lod = true;
    self.lod_count = lod_count;
    self
  }

  pub fn without_lod(mut self) -> Self {
    self.generate_lod = false;
    self
  }

  pub fn with_collision_lod(mut self, lod: usize) -> Self {
    self.collision_lod = lod;
    self
  }

  pub fn with_elevation_clip(mut self, level: f32) -> Self {
    self.elevation_clip = Some(level);
    self
  }

  /// Number of bundles the request produces.
  #[inline]
  pub fn effective_lod_count(&self) -> usize {
    if self.generate_lod {
      self.lod_count
    } else {
      1
    }
  }

  /// Lattice step size at the given LOD.
  #[inline]
  pub fn step(&self, lod: usize) -> i32 {
    lod_step(lod)
  }

  /// Reject inconsistent requests before any cell is visited.
  pub fn validate(&self) -> Result<(), ExtractionError> {
    if self.generate_lod && !(1..=MAX_LOD_COUNT).contains(&self.lod_count) {
      return Err(ExtractionError::LodCountOutOfRange {
        requested: self.lod_count,
        max: MAX_LOD_COUNT,
      });
    }

    let lod_count = self.effective_lod_count();
    if self.collision_lod >= lod_count {
      return Err(ExtractionError::CollisionLodOutOfRange {
        collision_lod: self.collision_lod,
        lod_count,
      });
    }

    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
