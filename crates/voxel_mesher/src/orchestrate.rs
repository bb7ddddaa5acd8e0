//! Extraction entry points: cell enumeration and LOD bundles.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ extract / extract_parallel                                       │
//! │                                                                  │
//! │  validate(config, grid)                                          │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  for lod in 0..effective_lod_count  (rayon in extract_parallel)  │
//! │  ┌───────────────────────────────────────────────────────────┐   │
//! │  │ cached_cells(lod)?                                        │   │
//! │  │   Some(list) → visit listed cells (index = x·n² + y·n + z)│   │
//! │  │   None       → visit every cell on the 2^lod lattice      │   │
//! │  │ LodExtractor::generate_cell → finish → LodMeshBundle      │   │
//! │  └───────────────────────────────────────────────────────────┘   │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  OutputMesh { lods, collision_lod }                              │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use rayon::prelude::*;

use crate::config::ExtractionConfig;
use crate::constants::index_to_cell;
use crate::error::ExtractionError;
use crate::extract::LodExtractor;
use crate::field::FieldSampler;
use crate::output::{LodMeshBundle, OutputMesh};
use crate::types::LatticeAddress;

fn validate<F: FieldSampler + ?Sized>(
  field: &F,
  config: &ExtractionConfig,
) -> Result<(), ExtractionError> {
  config.validate()?;

  let grid_size = field.grid_size();
  if grid_size < 2 {
    return Err(ExtractionError::GridTooSmall { grid_size });
  }

  Ok(())
}

/// Extract every requested LOD on the calling thread.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesher::extract"))]
pub fn extract<F: FieldSampler + ?Sized>(
  field: &F,
  config: &ExtractionConfig,
) -> Result<OutputMesh, ExtractionError> {
  validate(field, config)?;

  let lods = (0..config.effective_lod_count())
    .map(|lod| build_bundle(field, config, lod))
    .collect();

  Ok(OutputMesh {
    lods,
    collision_lod: config.collision_lod,
  })
}

/// Extract every requested LOD, one rayon task per bundle.
///
/// Output is identical to [`extract`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "mesher::extract_parallel"))]
pub fn extract_parallel<F: FieldSampler + Sync + ?Sized>(
  field: &F,
  config: &ExtractionConfig,
) -> Result<OutputMesh, ExtractionError> {
  validate(field, config)?;

  let lods = (0..config.effective_lod_count())
    .into_par_iter()
    .map(|lod| build_bundle(field, config, lod))
    .collect();

  Ok(OutputMesh {
    lods,
    collision_lod: config.collision_lod,
  })
}

/// Build the bundle of a single LOD.
pub fn build_bundle<F: FieldSampler + ?Sized>(
  field: &F,
  config: &ExtractionConfig,
  lod: usize,
) -> LodMeshBundle {
  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("lod_bundle", lod).entered();

  let mut extractor = LodExtractor::new(field, config, lod);

  match field.cached_cells(lod) {
    Some(cells) => visit_cached(&mut extractor, field.grid_size(), cells),
    None => visit_all(&mut extractor, field.grid_size()),
  }

  let bundle = extractor.finish();

  #[cfg(feature = "tracing")]
  tracing::debug!(
    lod,
    cells_visited = bundle.stats.cells_visited,
    cells_emitting = bundle.stats.cells_emitting,
    transition_cells = bundle.stats.transition_cells_emitting,
    triangles = bundle.stats.triangle_count,
    timing_us = bundle.stats.timing_us,
    "bundle extracted"
  );

  bundle
}

fn visit_cached<F: FieldSampler + ?Sized>(
  extractor: &mut LodExtractor<'_, F>,
  grid_size: i32,
  cells: &[usize],
) {
  let sample_count = (grid_size as usize).pow(3);

  for &index in cells {
    let (x, y, z) = index_to_cell(index, grid_size);
    let origin = LatticeAddress::new(x, y, z);
    if index >= sample_count || !extractor.cell_fits(origin) {
      #[cfg(feature = "tracing")]
      tracing::warn!(index, grid_size, lod = extractor.lod(), "cached cell outside the grid, skipped");
      continue;
    }

    extractor.generate_cell(origin);
  }
}

fn visit_all<F: FieldSampler + ?Sized>(extractor: &mut LodExtractor<'_, F>, grid_size: i32) {
  let step = extractor.step() as usize;
  let limit = grid_size - extractor.step();

  for x in (0..limit).step_by(step) {
    for y in (0..limit).step_by(step) {
      for z in (0..limit).step_by(step) {
        extractor.generate_cell(LatticeAddress::new(x, y, z));
      }
    }
  }
}

#[cfg(test)]
#[path = "orchestrate_test.rs"]
mod orchestrate_test;
