//! Read interface over the external voxel field.
//!
//! The mesher never owns voxel data. It reads densities and materials through
//! [`FieldSampler`], wrapped in a [`FieldView`] that applies the optional
//! elevation clip and builds [`SampledCorner`]s.
//!
//! ```text
//! ┌──────────────┐   density / material    ┌─────────────┐   SampledCorner   ┌────────────┐
//! │ FieldSampler ├────────────────────────►│  FieldView  ├──────────────────►│ Extractors │
//! └──────────────┘   lattice_to_world      │ (elev. clip)│                   └────────────┘
//!                                          └─────────────┘
//! ```

mod dense;
pub mod shapes;

pub use dense::DenseField;

use glam::Vec3;

use crate::constants::EMPTY_DENSITY;
use crate::types::{LatticeAddress, MaterialId, SampledCorner};

/// Voxel field read by the extractors.
///
/// Coordinates passed in are within `[0, grid_size)`; out-of-range handling
/// (clamping or otherwise) is the implementor's responsibility. Values must
/// not change while an extraction is running.
pub trait FieldSampler {
  /// Stored density at a lattice point. Solid where `>= ISO_LEVEL`.
  fn density(&self, at: LatticeAddress) -> f32;

  /// Stored material at a lattice point.
  fn material(&self, at: LatticeAddress) -> MaterialId;

  /// Position of a lattice point relative to [`grid_origin`](Self::grid_origin).
  fn lattice_to_world(&self, at: LatticeAddress) -> Vec3;

  /// World-space origin of the grid.
  fn grid_origin(&self) -> Vec3;

  /// Samples per axis.
  fn grid_size(&self) -> i32;

  /// Precomputed list of active cells for a LOD, addressed as
  /// `x * n² + y * n + z`. `None` selects a full grid scan.
  fn cached_cells(&self, _lod: usize) -> Option<&[usize]> {
    None
  }
}

/// Blanket impl for boxed samplers.
impl<T: FieldSampler + ?Sized> FieldSampler for Box<T> {
  fn density(&self, at: LatticeAddress) -> f32 {
    (**self).density(at)
  }

  fn material(&self, at: LatticeAddress) -> MaterialId {
    (**self).material(at)
  }

  fn lattice_to_world(&self, at: LatticeAddress) -> Vec3 {
    (**self).lattice_to_world(at)
  }

  fn grid_origin(&self) -> Vec3 {
    (**self).grid_origin()
  }

  fn grid_size(&self) -> i32 {
    (**self).grid_size()
  }

  fn cached_cells(&self, lod: usize) -> Option<&[usize]> {
    (**self).cached_cells(lod)
  }
}

/// Clip-aware read access used by the extractors.
pub struct FieldView<'a, F: ?Sized> {
  field: &'a F,
  elevation_clip: Option<f32>,
}

impl<'a, F: FieldSampler + ?Sized> FieldView<'a, F> {
  pub fn new(field: &'a F, elevation_clip: Option<f32>) -> Self {
    Self {
      field,
      elevation_clip,
    }
  }

  #[inline]
  pub fn grid_size(&self) -> i32 {
    self.field.grid_size()
  }

  /// Density with the elevation clip applied.
  #[inline]
  pub fn density(&self, at: LatticeAddress) -> f32 {
    if let Some(level) = self.elevation_clip {
      let world = self.field.lattice_to_world(at) + self.field.grid_origin();
      if world.z > level {
        return EMPTY_DENSITY;
      }
    }

    self.field.density(at)
  }

  #[inline]
  pub fn material(&self, at: LatticeAddress) -> MaterialId {
    self.field.material(at)
  }

  /// Read one lattice sample.
  #[inline]
  pub fn corner(&self, at: LatticeAddress) -> SampledCorner {
    SampledCorner {
      address: at,
      world_position: self.field.lattice_to_world(at),
      density: self.density(at),
      material: self.field.material(at),
    }
  }
}
