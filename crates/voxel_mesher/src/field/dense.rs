//! In-memory reference sampler.

use glam::Vec3;

use super::shapes::DensityShape;
use super::FieldSampler;
use crate::constants::{cell_index, EMPTY_DENSITY, MAX_LOD_COUNT};
use crate::types::{LatticeAddress, MaterialId};

/// Dense `n³` lattice of densities and materials.
///
/// Memory layout matches the cached cell index: X-slowest, Z-fastest,
/// `index = x * n² + y * n + z`. Reads outside the grid are clamped to the
/// nearest edge sample.
#[derive(Clone, Debug)]
pub struct DenseField {
  size: i32,
  voxel_size: f32,
  origin: Vec3,
  densities: Vec<f32>,
  materials: Vec<MaterialId>,
  cell_cache: Vec<Option<Vec<usize>>>,
}

impl DenseField {
  /// Empty (all air) field with `size` samples per axis.
  pub fn new(size: i32, voxel_size: f32) -> Self {
    let count = (size.max(0) as usize).pow(3);
    Self {
      size,
      voxel_size,
      origin: Vec3::ZERO,
      densities: vec![EMPTY_DENSITY; count],
      materials: vec![0; count],
      cell_cache: vec![None; MAX_LOD_COUNT],
    }
  }

  /// Sample every lattice point of a shape.
  pub fn from_shape(size: i32, voxel_size: f32, shape: &impl DensityShape) -> Self {
    let mut field = Self::new(size, voxel_size);
    field.fill(shape);
    field
  }

  pub fn with_origin(mut self, origin: Vec3) -> Self {
    self.origin = origin;
    self
  }

  /// Overwrite every sample from a shape evaluated at world positions.
  pub fn fill(&mut self, shape: &impl DensityShape) {
    for x in 0..self.size {
      for y in 0..self.size {
        for z in 0..self.size {
          let at = LatticeAddress::new(x, y, z);
          let world = self.lattice_to_world(at) + self.origin;
          if let Some(idx) = self.index(at) {
            self.densities[idx] = shape.density(world);
            self.materials[idx] = shape.material(world);
          }
        }
      }
    }
  }

  /// Set a single sample.
  pub fn set(&mut self, at: LatticeAddress, density: f32, material: MaterialId) {
    if let Some(idx) = self.index(at) {
      self.densities[idx] = density;
      self.materials[idx] = material;
    }
  }

  pub fn set_density(&mut self, at: LatticeAddress, density: f32) {
    if let Some(idx) = self.index(at) {
      self.densities[idx] = density;
    }
  }

  pub fn set_material(&mut self, at: LatticeAddress, material: MaterialId) {
    if let Some(idx) = self.index(at) {
      self.materials[idx] = material;
    }
  }

  /// Install the active-cell list for one LOD (switches it to cached mode).
  pub fn set_cached_cells(&mut self, lod: usize, cells: Vec<usize>) {
    if let Some(slot) = self.cell_cache.get_mut(lod) {
      *slot = Some(cells);
    }
  }

  /// Drop every cached cell list (back to full-scan mode).
  pub fn clear_cached_cells(&mut self) {
    self.cell_cache.iter_mut().for_each(|slot| *slot = None);
  }

  /// Index of a cell's minimum corner in the cached list layout.
  #[inline]
  pub fn cell_index(&self, at: LatticeAddress) -> usize {
    cell_index(at.x, at.y, at.z, self.size)
  }

  /// Storage slot of the sample nearest to `at`; `None` for an empty grid.
  #[inline]
  fn index(&self, at: LatticeAddress) -> Option<usize> {
    if self.size <= 0 {
      return None;
    }
    let max = self.size - 1;
    Some(cell_index(
      at.x.clamp(0, max),
      at.y.clamp(0, max),
      at.z.clamp(0, max),
      self.size,
    ))
  }
}

impl FieldSampler for DenseField {
  #[inline]
  fn density(&self, at: LatticeAddress) -> f32 {
    self.index(at).map_or(EMPTY_DENSITY, |idx| self.densities[idx])
  }

  #[inline]
  fn material(&self, at: LatticeAddress) -> MaterialId {
    self.index(at).map_or(0, |idx| self.materials[idx])
  }

  #[inline]
  fn lattice_to_world(&self, at: LatticeAddress) -> Vec3 {
    Vec3::new(at.x as f32, at.y as f32, at.z as f32) * self.voxel_size
  }

  fn grid_origin(&self) -> Vec3 {
    self.origin
  }

  fn grid_size(&self) -> i32 {
    self.size
  }

  fn cached_cells(&self, lod: usize) -> Option<&[usize]> {
    self.cell_cache.get(lod)?.as_deref()
  }
}
