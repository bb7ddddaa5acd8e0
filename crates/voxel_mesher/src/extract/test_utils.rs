//! Test utilities for extraction tests.
//!
//! Provides small hand-built fields and shape-filled fixtures.

use std::collections::HashMap;

use glam::Vec3;

use crate::assembler::PositionKey;
use crate::constants::{cell_index, CORNER_OFFSETS};
use crate::field::shapes::{SphereShape, Strata, TiltedPlaneShape};
use crate::field::DenseField;
use crate::types::{LatticeAddress, MaterialId, MeshBuffers};

// =============================================================================
// Fields
// =============================================================================

/// Single-cell field (2³ samples) with the given corner values.
pub fn single_cell(densities: [f32; 8], materials: [MaterialId; 8]) -> DenseField {
  let mut field = DenseField::new(2, 1.0);
  for (corner, offset) in CORNER_OFFSETS.iter().enumerate() {
    field.set(LatticeAddress::from(*offset), densities[corner], materials[corner]);
  }
  field
}

/// Sphere centered in an `n³` grid.
pub fn sphere_field(size: i32, radius: f32, material: MaterialId) -> DenseField {
  let center = Vec3::splat((size - 1) as f32 * 0.5);
  DenseField::from_shape(size, 1.0, &SphereShape::new(center, radius).with_material(material))
}

/// Tilted ground plane crossing the X and Y grid faces, layered in three
/// materials.
pub fn layered_terrain(size: i32) -> DenseField {
  let height = (size - 1) as f32 * 0.45;
  let shape = Strata::new(TiltedPlaneShape::new(height).with_angle_degrees(25.0))
    .with_band(height - 2.0, 1)
    .with_band(height + 1.0, 2)
    .with_band(f32::MAX, 3);
  DenseField::from_shape(size, 1.0, &shape)
}

/// Cell list in full-scan order for one LOD.
pub fn full_scan_cells(size: i32, step: i32) -> Vec<usize> {
  let mut cells = Vec::new();
  let limit = size - step;
  for x in (0..limit).step_by(step as usize) {
    for y in (0..limit).step_by(step as usize) {
      for z in (0..limit).step_by(step as usize) {
        cells.push(cell_index(x, y, z, size));
      }
    }
  }
  cells
}

// =============================================================================
// Mesh inspection
// =============================================================================

/// Exact position → vertex normal of a mesh.
pub fn normals_by_position(mesh: &MeshBuffers) -> HashMap<PositionKey, [f32; 3]> {
  mesh
    .vertices
    .iter()
    .map(|v| (PositionKey::new(Vec3::from_array(v.position)), v.normal))
    .collect()
}

/// Geometric normal of every triangle.
pub fn triangle_normals(mesh: &MeshBuffers) -> Vec<Vec3> {
  mesh
    .triangles()
    .map(|[a, b, c]| {
      let (a, b, c) = (Vec3::from_array(a), Vec3::from_array(b), Vec3::from_array(c));
      (b - a).cross(c - a).normalize_or_zero()
    })
    .collect()
}
