//! Core data types for mesh extraction.

use std::ops::{Add, Div, Mul, Sub};

use glam::Vec3;

/// Material identifier as stored in the voxel field.
pub type MaterialId = u16;

/// Integer index into the sampled lattice.
///
/// Not a geometric position: world positions come from
/// [`FieldSampler::lattice_to_world`](crate::field::FieldSampler::lattice_to_world).
/// Ordering is lexicographic (x, then y, then z).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticeAddress {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl LatticeAddress {
  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Per-component sign, used as the unit step along an axis-aligned edge.
  #[inline]
  pub fn signum(self) -> Self {
    Self::new(self.x.signum(), self.y.signum(), self.z.signum())
  }

  /// One lattice unit from `self` towards `target` along every differing axis.
  #[inline]
  pub fn step_towards(self, target: Self) -> Self {
    self + (target - self).signum()
  }

  /// Halfway address between `self` and `other` (integer division).
  #[inline]
  pub fn midpoint(self, other: Self) -> Self {
    (other - self) / 2 + self
  }
}

impl Add for LatticeAddress {
  type Output = Self;

  #[inline]
  fn add(self, rhs: Self) -> Self {
    Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl Sub for LatticeAddress {
  type Output = Self;

  #[inline]
  fn sub(self, rhs: Self) -> Self {
    Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl Mul<i32> for LatticeAddress {
  type Output = Self;

  #[inline]
  fn mul(self, rhs: i32) -> Self {
    Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

impl Div<i32> for LatticeAddress {
  type Output = Self;

  #[inline]
  fn div(self, rhs: i32) -> Self {
    Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
  }
}

impl From<[i32; 3]> for LatticeAddress {
  fn from([x, y, z]: [i32; 3]) -> Self {
    Self::new(x, y, z)
  }
}

/// One lattice sample read for the cell being extracted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampledCorner {
  pub address: LatticeAddress,
  pub world_position: Vec3,
  pub density: f32,
  pub material: MaterialId,
}

impl SampledCorner {
  /// True if the sample lies on the solid side of the isosurface.
  #[inline(always)]
  pub fn is_solid(&self, iso_level: f32) -> bool {
    self.density >= iso_level
  }
}

/// Surface crossing on a cell edge with its resolved material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedVertex {
  pub position: Vec3,
  pub material: MaterialId,
}

/// Output vertex with all mesh attributes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
  /// World-space position.
  pub position: [f32; 3],

  /// Accumulated surface normal.
  pub normal: [f32; 3],

  /// Blend channel for transition sections (RGBA); zero elsewhere.
  pub color: [u8; 4],
}

impl Default for MeshVertex {
  fn default() -> Self {
    Self {
      position: [0.0; 3],
      normal: [0.0, 0.0, 1.0],
      color: [0; 4],
    }
  }
}

/// Axis-aligned bounding box.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMaxAABB {
  pub min: [f32; 3],
  pub max: [f32; 3],
}

impl MinMaxAABB {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: [f32::INFINITY; 3],
      max: [f32::NEG_INFINITY; 3],
    }
  }

  /// Expand AABB to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: [f32; 3]) {
    for i in 0..3 {
      self.min[i] = self.min[i].min(point[i]);
      self.max[i] = self.max[i].max(point[i]);
    }
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min[0] <= self.max[0] && self.min[1] <= self.max[1] && self.min[2] <= self.max[2]
  }
}

impl Default for MinMaxAABB {
  fn default() -> Self {
    Self::empty()
  }
}

/// Vertex and index buffers of one mesh section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
  /// Welded vertices, one per distinct position in this section.
  pub vertices: Vec<MeshVertex>,

  /// Triangle indices (3 indices per triangle).
  pub indices: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: MinMaxAABB,
}

impl MeshBuffers {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a vertex and return its index.
  #[inline]
  pub fn push_vertex(&mut self, vertex: MeshVertex) -> u32 {
    let index = self.vertices.len() as u32;
    self.bounds.encapsulate(vertex.position);
    self.vertices.push(vertex);
    index
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  /// Number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.indices.len() / 3
  }

  /// Iterate triangles as vertex position triples.
  pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
    self.indices.chunks_exact(3).map(move |tri| {
      [
        self.vertices[tri[0] as usize].position,
        self.vertices[tri[1] as usize].position,
        self.vertices[tri[2] as usize].position,
      ]
    })
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
