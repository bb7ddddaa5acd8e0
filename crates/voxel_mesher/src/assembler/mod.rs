//! Vertex welding and routing of triangles into mesh sections.
//!
//! Every triangle vertex is looked up by the exact bit pattern of its position.
//! One [`VertexRecord`] per position tracks the accumulated normal and the
//! buffer index the position occupies in each section it was written to:
//!
//! ```text
//!                    ┌──────────────────────────────┐
//!   add_unified ────►│                              ├──► unified buffers
//!   add_material ───►│  PositionKey → VertexRecord  ├──► materials[id]
//!   add_transition ─►│                              ├──► transitions[id]
//!                    └──────────────────────────────┘
//! ```
//!
//! Each insertion averages the record normal with the triangle normal
//! (`(old + n) / 2`, not renormalized). Buffers receive the record's final
//! normal in [`MeshAssembler::finish`], so every section sharing a position
//! stores the same normal.

mod material_set;

pub use material_set::{MaterialSet, TransitionId, TransitionRegistry, LABEL_SEPARATOR};

use std::collections::HashMap;

use glam::Vec3;
use smallvec::SmallVec;

use crate::output::{MaterialSection, MaterialSections, TransitionSection, TransitionSections};
use crate::types::{MaterialId, MeshBuffers, MeshVertex, ResolvedVertex};

/// Exact-equality key of a vertex position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey([u32; 3]);

impl PositionKey {
  #[inline]
  pub fn new(position: Vec3) -> Self {
    Self(position.to_array().map(f32::to_bits))
  }
}

/// Welding state of one distinct position.
#[derive(Clone, Debug)]
pub struct VertexRecord {
  pub normal: Vec3,
  pub unified_index: Option<u32>,
  pub material_indices: SmallVec<[(MaterialId, u32); 2]>,
  pub transition_indices: SmallVec<[(TransitionId, u32); 2]>,
}

impl VertexRecord {
  fn new(normal: Vec3) -> Self {
    Self {
      normal,
      unified_index: None,
      material_indices: SmallVec::new(),
      transition_indices: SmallVec::new(),
    }
  }

  #[inline]
  fn accumulate(&mut self, normal: Vec3) {
    self.normal = (self.normal + normal) / 2.0;
  }

  fn material_index(&self, material: MaterialId) -> Option<u32> {
    self
      .material_indices
      .iter()
      .find_map(|&(m, i)| (m == material).then_some(i))
  }

  fn transition_index(&self, id: TransitionId) -> Option<u32> {
    self
      .transition_indices
      .iter()
      .find_map(|&(t, i)| (t == id).then_some(i))
  }
}

/// Finished buffers of one assembler.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssembledMesh {
  pub unified: MeshBuffers,
  pub materials: MaterialSections,
  pub transitions: TransitionSections,
}

/// Per-session welding map and section buffers.
#[derive(Debug, Default)]
pub struct MeshAssembler {
  records: HashMap<PositionKey, VertexRecord>,
  unified: MeshBuffers,
  materials: MaterialSections,
  transitions: TransitionSections,
}

/// Blend color of a vertex inside a transition section.
#[inline]
pub fn transition_color(ordinal: Option<usize>) -> [u8; 4] {
  match ordinal {
    Some(0) => [255, 0, 0, 0],
    Some(1) => [0, 255, 0, 0],
    Some(2) => [0, 0, 255, 0],
    _ => [0, 0, 0, 0],
  }
}

impl MeshAssembler {
  pub fn new() -> Self {
    Self::default()
  }

  /// Look up or create the record of a position, folding in the normal.
  #[inline]
  fn touch(
    records: &mut HashMap<PositionKey, VertexRecord>,
    position: Vec3,
    normal: Vec3,
  ) -> &mut VertexRecord {
    records
      .entry(PositionKey::new(position))
      .and_modify(|record| record.accumulate(normal))
      .or_insert_with(|| VertexRecord::new(normal))
  }

  /// Append a triangle to the unified (collision) mesh.
  pub fn add_unified(&mut self, normal: Vec3, triangle: &[ResolvedVertex; 3]) {
    for vertex in triangle {
      let record = Self::touch(&mut self.records, vertex.position, normal);

      let index = match record.unified_index {
        Some(index) => index,
        None => {
          let index = self.unified.push_vertex(MeshVertex {
            position: vertex.position.to_array(),
            normal: record.normal.to_array(),
            color: [0; 4],
          });
          record.unified_index = Some(index);
          index
        }
      };
      self.unified.indices.push(index);
    }
  }

  /// Append a triangle to the section of a single material.
  pub fn add_material(&mut self, material: MaterialId, normal: Vec3, triangle: &[ResolvedVertex; 3]) {
    let section = self
      .materials
      .entry(material)
      .or_insert_with(|| MaterialSection {
        material,
        mesh: MeshBuffers::new(),
      });

    for vertex in triangle {
      let record = Self::touch(&mut self.records, vertex.position, normal);

      let index = match record.material_index(material) {
        Some(index) => index,
        None => {
          let index = section.mesh.push_vertex(MeshVertex {
            position: vertex.position.to_array(),
            normal: record.normal.to_array(),
            color: [0; 4],
          });
          record.material_indices.push((material, index));
          index
        }
      };
      section.mesh.indices.push(index);
    }
  }

  /// Append a triangle to the blend section of a material combination.
  ///
  /// `id` must come from the session's [`TransitionRegistry`] for `set`.
  pub fn add_transition(
    &mut self,
    set: &MaterialSet,
    id: TransitionId,
    normal: Vec3,
    triangle: &[ResolvedVertex; 3],
  ) {
    let section = self
      .transitions
      .entry(id)
      .or_insert_with(|| TransitionSection {
        id,
        label: set.label(),
        materials: set.clone(),
        mesh: MeshBuffers::new(),
      });

    for vertex in triangle {
      let record = Self::touch(&mut self.records, vertex.position, normal);

      let index = match record.transition_index(id) {
        Some(index) => index,
        None => {
          let index = section.mesh.push_vertex(MeshVertex {
            position: vertex.position.to_array(),
            normal: record.normal.to_array(),
            color: transition_color(section.materials.ordinal(vertex.material)),
          });
          record.transition_indices.push((id, index));
          index
        }
      };
      section.mesh.indices.push(index);
    }
  }

  /// True if a triangle has already been added at this exact position.
  #[inline]
  pub fn contains(&self, position: Vec3) -> bool {
    self.records.contains_key(&PositionKey::new(position))
  }

  /// Current accumulated normal at a position.
  #[inline]
  pub fn normal_at(&self, position: Vec3) -> Option<Vec3> {
    self.records.get(&PositionKey::new(position)).map(|r| r.normal)
  }

  /// Number of distinct welded positions.
  pub fn vertex_count(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Take the normal of every position that also exists in `reference`.
  pub fn adopt_normals(&mut self, reference: &MeshAssembler) {
    for (key, record) in &mut self.records {
      if let Some(shared) = reference.records.get(key) {
        record.normal = shared.normal;
      }
    }
  }

  /// Write final normals into every buffer and release the welding map.
  pub fn finish(self) -> AssembledMesh {
    let Self {
      records,
      mut unified,
      mut materials,
      mut transitions,
    } = self;

    for record in records.values() {
      let normal = record.normal.to_array();

      if let Some(index) = record.unified_index {
        unified.vertices[index as usize].normal = normal;
      }
      for &(material, index) in &record.material_indices {
        if let Some(section) = materials.get_mut(&material) {
          section.mesh.vertices[index as usize].normal = normal;
        }
      }
      for &(id, index) in &record.transition_indices {
        if let Some(section) = transitions.get_mut(&id) {
          section.mesh.vertices[index as usize].normal = normal;
        }
      }
    }

    AssembledMesh {
      unified,
      materials,
      transitions,
    }
  }
}
