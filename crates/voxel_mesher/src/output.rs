//! Extraction output: one bundle of mesh sections per LOD.
//!
//! ```text
//! OutputMesh
//! ├── lods[0]: LodMeshBundle
//! │   ├── unified              every triangle, no materials (collision)
//! │   ├── materials[id]        single-material sections
//! │   ├── transitions[id]      multi-material blend sections
//! │   └── patches[face; 6]     transition cells on -X +X -Y +Y -Z +Z
//! │       ├── materials[id]
//! │       └── transitions[id]
//! ├── lods[1] ...
//! └── collision_lod
//! ```
//!
//! Section maps are ordered by key so that identical input produces identical
//! output.

use std::collections::BTreeMap;

use crate::assembler::{MaterialSet, TransitionId};
use crate::extract::TransitionFace;
use crate::types::{MaterialId, MeshBuffers};

/// Triangles of a single material.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialSection {
  pub material: MaterialId,
  pub mesh: MeshBuffers,
}

/// Triangles from cells that straddle several materials.
///
/// Vertex colors carry the blend channel: the ordinal of the vertex's own
/// material in `materials` selects red, green or blue.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionSection {
  pub id: TransitionId,
  /// Material ids joined with `-`, decodable with [`MaterialSet::parse_label`].
  pub label: String,
  pub materials: MaterialSet,
  pub mesh: MeshBuffers,
}

pub type MaterialSections = BTreeMap<MaterialId, MaterialSection>;
pub type TransitionSections = BTreeMap<TransitionId, TransitionSection>;

fn sections_triangle_count(materials: &MaterialSections, transitions: &TransitionSections) -> usize {
  materials.values().map(|s| s.mesh.triangle_count()).sum::<usize>()
    + transitions.values().map(|s| s.mesh.triangle_count()).sum::<usize>()
}

/// Transition cells generated on one outer face of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionPatch {
  pub face: TransitionFace,
  pub materials: MaterialSections,
  pub transitions: TransitionSections,
}

impl TransitionPatch {
  pub fn is_empty(&self) -> bool {
    self.triangle_count() == 0
  }

  pub fn triangle_count(&self) -> usize {
    sections_triangle_count(&self.materials, &self.transitions)
  }
}

/// Counters collected while building one bundle.
#[derive(Clone, Debug, Default)]
pub struct BundleStats {
  /// Regular cells classified.
  pub cells_visited: usize,
  /// Regular cells that produced at least one triangle.
  pub cells_emitting: usize,
  /// Transition cells that produced at least one triangle.
  pub transition_cells_emitting: usize,
  /// Triangles in the unified mesh plus all transition patches.
  pub triangle_count: usize,
  /// Wall time spent building the bundle, in microseconds.
  pub timing_us: u64,
}

/// All geometry extracted at one LOD.
#[derive(Clone, Debug)]
pub struct LodMeshBundle {
  pub lod: usize,
  /// Every regular triangle, welded by position.
  pub unified: MeshBuffers,
  pub materials: MaterialSections,
  pub transitions: TransitionSections,
  /// Indexed by [`TransitionFace::index`].
  pub patches: [TransitionPatch; 6],
  pub stats: BundleStats,
}

impl LodMeshBundle {
  /// Patch generated on the given face.
  #[inline]
  pub fn patch(&self, face: TransitionFace) -> &TransitionPatch {
    &self.patches[face.index()]
  }

  pub fn is_empty(&self) -> bool {
    self.unified.is_empty() && self.patches.iter().all(TransitionPatch::is_empty)
  }

  /// Triangles in the material and transition sections (regular cells only).
  pub fn section_triangle_count(&self) -> usize {
    sections_triangle_count(&self.materials, &self.transitions)
  }

  /// Compare geometry, ignoring stats.
  pub fn same_geometry(&self, other: &Self) -> bool {
    self.lod == other.lod
      && self.unified == other.unified
      && self.materials == other.materials
      && self.transitions == other.transitions
      && self.patches == other.patches
  }
}

/// Result of one extraction call.
#[derive(Clone, Debug)]
pub struct OutputMesh {
  /// Bundles indexed by LOD.
  pub lods: Vec<LodMeshBundle>,
  pub collision_lod: usize,
}

impl OutputMesh {
  /// Unified mesh of the collision LOD.
  pub fn collision_mesh(&self) -> Option<&MeshBuffers> {
    self.lods.get(self.collision_lod).map(|bundle| &bundle.unified)
  }

  #[inline]
  pub fn lod(&self, lod: usize) -> Option<&LodMeshBundle> {
    self.lods.get(lod)
  }

  pub fn lod_count(&self) -> usize {
    self.lods.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lods.iter().all(LodMeshBundle::is_empty)
  }

  /// Compare geometry of every bundle, ignoring stats.
  pub fn same_geometry(&self, other: &Self) -> bool {
    self.collision_lod == other.collision_lod
      && self.lods.len() == other.lods.len()
      && self.lods.iter().zip(&other.lods).all(|(a, b)| a.same_geometry(b))
  }
}
