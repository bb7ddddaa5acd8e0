//! Transvoxel extraction of one LOD.
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PER CELL (origin, step = 2^lod)              │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Regular Cell                                 │
//! │  Sample 8 corners (clip-aware)                                  │
//! │  8-bit case code → class → pattern (early out when empty)       │
//! │  Resolve every pattern vertex (position + material policy)      │
//! │  Route: unified mesh, plus material or transition section       │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │ lod > 0, stitching enabled,
//!                               │ cell on a grid face
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Transition Cell (per touching face)          │
//! │  Sample 13 points at half step                                  │
//! │  9-bit case code → class → pattern, invert flag                 │
//! │  Normal from the regular mesh where a vertex is shared          │
//! │  Route into that face's patch sections                          │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    finish()                                     │
//! │  Patches adopt regular-mesh normals at shared positions         │
//! │  Final normals written to every section → LodMeshBundle         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All seven assemblers (regular + six patches) share one
//! [`TransitionRegistry`], so a material combination has a single id across
//! the bundle.

pub mod classify;
pub mod regular;
pub mod resolve;
pub mod transition;

// Test utilities
#[cfg(test)]
pub mod test_utils;

// Consistency tests
#[cfg(test)]
#[path = "consistency_test.rs"]
mod consistency_test;

pub use resolve::MaterialPolicy;
pub use transition::TransitionFace;

use glam::Vec3;
use smallvec::SmallVec;
use web_time::Instant;

use crate::assembler::{MaterialSet, MeshAssembler, TransitionId, TransitionRegistry};
use crate::config::ExtractionConfig;
use crate::field::{FieldSampler, FieldView};
use crate::output::{BundleStats, LodMeshBundle, TransitionPatch};
use crate::types::{LatticeAddress, MaterialId, ResolvedVertex};

/// Triangles produced by one regular or transition cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellTriangles {
  /// Materials of every resolved vertex of the cell.
  pub materials: MaterialSet,
  /// Triangles in emitted winding.
  pub triangles: SmallVec<[[ResolvedVertex; 3]; 6]>,
  /// Emitted winding is the reverse of table order.
  pub inverted: bool,
}

impl CellTriangles {
  /// Build triangles from resolved pattern vertices and table indices.
  pub fn assemble(vertices: SmallVec<[ResolvedVertex; 12]>, indices: &[u8], inverted: bool) -> Self {
    let materials = vertices.iter().map(|v| v.material).collect();
    let triangles = indices
      .chunks_exact(3)
      .map(|t| {
        let (v1, v2, v3) = (
          vertices[t[0] as usize],
          vertices[t[1] as usize],
          vertices[t[2] as usize],
        );
        if inverted {
          [v3, v2, v1]
        } else {
          [v1, v2, v3]
        }
      })
      .collect();

    Self {
      materials,
      triangles,
      inverted,
    }
  }

  /// Triangle vertices in table order (before any inversion).
  #[inline]
  pub fn table_order(&self, triangle: &[ResolvedVertex; 3]) -> [ResolvedVertex; 3] {
    if self.inverted {
      [triangle[2], triangle[1], triangle[0]]
    } else {
      *triangle
    }
  }
}

/// Section a cell's triangles are written to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Route {
  Material(MaterialId),
  Transition(TransitionId),
}

impl Route {
  fn for_cell(registry: &mut TransitionRegistry, materials: &MaterialSet) -> Option<Self> {
    if materials.len() > 1 {
      return Some(Route::Transition(registry.resolve(materials)));
    }
    materials.single().map(Route::Material)
  }

  fn add(
    self,
    assembler: &mut MeshAssembler,
    materials: &MaterialSet,
    normal: Vec3,
    triangle: &[ResolvedVertex; 3],
  ) {
    match self {
      Route::Material(material) => assembler.add_material(material, normal, triangle),
      Route::Transition(id) => assembler.add_transition(materials, id, normal, triangle),
    }
  }
}

/// Builds the [`LodMeshBundle`] of one LOD, one cell at a time.
pub struct LodExtractor<'a, F: ?Sized> {
  view: FieldView<'a, F>,
  lod: usize,
  step: i32,
  stitch: bool,
  policy: MaterialPolicy,
  registry: TransitionRegistry,
  regular: MeshAssembler,
  patches: [MeshAssembler; 6],
  stats: BundleStats,
  started: Instant,
}

impl<'a, F: FieldSampler + ?Sized> LodExtractor<'a, F> {
  pub fn new(field: &'a F, config: &ExtractionConfig, lod: usize) -> Self {
    Self {
      view: FieldView::new(field, config.elevation_clip),
      lod,
      step: config.step(lod),
      stitch: config.generate_lod && lod > 0,
      policy: MaterialPolicy::for_lod(lod),
      registry: TransitionRegistry::new(),
      regular: MeshAssembler::new(),
      patches: Default::default(),
      stats: BundleStats::default(),
      started: Instant::now(),
    }
  }

  #[inline]
  pub fn lod(&self) -> usize {
    self.lod
  }

  #[inline]
  pub fn step(&self) -> i32 {
    self.step
  }

  /// True if a cell at `origin` has all its corners inside the grid.
  #[inline]
  pub fn cell_fits(&self, origin: LatticeAddress) -> bool {
    let limit = self.view.grid_size() - 1;
    [origin.x, origin.y, origin.z]
      .into_iter()
      .all(|c| c >= 0 && c + self.step <= limit)
  }

  /// Extract the cell whose minimum corner is `origin`.
  pub fn generate_cell(&mut self, origin: LatticeAddress) {
    self.stats.cells_visited += 1;

    let corners = regular::sample_cell(&self.view, origin, self.step);

    if let Some(cell) = regular::triangulate(&self.view, &corners, self.policy) {
      self.stats.cells_emitting += 1;
      self.emit_regular(&cell);
    }

    if !self.stitch {
      return;
    }

    let far = self.view.grid_size() - self.step - 1;
    for face in TransitionFace::ALL {
      if !face.contains_cell(origin, far) {
        continue;
      }

      let addresses = corners.map(|c| c.address);
      let samples = transition::sample_cell(&self.view, &addresses, face);
      if let Some(cell) = transition::triangulate(&self.view, &samples, self.policy) {
        self.stats.transition_cells_emitting += 1;
        self.emit_transition(face, &cell);
      }
    }
  }

  fn emit_regular(&mut self, cell: &CellTriangles) {
    let route = Route::for_cell(&mut self.registry, &cell.materials);

    for triangle in &cell.triangles {
      let [v1, v2, v3] = triangle;
      let normal = regular::face_normal(v1.position, v2.position, v3.position);

      self.regular.add_unified(normal, triangle);
      if let Some(route) = route {
        route.add(&mut self.regular, &cell.materials, normal, triangle);
      }
    }
  }

  fn emit_transition(&mut self, face: TransitionFace, cell: &CellTriangles) {
    let route = Route::for_cell(&mut self.registry, &cell.materials);
    let Some(route) = route else {
      return;
    };

    for triangle in &cell.triangles {
      let [v1, v2, v3] = triangle;
      let own = regular::face_normal(v1.position, v2.position, v3.position);
      let normal = cell
        .table_order(triangle)
        .iter()
        .find_map(|v| self.regular.normal_at(v.position))
        .unwrap_or(own);

      route.add(&mut self.patches[face.index()], &cell.materials, normal, triangle);
    }
  }

  /// Finalize normals and hand over the buffers.
  pub fn finish(self) -> LodMeshBundle {
    let Self {
      lod,
      regular,
      patches,
      mut stats,
      started,
      ..
    } = self;

    let mut patches = patches.map(|mut patch| {
      patch.adopt_normals(&regular);
      patch.finish()
    });
    let assembled = regular.finish();

    let patches: [TransitionPatch; 6] = std::array::from_fn(|i| {
      let face = TransitionFace::ALL[i];
      let mesh = std::mem::take(&mut patches[i]);
      TransitionPatch {
        face,
        materials: mesh.materials,
        transitions: mesh.transitions,
      }
    });

    stats.triangle_count = assembled.unified.triangle_count()
      + patches.iter().map(TransitionPatch::triangle_count).sum::<usize>();
    stats.timing_us = started.elapsed().as_micros() as u64;

    LodMeshBundle {
      lod,
      unified: assembled.unified,
      materials: assembled.materials,
      transitions: assembled.transitions,
      patches,
      stats,
    }
  }
}
