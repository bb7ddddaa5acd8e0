//! Transition cells on the outer faces of the grid.
//!
//! At LOD > 0 every cell touching a grid face also triangulates a transition
//! cell on that face. The face is sampled at half the cell step, which matches
//! the lattice of the next finer LOD, so the patch stitches this LOD's
//! regular mesh to a finer neighbour.
//!
//! ```text
//!  c6 ──── d7 ──── c8
//!   │       │       │       c0, c2, c6, c8  cell corners on the face
//!  a3 ──── d4 ──── a5       d1, a3, a5, d7  edge midpoints
//!   │       │       │       d4              face center
//!  c0 ──── d1 ──── c2
//! ```
//!
//! # Face Corners
//!
//! ```text
//! Face  Fires when       Cell corners (c0, c2, c6, c8)
//! ────  ───────────────  ─────────────────────────────
//!  -X   x == 0           0, 2, 4, 6
//!  +X   x == far         3, 1, 7, 5
//!  -Y   y == 0           1, 0, 5, 4
//!  +Y   y == far         2, 3, 6, 7
//!  -Z   z == 0           1, 3, 0, 2
//!  +Z   z == far         7, 5, 6, 4
//!
//! far = grid_size - step - 1
//! ```

use super::classify::classify_transition;
use super::resolve::{resolve_vertex, MaterialPolicy};
use super::CellTriangles;
use crate::case_tables::{edge_endpoints, TRANSITION_SAMPLE_COUNT, TRANSITION_SAMPLE_SOURCE};
use crate::constants::ISO_LEVEL;
use crate::field::{FieldSampler, FieldView};
use crate::types::{LatticeAddress, SampledCorner};

/// One of the six outer faces of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransitionFace {
  NegX,
  PosX,
  NegY,
  PosY,
  NegZ,
  PosZ,
}

impl TransitionFace {
  pub const ALL: [TransitionFace; 6] = [
    TransitionFace::NegX,
    TransitionFace::PosX,
    TransitionFace::NegY,
    TransitionFace::PosY,
    TransitionFace::NegZ,
    TransitionFace::PosZ,
  ];

  /// Patch slot of the face in a bundle.
  #[inline]
  pub const fn index(self) -> usize {
    self as usize
  }

  /// Cell corners mapped onto transition samples 0, 2, 6 and 8.
  #[inline]
  pub const fn corner_indices(self) -> [usize; 4] {
    match self {
      TransitionFace::NegX => [0, 2, 4, 6],
      TransitionFace::PosX => [3, 1, 7, 5],
      TransitionFace::NegY => [1, 0, 5, 4],
      TransitionFace::PosY => [2, 3, 6, 7],
      TransitionFace::NegZ => [1, 3, 0, 2],
      TransitionFace::PosZ => [7, 5, 6, 4],
    }
  }

  /// True if a cell at `origin` lies on this face. `far` is the largest
  /// cell coordinate on an axis.
  #[inline]
  pub fn contains_cell(self, origin: LatticeAddress, far: i32) -> bool {
    match self {
      TransitionFace::NegX => origin.x == 0,
      TransitionFace::PosX => origin.x == far,
      TransitionFace::NegY => origin.y == 0,
      TransitionFace::PosY => origin.y == far,
      TransitionFace::NegZ => origin.z == 0,
      TransitionFace::PosZ => origin.z == far,
    }
  }
}

/// Lattice addresses of the 13 transition samples for a face of a cell.
pub fn sample_addresses(
  cell_corners: &[LatticeAddress; 8],
  face: TransitionFace,
) -> [LatticeAddress; TRANSITION_SAMPLE_COUNT] {
  let [i0, i2, i6, i8] = face.corner_indices();
  let (c0, c2, c6, c8) = (cell_corners[i0], cell_corners[i2], cell_corners[i6], cell_corners[i8]);

  let a3 = c6.midpoint(c0);
  let a5 = c8.midpoint(c2);
  let primary = [
    c0,
    c2.midpoint(c0),
    c2,
    a3,
    a5.midpoint(a3),
    a5,
    c6,
    c8.midpoint(c6),
    c8,
  ];

  TRANSITION_SAMPLE_SOURCE.map(|source| primary[source])
}

/// Read the 13 transition samples of a face of the cell with these corners.
pub fn sample_cell<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  cell_corners: &[LatticeAddress; 8],
  face: TransitionFace,
) -> [SampledCorner; TRANSITION_SAMPLE_COUNT] {
  sample_addresses(cell_corners, face).map(|at| view.corner(at))
}

/// Triangulate one transition cell. Triangles come out in final winding.
pub fn triangulate<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  samples: &[SampledCorner; TRANSITION_SAMPLE_COUNT],
  policy: MaterialPolicy,
) -> Option<CellTriangles> {
  let densities: [f32; 9] = std::array::from_fn(|i| samples[i].density);
  let classified = classify_transition(&densities, ISO_LEVEL)?;

  let vertices = classified.pattern.edges.iter().map(|&edge| {
    let (a, b) = edge_endpoints(edge);
    resolve_vertex(view, &samples[a], &samples[b], policy, ISO_LEVEL)
  });

  Some(CellTriangles::assemble(
    vertices.collect(),
    &classified.pattern.triangles,
    classified.inverted,
  ))
}

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;
