//! Transvoxel case tables and the layout conventions that index them.
//!
//! The tables themselves (Lengyel's regular and transition cell data) come
//! from the `transvoxel-data` crate. This module adds what the extractors need
//! to read them: the transition case-code weights, the transition sample
//! aliasing, and decoding of packed edge codes.
//!
//! # Edge Codes
//!
//! Every vertex entry is a 16-bit code. The low byte names the two samples the
//! edge connects:
//!
//! ```text
//!  15        8 7     4 3     0
//! ┌───────────┬───────┬───────┐
//! │ reuse info│ from  │  to   │
//! └───────────┴───────┴───────┘
//! ```
//!
//! For regular cells `from`/`to` are corner indices 0-7. For transition cells
//! they are sample indices 0x0-0xC.
//!
//! # Transition Cell Samples
//!
//! ```text
//!   6 ─── 7 ─── 8          B ───────── C
//!   │     │     │          │           │
//!   3 ─── 4 ─── 5          │           │
//!   │     │     │          │           │
//!   0 ─── 1 ─── 2          9 ───────── A
//!  full-resolution face    half-resolution face
//! ```
//!
//! Samples 9, A, B, C alias 0, 2, 6, 8: the patch is not shrunk into the
//! cell, so both faces share positions.

use smallvec::SmallVec;
use transvoxel_data::regular_cell_data::{REGULAR_CELL_CLASS, REGULAR_CELL_DATA, REGULAR_VERTEX_DATA};
use transvoxel_data::transition_cell_data::{
  TRANSITION_CELL_CLASS, TRANSITION_CELL_DATA, TRANSITION_VERTEX_DATA,
};

/// Number of samples read by a transition cell (9 primary + 4 aliases).
pub const TRANSITION_SAMPLE_COUNT: usize = 13;

/// Case-code weight of each full-resolution transition sample.
pub const TRANSITION_CASE_WEIGHTS: [u16; 9] = [0x01, 0x02, 0x04, 0x80, 0x100, 0x08, 0x40, 0x20, 0x10];

/// Primary sample each transition sample index reads from.
pub const TRANSITION_SAMPLE_SOURCE: [usize; TRANSITION_SAMPLE_COUNT] =
  [0, 1, 2, 3, 4, 5, 6, 7, 8, 0, 2, 6, 8];

/// Bit 7 of a transition class: emit triangles in reverse order.
pub const TRANSITION_INVERT_FLAG: u8 = 0x80;

/// Low bits of a transition class: pattern index.
pub const TRANSITION_CLASS_MASK: u8 = 0x7F;

/// Split a packed edge code into its two endpoint indices.
#[inline(always)]
pub const fn edge_endpoints(edge_code: u16) -> (usize, usize) {
  (((edge_code >> 4) & 0x0F) as usize, (edge_code & 0x0F) as usize)
}

/// Triangulation pattern of one equivalence class.
///
/// `edges` lists the cell edges to interpolate, in vertex order. `triangles`
/// indexes into that vertex list, three entries per triangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellPattern {
  pub edges: SmallVec<[u16; 12]>,
  pub triangles: SmallVec<[u8; 36]>,
}

impl CellPattern {
  #[inline]
  pub fn vertex_count(&self) -> usize {
    self.edges.len()
  }

  #[inline]
  pub fn triangle_count(&self) -> usize {
    self.triangles.len() / 3
  }
}

/// Equivalence class of a regular case code.
#[inline]
pub fn regular_class(case_code: u8) -> u8 {
  REGULAR_CELL_CLASS[case_code as usize] as u8
}

/// Triangulation of a regular case code.
pub fn regular_pattern(case_code: u8) -> CellPattern {
  let cell_data = &REGULAR_CELL_DATA[regular_class(case_code) as usize];
  let vertex_count = cell_data.get_vertex_count() as usize;
  let index_count = cell_data.get_triangle_count() as usize * 3;
  let vertex_data = &REGULAR_VERTEX_DATA[case_code as usize];

  CellPattern {
    edges: (0..vertex_count).map(|i| vertex_data[i] as u16).collect(),
    triangles: (0..index_count)
      .map(|i| cell_data.vertex_index[i] as u8)
      .collect(),
  }
}

/// Raw transition class (pattern index plus invert flag).
#[inline]
pub fn transition_class(case_code: u16) -> u8 {
  TRANSITION_CELL_CLASS[case_code as usize] as u8
}

/// Triangulation of a transition case code, in table winding.
pub fn transition_pattern(case_code: u16) -> CellPattern {
  let class = transition_class(case_code) & TRANSITION_CLASS_MASK;
  let cell_data = &TRANSITION_CELL_DATA[class as usize];
  let vertex_count = cell_data.get_vertex_count() as usize;
  let index_count = cell_data.get_triangle_count() as usize * 3;
  let vertex_data = &TRANSITION_VERTEX_DATA[case_code as usize];

  CellPattern {
    edges: (0..vertex_count).map(|i| vertex_data[i] as u16).collect(),
    triangles: (0..index_count)
      .map(|i| cell_data.vertex_index[i] as u8)
      .collect(),
  }
}

#[cfg(test)]
#[path = "case_tables_test.rs"]
mod case_tables_test;
