//! Regular cell triangulation.

use glam::Vec3;

use super::classify::classify_regular;
use super::resolve::{resolve_vertex, MaterialPolicy};
use super::CellTriangles;
use crate::case_tables::edge_endpoints;
use crate::constants::{CORNER_OFFSETS, ISO_LEVEL};
use crate::field::{FieldSampler, FieldView};
use crate::types::{LatticeAddress, SampledCorner};

/// Lattice addresses of the eight corners of the cell at `origin`.
#[inline]
pub fn corner_addresses(origin: LatticeAddress, step: i32) -> [LatticeAddress; 8] {
  std::array::from_fn(|i| origin + LatticeAddress::from(CORNER_OFFSETS[i]) * step)
}

/// Read the eight corners of a cell.
#[inline]
pub fn sample_cell<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  origin: LatticeAddress,
  step: i32,
) -> [SampledCorner; 8] {
  corner_addresses(origin, step).map(|at| view.corner(at))
}

/// Triangulate one cell. `None` if the surface does not cross it.
pub fn triangulate<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  corners: &[SampledCorner; 8],
  policy: MaterialPolicy,
) -> Option<CellTriangles> {
  let densities = corners.map(|c| c.density);
  let classified = classify_regular(&densities, ISO_LEVEL)?;

  let vertices = classified.pattern.edges.iter().map(|&edge| {
    let (a, b) = edge_endpoints(edge);
    resolve_vertex(view, &corners[a], &corners[b], policy, ISO_LEVEL)
  });

  Some(CellTriangles::assemble(
    vertices.collect(),
    &classified.pattern.triangles,
    false,
  ))
}

/// Outward normal of a triangle in emitted order.
#[inline]
pub fn face_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
  (p2 - p1).cross(p3 - p1).normalize_or_zero()
}

#[cfg(test)]
#[path = "regular_test.rs"]
mod regular_test;
