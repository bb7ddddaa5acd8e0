//! Edge crossing position and material resolution.
//!
//! # Position
//!
//! ```text
//!   A ●━━━━━━━━━━━━━○━━━━━━━━━━━━━━━━━━━━● B
//!     dA            τ                    dB
//!
//!   t = (τ - dA) / (dB - dA)
//! ```
//!
//! The endpoints are put in lattice order first, so an edge shared by several
//! cells (or by a regular and a transition cell) yields the same bits.
//!
//! # Material
//!
//! ```text
//! LOD     Policy           Source sample
//! ──────  ───────────────  ───────────────────────────────────────
//! 0       NearestCorner    endpoint closest to the vertex
//! 1..=4   LatticeMidpoint  A + round((B - A) * t)
//! 5..     SurfaceWalk      first solid sample walking from the air
//!                          endpoint towards the solid one
//! ```

use glam::Vec3;

use crate::constants::{INTERPOLATION_EPSILON, MIDPOINT_MATERIAL_MAX_LOD, NEAREST_MATERIAL_MAX_LOD};
use crate::field::{FieldSampler, FieldView};
use crate::types::{LatticeAddress, MaterialId, ResolvedVertex, SampledCorner};

/// How the material of a crossing is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialPolicy {
  NearestCorner,
  LatticeMidpoint,
  SurfaceWalk,
}

impl MaterialPolicy {
  /// Policy used by cells of the given LOD.
  pub fn for_lod(lod: usize) -> Self {
    if lod <= NEAREST_MATERIAL_MAX_LOD {
      Self::NearestCorner
    } else if lod <= MIDPOINT_MATERIAL_MAX_LOD {
      Self::LatticeMidpoint
    } else {
      Self::SurfaceWalk
    }
  }
}

/// Position of the isosurface crossing between two samples.
#[inline]
pub fn interpolate(a: &SampledCorner, b: &SampledCorner, iso_level: f32) -> Vec3 {
  let (a, b) = if b.address < a.address { (b, a) } else { (a, b) };

  if (iso_level - a.density).abs() < INTERPOLATION_EPSILON {
    return a.world_position;
  }
  if (iso_level - b.density).abs() < INTERPOLATION_EPSILON {
    return b.world_position;
  }
  if (a.density - b.density).abs() < INTERPOLATION_EPSILON {
    return a.world_position;
  }

  let t = (iso_level - a.density) / (b.density - a.density);
  a.world_position + (b.world_position - a.world_position) * t
}

/// Crossing parameter along A→B, clamped to `[0, 1]` (0 on a flat edge).
#[inline]
pub fn crossing_ratio(density_a: f32, density_b: f32, iso_level: f32) -> f32 {
  let span = density_b - density_a;
  if span.abs() < INTERPOLATION_EPSILON {
    return 0.0;
  }
  ((iso_level - density_a) / span).clamp(0.0, 1.0)
}

/// Resolve position and material of the crossing on edge A→B.
pub fn resolve_vertex<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  a: &SampledCorner,
  b: &SampledCorner,
  policy: MaterialPolicy,
  iso_level: f32,
) -> ResolvedVertex {
  let position = interpolate(a, b, iso_level);
  let material = match policy {
    MaterialPolicy::NearestCorner => nearest_material(a, b, position),
    MaterialPolicy::LatticeMidpoint => midpoint_material(view, a, b, iso_level),
    MaterialPolicy::SurfaceWalk => walked_material(view, a, b, iso_level),
  };

  ResolvedVertex { position, material }
}

fn nearest_material(a: &SampledCorner, b: &SampledCorner, position: Vec3) -> MaterialId {
  if a.material == b.material {
    return a.material;
  }

  if position.distance_squared(a.world_position) <= position.distance_squared(b.world_position) {
    a.material
  } else {
    b.material
  }
}

fn midpoint_material<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  a: &SampledCorner,
  b: &SampledCorner,
  iso_level: f32,
) -> MaterialId {
  let t = crossing_ratio(a.density, b.density, iso_level);
  let span = b.address - a.address;
  let offset = LatticeAddress::new(
    (span.x as f32 * t).round() as i32,
    (span.y as f32 * t).round() as i32,
    (span.z as f32 * t).round() as i32,
  );

  view.material(a.address + offset)
}

fn walked_material<F: FieldSampler + ?Sized>(
  view: &FieldView<'_, F>,
  a: &SampledCorner,
  b: &SampledCorner,
  iso_level: f32,
) -> MaterialId {
  let (air, solid) = if a.is_solid(iso_level) { (b, a) } else { (a, b) };

  let mut at = air.address;
  while at != solid.address {
    at = at.step_towards(solid.address);
    if view.density(at) >= iso_level {
      break;
    }
  }

  view.material(at)
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod resolve_test;
