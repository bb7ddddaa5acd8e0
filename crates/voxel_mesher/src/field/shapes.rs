//! Simple analytic shapes for filling a [`DenseField`](super::DenseField).
//!
//! These shapes implement deterministic mathematical fields that are easy to
//! verify visually. Signed distances are mapped to densities so that the
//! surface lands exactly on [`ISO_LEVEL`]: solid samples saturate at 1.0,
//! air samples at 0.0.

use glam::Vec3;

use crate::constants::ISO_LEVEL;
use crate::types::MaterialId;

/// Density/material source evaluated at world positions.
pub trait DensityShape {
  fn density(&self, world: Vec3) -> f32;

  fn material(&self, _world: Vec3) -> MaterialId {
    0
  }
}

/// Map a signed distance (negative inside) to a clamped density.
#[inline]
pub fn sdf_to_density(sdf: f32) -> f32 {
  (ISO_LEVEL - sdf).clamp(0.0, 1.0)
}

/// Sphere with a single material.
#[derive(Clone, Debug)]
pub struct SphereShape {
  pub center: Vec3,
  pub radius: f32,
  pub material: MaterialId,
}

impl SphereShape {
  pub fn new(center: Vec3, radius: f32) -> Self {
    Self {
      center,
      radius,
      material: 0,
    }
  }

  pub fn with_material(mut self, material: MaterialId) -> Self {
    self.material = material;
    self
  }
}

impl DensityShape for SphereShape {
  fn density(&self, world: Vec3) -> f32 {
    sdf_to_density(world.distance(self.center) - self.radius)
  }

  fn material(&self, _world: Vec3) -> MaterialId {
    self.material
  }
}

/// Axis-aligned box given by its center and half extents.
#[derive(Clone, Debug)]
pub struct BoxShape {
  pub center: Vec3,
  pub half_extents: Vec3,
  pub material: MaterialId,
}

impl BoxShape {
  pub fn new(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      center,
      half_extents,
      material: 0,
    }
  }

  pub fn with_material(mut self, material: MaterialId) -> Self {
    self.material = material;
    self
  }
}

impl DensityShape for BoxShape {
  fn density(&self, world: Vec3) -> f32 {
    let q = (world - self.center).abs() - self.half_extents;
    let sdf = q.max(Vec3::ZERO).length() + q.max_element().min(0.0);
    sdf_to_density(sdf)
  }

  fn material(&self, _world: Vec3) -> MaterialId {
    self.material
  }
}

/// Plane tilted around the Y axis, solid below.
///
/// SDF: `(z - height) * cos(angle) - x * sin(angle)`
/// Default: horizontal ground at z = height.
#[derive(Clone, Debug)]
pub struct TiltedPlaneShape {
  /// Height offset of the plane.
  pub height: f32,
  /// Tilt angle in radians.
  pub angle: f32,
}

impl Default for TiltedPlaneShape {
  fn default() -> Self {
    Self {
      height: 0.0,
      angle: 0.0,
    }
  }
}

impl TiltedPlaneShape {
  pub fn new(height: f32) -> Self {
    Self {
      height,
      ..Default::default()
    }
  }

  pub fn with_angle_degrees(mut self, degrees: f32) -> Self {
    self.angle = degrees.to_radians();
    self
  }
}

impl DensityShape for TiltedPlaneShape {
  fn density(&self, world: Vec3) -> f32 {
    let sdf = (world.z - self.height) * self.angle.cos() - world.x * self.angle.sin();
    sdf_to_density(sdf)
  }
}

/// Wraps a shape and assigns materials by world-Z bands.
///
/// `bands[i] = (max_z, material)`; the first band whose `max_z` is above the
/// sample wins, the last band catches everything higher.
#[derive(Clone, Debug)]
pub struct Strata<S> {
  pub shape: S,
  pub bands: Vec<(f32, MaterialId)>,
}

impl<S: DensityShape> Strata<S> {
  pub fn new(shape: S) -> Self {
    Self {
      shape,
      bands: Vec::new(),
    }
  }

  pub fn with_band(mut self, max_z: f32, material: MaterialId) -> Self {
    self.bands.push((max_z, material));
    self
  }
}

impl<S: DensityShape> DensityShape for Strata<S> {
  fn density(&self, world: Vec3) -> f32 {
    self.shape.density(world)
  }

  fn material(&self, world: Vec3) -> MaterialId {
    self
      .bands
      .iter()
      .find(|(max_z, _)| world.z < *max_z)
      .or(self.bands.last())
      .map_or_else(|| self.shape.material(world), |&(_, material)| material)
  }
}
