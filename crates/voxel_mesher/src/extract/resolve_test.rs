use glam::Vec3;

use super::*;
use crate::constants::ISO_LEVEL;
use crate::field::DenseField;

fn corner(at: [i32; 3], density: f32, material: MaterialId) -> SampledCorner {
  SampledCorner {
    address: at.into(),
    world_position: Vec3::new(at[0] as f32, at[1] as f32, at[2] as f32),
    density,
    material,
  }
}

#[test]
fn test_interpolate_linear() {
  let a = corner([0, 0, 0], 0.0, 0);
  let b = corner([2, 0, 0], 1.0, 0);
  assert_eq!(interpolate(&a, &b, ISO_LEVEL), Vec3::new(1.0, 0.0, 0.0));

  let c = corner([0, 0, 0], 0.25, 0);
  let d = corner([0, 0, 1], 1.0, 0);
  let p = interpolate(&c, &d, ISO_LEVEL);
  assert!((p.z - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_interpolate_snaps_to_endpoint_on_iso() {
  let a = corner([0, 0, 0], ISO_LEVEL, 0);
  let b = corner([1, 0, 0], 1.0, 0);
  assert_eq!(interpolate(&a, &b, ISO_LEVEL), a.world_position);

  let c = corner([0, 0, 0], 0.0, 0);
  let d = corner([1, 0, 0], ISO_LEVEL + 0.000001, 0);
  assert_eq!(interpolate(&c, &d, ISO_LEVEL), d.world_position);
}

#[test]
fn test_interpolate_flat_edge_uses_first_endpoint() {
  let a = corner([0, 1, 0], 0.3, 0);
  let b = corner([0, 2, 0], 0.3, 0);
  assert_eq!(interpolate(&a, &b, ISO_LEVEL), a.world_position);
  assert_eq!(interpolate(&b, &a, ISO_LEVEL), a.world_position);
}

#[test]
fn test_interpolate_is_order_independent() {
  // Bit-identical regardless of which cell visits the edge
  for i in 0..50 {
    let da = i as f32 * 0.0137;
    let db = 1.0 - i as f32 * 0.0071;
    let a = corner([3, 4, 5], da, 0);
    let b = corner([3, 4, 6], db, 0);
    assert_eq!(
      interpolate(&a, &b, ISO_LEVEL).to_array().map(f32::to_bits),
      interpolate(&b, &a, ISO_LEVEL).to_array().map(f32::to_bits),
    );
  }
}

#[test]
fn test_crossing_ratio() {
  assert_eq!(crossing_ratio(1.0, 0.0, ISO_LEVEL), 0.5);
  assert_eq!(crossing_ratio(0.3, 0.3, ISO_LEVEL), 0.0);
  assert_eq!(crossing_ratio(0.6, 0.9, ISO_LEVEL), 0.0);
  assert_eq!(crossing_ratio(0.0, 0.2, ISO_LEVEL), 1.0);
}

#[test]
fn test_policy_bands() {
  assert_eq!(MaterialPolicy::for_lod(0), MaterialPolicy::NearestCorner);
  assert_eq!(MaterialPolicy::for_lod(1), MaterialPolicy::LatticeMidpoint);
  assert_eq!(MaterialPolicy::for_lod(4), MaterialPolicy::LatticeMidpoint);
  assert_eq!(MaterialPolicy::for_lod(5), MaterialPolicy::SurfaceWalk);
  assert_eq!(MaterialPolicy::for_lod(6), MaterialPolicy::SurfaceWalk);
}

#[test]
fn test_nearest_picks_closer_corner() {
  let field = DenseField::new(2, 1.0);
  let view = FieldView::new(&field, None);

  let a = corner([0, 0, 0], 1.0, 1);
  let b = corner([1, 0, 0], 0.45, 2);
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::NearestCorner, ISO_LEVEL);
  assert!(v.position.x > 0.5);
  assert_eq!(v.material, 2);
}

#[test]
fn test_nearest_tie_goes_to_first_endpoint() {
  let field = DenseField::new(2, 1.0);
  let view = FieldView::new(&field, None);

  let a = corner([0, 1, 0], 0.0, 4);
  let b = corner([0, 0, 0], 1.0, 9);
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::NearestCorner, ISO_LEVEL);
  assert_eq!(v.position, Vec3::new(0.0, 0.5, 0.0));
  assert_eq!(v.material, 4);
}

#[test]
fn test_midpoint_samples_lattice() {
  let mut field = DenseField::new(8, 1.0);
  field.set(LatticeAddress::new(0, 0, 0), 1.0, 1);
  field.set_material(LatticeAddress::new(1, 0, 0), 6);
  field.set_material(LatticeAddress::new(2, 0, 0), 7);
  field.set(LatticeAddress::new(4, 0, 0), 0.0, 2);
  let view = FieldView::new(&field, None);

  let a = view.corner(LatticeAddress::new(0, 0, 0));
  let b = view.corner(LatticeAddress::new(4, 0, 0));
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::LatticeMidpoint, ISO_LEVEL);
  assert_eq!(v.position, Vec3::new(2.0, 0.0, 0.0));
  assert_eq!(v.material, 7);
}

#[test]
fn test_midpoint_rounds_to_nearest_sample() {
  let mut field = DenseField::new(8, 1.0);
  field.set(LatticeAddress::new(0, 0, 0), 0.0, 1);
  field.set_material(LatticeAddress::new(2, 0, 0), 5);
  field.set_material(LatticeAddress::new(3, 0, 0), 6);
  field.set(LatticeAddress::new(4, 0, 0), 0.8, 2);
  let view = FieldView::new(&field, None);

  // t = 0.625, 4 * t = 2.5 rounds away from zero
  let a = view.corner(LatticeAddress::new(0, 0, 0));
  let b = view.corner(LatticeAddress::new(4, 0, 0));
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::LatticeMidpoint, ISO_LEVEL);
  assert_eq!(v.material, 6);
}

#[test]
fn test_walk_stops_at_first_solid_sample() {
  let mut field = DenseField::new(9, 1.0);
  for x in 5..=8 {
    field.set(LatticeAddress::new(x, 0, 0), 1.0, 3);
  }
  field.set_material(LatticeAddress::new(8, 0, 0), 8);
  let view = FieldView::new(&field, None);

  let a = view.corner(LatticeAddress::new(0, 0, 0));
  let b = view.corner(LatticeAddress::new(8, 0, 0));
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::SurfaceWalk, ISO_LEVEL);
  assert_eq!(v.material, 3);

  // Same edge walked from the other direction
  let w = resolve_vertex(&view, &b, &a, MaterialPolicy::SurfaceWalk, ISO_LEVEL);
  assert_eq!(w.material, 3);
}

#[test]
fn test_walk_reaches_solid_corner() {
  let mut field = DenseField::new(5, 1.0);
  field.set(LatticeAddress::new(0, 0, 4), 1.0, 2);
  let view = FieldView::new(&field, None);

  let a = view.corner(LatticeAddress::new(0, 0, 0));
  let b = view.corner(LatticeAddress::new(0, 0, 4));
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::SurfaceWalk, ISO_LEVEL);
  assert_eq!(v.material, 2);
}

#[test]
fn test_walk_respects_elevation_clip() {
  let mut field = DenseField::new(5, 1.0);
  for z in 1..=4 {
    field.set(LatticeAddress::new(0, 0, z), 1.0, z as MaterialId);
  }
  let view = FieldView::new(&field, Some(2.5));

  // Samples above z = 2.5 read as air, so the walk passes z = 3
  let a = view.corner(LatticeAddress::new(0, 0, 4));
  let b = view.corner(LatticeAddress::new(0, 0, 1));
  assert!(!a.is_solid(ISO_LEVEL));
  let v = resolve_vertex(&view, &a, &b, MaterialPolicy::SurfaceWalk, ISO_LEVEL);
  assert_eq!(v.material, 2);
}
