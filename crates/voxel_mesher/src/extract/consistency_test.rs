//! Whole-pipeline properties of the extracted meshes.

use std::collections::HashSet;

use glam::Vec3;

use super::test_utils::*;
use crate::assembler::{MaterialSet, PositionKey};
use crate::config::ExtractionConfig;
use crate::field::DenseField;
use crate::orchestrate::{extract, extract_parallel};
use crate::output::OutputMesh;
use crate::types::MeshBuffers;

fn positions(mesh: &MeshBuffers) -> HashSet<PositionKey> {
  mesh
    .vertices
    .iter()
    .map(|v| PositionKey::new(Vec3::from_array(v.position)))
    .collect()
}

fn patch_meshes(output: &OutputMesh, lod: usize) -> Vec<&MeshBuffers> {
  output.lods[lod]
    .patches
    .iter()
    .flat_map(|patch| {
      patch
        .materials
        .values()
        .map(|s| &s.mesh)
        .chain(patch.transitions.values().map(|s| &s.mesh))
    })
    .collect()
}

fn terrain_output(size: i32, lods: usize) -> OutputMesh {
  extract(&layered_terrain(size), &ExtractionConfig::new().with_lod(lods)).unwrap()
}

#[test]
fn test_idempotent() {
  let field = layered_terrain(17);
  let config = ExtractionConfig::new().with_lod(3);

  let first = extract(&field, &config).unwrap();
  let second = extract(&field, &config).unwrap();

  assert!(first.same_geometry(&second));
  for (a, b) in first.lods.iter().zip(&second.lods) {
    let bits = |mesh: &MeshBuffers| -> Vec<[u32; 3]> {
      mesh.vertices.iter().map(|v| v.position.map(f32::to_bits)).collect()
    };
    assert_eq!(bits(&a.unified), bits(&b.unified));
    assert_eq!(a.unified.indices, b.unified.indices);
  }
}

#[test]
fn test_transition_patches_are_crack_free() {
  let output = terrain_output(17, 3);

  let mut checked = 0;
  for lod in 1..output.lod_count() {
    let mut regular = positions(&output.lods[lod].unified);
    regular.extend(positions(&output.lods[lod - 1].unified));

    for mesh in patch_meshes(&output, lod) {
      for v in &mesh.vertices {
        assert!(
          regular.contains(&PositionKey::new(Vec3::from_array(v.position))),
          "LOD {} patch vertex {:?} has no regular counterpart",
          lod,
          v.position
        );
        checked += 1;
      }
    }
  }

  assert!(checked > 0, "Fixture should produce transition patches");
}

#[test]
fn test_coarse_face_vertices_match_own_lod() {
  // Patch vertices on the half-resolution side coincide with this LOD's mesh;
  // the rest coincide with the finer LOD
  let output = terrain_output(17, 2);
  let own = positions(&output.lods[1].unified);
  let finer = positions(&output.lods[0].unified);

  let patch_positions: HashSet<PositionKey> = patch_meshes(&output, 1)
    .into_iter()
    .flat_map(positions)
    .collect();

  assert!(patch_positions.iter().any(|p| own.contains(p)));
  assert!(patch_positions.iter().any(|p| finer.contains(p) && !own.contains(p)));
}

#[test]
fn test_normals_continuous_across_patches() {
  let output = terrain_output(17, 3);

  let mut shared = 0;
  for lod in 1..output.lod_count() {
    let unified = normals_by_position(&output.lods[lod].unified);
    for mesh in patch_meshes(&output, lod) {
      for (key, normal) in normals_by_position(mesh) {
        if let Some(expected) = unified.get(&key) {
          assert_eq!(normal, *expected, "LOD {} normal mismatch", lod);
          shared += 1;
        }
      }
    }
  }

  assert!(shared > 0);
}

#[test]
fn test_normals_agree_between_unified_and_sections() {
  let output = terrain_output(17, 1);
  let bundle = &output.lods[0];
  let unified = normals_by_position(&bundle.unified);

  let sections = bundle
    .materials
    .values()
    .map(|s| &s.mesh)
    .chain(bundle.transitions.values().map(|s| &s.mesh));
  for mesh in sections {
    for (key, normal) in normals_by_position(mesh) {
      assert_eq!(unified.get(&key), Some(&normal));
    }
  }
}

#[test]
fn test_sections_partition_unified_triangles() {
  let output = terrain_output(17, 3);
  for bundle in &output.lods {
    assert_eq!(bundle.section_triangle_count(), bundle.unified.triangle_count());
  }
}

#[test]
fn test_homogeneous_fields_are_empty() {
  for density in [0.0, 0.1, 0.49, 0.5, 0.9, 1.0] {
    let mut field = DenseField::new(9, 1.0);
    for x in 0..9 {
      for y in 0..9 {
        for z in 0..9 {
          field.set_density(crate::types::LatticeAddress::new(x, y, z), density);
        }
      }
    }

    let output = extract(&field, &ExtractionConfig::new().with_lod(3)).unwrap();
    assert!(output.is_empty(), "Density {} produced triangles", density);
  }
}

#[test]
fn test_material_closure() {
  let output = terrain_output(17, 4);
  let mut transition_sections = 0;

  for bundle in &output.lods {
    for (&material, section) in &bundle.materials {
      assert_eq!(section.material, material);
      assert!(section.mesh.vertices.iter().all(|v| v.color == [0; 4]));
    }

    let patch_transitions = bundle.patches.iter().flat_map(|p| p.transitions.iter());
    for (&id, section) in bundle.transitions.iter().chain(patch_transitions) {
      assert_eq!(section.id, id);
      assert!(section.materials.len() > 1);
      assert_eq!(MaterialSet::parse_label(&section.label).as_ref(), Some(&section.materials));
      transition_sections += 1;
    }
  }

  assert!(transition_sections > 0, "Fixture should straddle material bands");
}

#[test]
fn test_transition_ids_shared_within_bundle() {
  let output = terrain_output(17, 3);
  for bundle in &output.lods {
    let patch_transitions = bundle.patches.iter().flat_map(|p| p.transitions.values());
    for section in bundle.transitions.values().chain(patch_transitions) {
      for other in bundle.transitions.values() {
        assert_eq!(section.id == other.id, section.label == other.label);
      }
    }
  }
}

#[test]
fn test_uniform_material_has_single_section() {
  let field = sphere_field(17, 6.0, 3);
  let output = extract(&field, &ExtractionConfig::new().with_lod(3)).unwrap();

  for bundle in &output.lods {
    assert!(bundle.transitions.is_empty());
    assert_eq!(bundle.materials.keys().copied().collect::<Vec<_>>(), vec![3]);
  }
}

#[test]
fn test_sphere_normals_point_outward() {
  let size = 17;
  let center = Vec3::splat((size - 1) as f32 * 0.5);
  let output = extract(&sphere_field(size, 6.0, 0), &ExtractionConfig::new()).unwrap();
  let mesh = &output.lods[0].unified;

  let normals = triangle_normals(mesh);
  for (normal, [a, b, c]) in normals.iter().zip(mesh.triangles()) {
    if *normal == Vec3::ZERO {
      continue;
    }
    let centroid = (Vec3::from_array(a) + Vec3::from_array(b) + Vec3::from_array(c)) / 3.0;
    let radial = (centroid - center).normalize();
    assert!(normal.dot(radial) > -0.25, "Inward triangle at {:?}", centroid);
  }
}

#[test]
fn test_parallel_matches_sequential() {
  let field = layered_terrain(17);
  let config = ExtractionConfig::new().with_lod(4).with_collision_lod(2);

  let sequential = extract(&field, &config).unwrap();
  let parallel = extract_parallel(&field, &config).unwrap();

  assert!(sequential.same_geometry(&parallel));
}

#[test]
fn test_cached_cells_match_full_scan() {
  let full = sphere_field(9, 3.0, 1);
  let mut cached = full.clone();
  cached.set_cached_cells(0, full_scan_cells(9, 1));

  let config = ExtractionConfig::new();
  let a = extract(&full, &config).unwrap();
  let b = extract(&cached, &config).unwrap();

  assert!(a.same_geometry(&b));
  assert!(!a.is_empty());
}
