//! voxel_mesher - Material-aware Transvoxel mesh extraction
//!
//! This crate converts a regularly sampled density/material field into
//! watertight triangle meshes, one bundle per level of detail. Faces of a
//! coarse LOD are stitched to the next finer LOD with Transvoxel transition
//! cells.
//!
//! # Features
//!
//! - **Transvoxel regular cells**: Lengyel's case tables, exact-position
//!   vertex welding
//! - **LOD stitching**: transition patches on all six grid faces
//! - **Material sections**: one section per material, blend sections for
//!   cells that straddle several materials
//! - **Parallel LODs**: bundles built concurrently with rayon
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec3;
//! use voxel_mesher::{extract, shapes::SphereShape, DenseField, ExtractionConfig};
//!
//! let field = DenseField::from_shape(33, 1.0, &SphereShape::new(Vec3::splat(16.0), 10.0));
//! let config = ExtractionConfig::new().with_lod(3);
//!
//! let output = extract(&field, &config)?;
//! for bundle in &output.lods {
//!   println!("LOD {}: {} triangles", bundle.lod, bundle.stats.triangle_count);
//! }
//! ```

pub mod assembler;
pub mod case_tables;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod field;
pub mod orchestrate;
pub mod output;
pub mod types;

// Re-export commonly used items
pub use assembler::{MaterialSet, MeshAssembler, TransitionId, TransitionRegistry};
pub use config::ExtractionConfig;
pub use constants::{lod_step, ISO_LEVEL, MAX_LOD_COUNT};
pub use error::ExtractionError;
pub use extract::{LodExtractor, MaterialPolicy, TransitionFace};
pub use field::{shapes, DenseField, FieldSampler, FieldView};
pub use orchestrate::{build_bundle, extract, extract_parallel};
pub use output::{
  BundleStats, LodMeshBundle, MaterialSection, OutputMesh, TransitionPatch, TransitionSection,
};
pub use types::{LatticeAddress, MaterialId, MeshBuffers, MeshVertex, MinMaxAABB};
