//! Sign classification of regular and transition cells.
//!
//! A corner is solid when its density is at or above the iso level. The case
//! code packs one bit per sample; the case tables map it to an equivalence
//! class and a triangulation pattern.

use crate::case_tables::{
  regular_class, regular_pattern, transition_class, transition_pattern, CellPattern,
  TRANSITION_CASE_WEIGHTS, TRANSITION_CLASS_MASK, TRANSITION_INVERT_FLAG,
};

/// Classified cell ready for vertex resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
  /// 8-bit (regular) or 9-bit (transition) sign code.
  pub case_code: u16,
  /// Equivalence class with the invert flag stripped.
  pub class: u8,
  /// Triangles must be emitted in reverse vertex order.
  pub inverted: bool,
  pub pattern: CellPattern,
}

/// Pack the solid bit of each corner by corner index.
#[inline]
pub fn regular_case_code(densities: &[f32; 8], iso_level: f32) -> u8 {
  let mut code = 0u8;
  for (corner, &density) in densities.iter().enumerate() {
    if density >= iso_level {
      code |= 1 << corner;
    }
  }
  code
}

/// Weighted sign code over the nine full-resolution transition samples.
#[inline]
pub fn transition_case_code(densities: &[f32; 9], iso_level: f32) -> u16 {
  let mut code = 0u16;
  for (&density, weight) in densities.iter().zip(TRANSITION_CASE_WEIGHTS) {
    if density >= iso_level {
      code |= weight;
    }
  }
  code
}

/// Classify a regular cell. `None` when the cell emits no triangles.
pub fn classify_regular(densities: &[f32; 8], iso_level: f32) -> Option<Classification> {
  let case_code = regular_case_code(densities, iso_level);
  if case_code == 0 || case_code == 0xFF {
    return None;
  }

  let pattern = regular_pattern(case_code);
  if pattern.triangle_count() == 0 {
    return None;
  }

  Some(Classification {
    case_code: case_code as u16,
    class: regular_class(case_code),
    inverted: false,
    pattern,
  })
}

/// Classify a transition cell. `None` when the cell emits no triangles.
pub fn classify_transition(densities: &[f32; 9], iso_level: f32) -> Option<Classification> {
  let case_code = transition_case_code(densities, iso_level);
  if case_code == 0 {
    return None;
  }

  let pattern = transition_pattern(case_code);
  if pattern.triangle_count() == 0 {
    return None;
  }

  let raw_class = transition_class(case_code);
  Some(Classification {
    case_code,
    class: raw_class & TRANSITION_CLASS_MASK,
    inverted: raw_class & TRANSITION_INVERT_FLAG != 0,
    pattern,
  })
}

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;
