//! Material combinations and their per-session transition ids.

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;

use crate::types::MaterialId;

/// Identifier of a transition (multi-material) section.
pub type TransitionId = u32;

/// Separator between material ids in a transition label.
pub const LABEL_SEPARATOR: char = '-';

/// Sorted set of distinct material ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialSet {
  materials: SmallVec<[MaterialId; 4]>,
}

impl MaterialSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a material, keeping the set sorted. Returns false if present.
  pub fn insert(&mut self, material: MaterialId) -> bool {
    match self.materials.binary_search(&material) {
      Ok(_) => false,
      Err(pos) => {
        self.materials.insert(pos, material);
        true
      }
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.materials.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.materials.is_empty()
  }

  #[inline]
  pub fn contains(&self, material: MaterialId) -> bool {
    self.materials.binary_search(&material).is_ok()
  }

  /// The only member, if the set holds exactly one material.
  #[inline]
  pub fn single(&self) -> Option<MaterialId> {
    match self.materials.as_slice() {
      [only] => Some(*only),
      _ => None,
    }
  }

  /// Position of a material in sorted order.
  #[inline]
  pub fn ordinal(&self, material: MaterialId) -> Option<usize> {
    self.materials.binary_search(&material).ok()
  }

  pub fn as_slice(&self) -> &[MaterialId] {
    &self.materials
  }

  pub fn iter(&self) -> impl Iterator<Item = MaterialId> + '_ {
    self.materials.iter().copied()
  }

  /// Canonical label, e.g. `"1-4-7"`.
  pub fn label(&self) -> String {
    self.to_string()
  }

  /// Decode a label produced by [`label`](Self::label).
  pub fn parse_label(label: &str) -> Option<Self> {
    if label.is_empty() {
      return Some(Self::new());
    }

    let mut set = Self::new();
    for part in label.split(LABEL_SEPARATOR) {
      set.insert(part.parse().ok()?);
    }
    Some(set)
  }
}

impl fmt::Display for MaterialSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, material) in self.materials.iter().enumerate() {
      if i > 0 {
        write!(f, "{}", LABEL_SEPARATOR)?;
      }
      write!(f, "{}", material)?;
    }
    Ok(())
  }
}

impl FromIterator<MaterialId> for MaterialSet {
  fn from_iter<I: IntoIterator<Item = MaterialId>>(iter: I) -> Self {
    let mut set = Self::new();
    for material in iter {
      set.insert(material);
    }
    set
  }
}

/// Per-session memo of transition ids keyed by set label.
///
/// Ids are allocated in first-seen order starting at 0. One registry is shared
/// by every assembler of a LOD bundle, so the same combination carries the
/// same id in the regular mesh and in all six transition patches.
#[derive(Clone, Debug, Default)]
pub struct TransitionRegistry {
  ids: HashMap<String, TransitionId>,
  next_id: TransitionId,
}

impl TransitionRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Id of a material combination, allocating one on first sight.
  pub fn resolve(&mut self, set: &MaterialSet) -> TransitionId {
    let label = set.label();
    if let Some(&id) = self.ids.get(&label) {
      return id;
    }

    let id = self.next_id;
    self.next_id += 1;
    self.ids.insert(label, id);
    id
  }

  /// Id previously allocated for a label.
  pub fn get(&self, label: &str) -> Option<TransitionId> {
    self.ids.get(label).copied()
  }

  /// Number of distinct combinations seen.
  pub fn len(&self) -> usize {
    self.ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.ids.is_empty()
  }
}

#[cfg(test)]
#[path = "material_set_test.rs"]
mod material_set_test;
