//! Decide which available source bitmap backs every required icon size.
//!
//! The scan walks the required sizes from largest to smallest. A missing size is served by
//! the nearest larger available bitmap, so sources are only ever scaled down. Sizes larger
//! than the first available bitmap have no larger donor and are back-filled by that first
//! bitmap instead.

use std::collections::BTreeMap;

use super::sizes::IconSize;

/// Table from an available source size to the required sizes copied from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackMapping {
  entries: BTreeMap<IconSize, Vec<IconSize>>,
}

impl FallbackMapping {
  /// Returns `true` when no source bitmap was available at all.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Number of distinct source bitmaps in use.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Available sizes that back at least one required size, largest first.
  pub fn sources(&self) -> impl Iterator<Item = IconSize> + '_ {
    self.entries.keys().rev().copied()
  }

  /// Required sizes served by `source`, in scan order.
  pub fn targets_for(&self, source: IconSize) -> Option<&[IconSize]> {
    self.entries.get(&source).map(Vec::as_slice)
  }

  /// The source bitmap chosen for a required size.
  pub fn source_for(&self, target: IconSize) -> Option<IconSize> {
    self
      .entries
      .iter()
      .find(|(_, targets)| targets.contains(&target))
      .map(|(source, _)| *source)
  }

  /// Iterate `(source, targets)` pairs, largest source first.
  pub fn iter(&self) -> impl Iterator<Item = (IconSize, &[IconSize])> + '_ {
    self
      .entries
      .iter()
      .rev()
      .map(|(source, targets)| (*source, targets.as_slice()))
  }

  /// Returns `true` when every required size appears in exactly one entry.
  pub fn covers(&self, required: &[IconSize]) -> bool {
    let mut mapped: Vec<IconSize> = self.entries.values().flatten().copied().collect();
    if mapped.len() != required.len() {
      return false;
    }
    mapped.sort_unstable();
    let mut expected = required.to_vec();
    expected.sort_unstable();
    mapped == expected
  }
}

/// Compute the fallback mapping for `required` sizes, which must be strictly descending.
///
/// `exists` reports whether a source bitmap is available at a given size. When it never
/// returns `true` the mapping is empty and the caller is expected to use the bundled
/// default set in full.
pub fn compute_fallback_mapping<F>(required: &[IconSize], mut exists: F) -> FallbackMapping
where
  F: FnMut(IconSize) -> bool,
{
  debug_assert!(
    required.windows(2).all(|pair| pair[0] > pair[1]),
    "required sizes must be strictly descending"
  );

  let (entries, _) = required.iter().enumerate().fold(
    (BTreeMap::new(), None::<IconSize>),
    |(mut entries, last_available): (BTreeMap<IconSize, Vec<IconSize>>, _), (index, &size)| {
      if exists(size) {
        let mut targets = Vec::new();
        if last_available.is_none() {
          targets.extend_from_slice(&required[..index]);
        }
        targets.push(size);
        entries.insert(size, targets);
        (entries, Some(size))
      } else {
        if let Some(donor) = last_available {
          entries.entry(donor).or_default().push(size);
        }
        (entries, last_available)
      }
    },
  );

  FallbackMapping { entries }
}
