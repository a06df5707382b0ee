//! Discover which icon sizes a user supplied directory actually provides.

use std::path::{Path, PathBuf};

use super::sizes::IconSize;

/// Trait describing where source bitmaps live and whether one exists at a given size.
pub trait SourceProber {
  /// Returns `true` when a source bitmap is available for `size`.
  fn exists_at(&self, size: IconSize) -> bool;

  /// Location of the source bitmap for `size`, whether or not it exists.
  fn source_path(&self, size: IconSize) -> PathBuf;
}

/// Prober backed by a directory of `icon-<n>x<n>.png` files.
#[derive(Debug, Clone)]
pub struct DirectoryProber {
  base: PathBuf,
}

impl DirectoryProber {
  /// Create a prober rooted at `base`.
  pub fn new(base: impl Into<PathBuf>) -> Self {
    Self { base: base.into() }
  }

  /// Directory the prober looks in.
  pub fn base(&self) -> &Path {
    &self.base
  }
}

impl SourceProber for DirectoryProber {
  fn exists_at(&self, size: IconSize) -> bool {
    self.base.is_dir() && self.source_path(size).is_file()
  }

  fn source_path(&self, size: IconSize) -> PathBuf {
    self.base.join(size.file_name())
  }
}
