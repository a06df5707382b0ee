//! Canonical icon sizes and the naming convention shared by sources and destinations.

use std::fmt;

/// Edge length in pixels of a square icon bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconSize(u32);

impl IconSize {
  /// Wrap a pixel edge length.
  pub const fn new(edge: u32) -> Self {
    Self(edge)
  }

  /// Pixel edge length of the icon.
  pub const fn edge(self) -> u32 {
    self.0
  }

  /// File name used for this size, both in source directories and in the generated tree.
  pub fn file_name(self) -> String {
    format!("icon-{0}x{0}.png", self.0)
  }

  /// Value of the manifest `sizes` attribute, e.g. `192x192`.
  pub fn dimensions(self) -> String {
    format!("{0}x{0}", self.0)
  }
}

impl fmt::Display for IconSize {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}px", self.0)
  }
}

/// Every size the generated manifest declares, largest first.
pub const CANONICAL_SIZES: [IconSize; 8] = [
  IconSize(512),
  IconSize(384),
  IconSize(192),
  IconSize(152),
  IconSize(144),
  IconSize(128),
  IconSize(96),
  IconSize(72),
];

/// Size linked from `index.html` as the `apple-touch-icon`.
pub const APPLE_TOUCH_ICON_SIZE: IconSize = IconSize(192);
