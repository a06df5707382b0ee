//! Borrowed views over the workspace layout used throughout a build.

use std::path::{Path, PathBuf};

use crate::config::PwaConfig;

/// File names and relative directories that describe where generated files land.
#[derive(Debug, Clone, Copy)]
pub struct PwaLayout<'a> {
  /// Workspace descriptor file name, relative to the workspace root.
  pub workspace_file: &'a str,
  /// Manifest file name written into the project source root.
  pub manifest_file: &'a str,
  /// Icon directory relative to the project source root.
  pub icons_dir: &'a str,
  /// Entry HTML file relative to the project source root.
  pub index_html_file: &'a str,
  /// Builders whose targets receive the manifest asset.
  pub builders: &'a [String],
}

impl PwaLayout<'_> {
  /// Icon directory with surrounding slashes removed.
  pub fn icons_dir(&self) -> &str {
    self.icons_dir.trim_matches('/')
  }

  /// Site-relative URL path of an icon file, e.g. `assets/icons/icon-72x72.png`.
  pub fn icon_href(&self, file_name: &str) -> String {
    format!("{}/{}", self.icons_dir(), file_name)
  }
}

/// Everything a [`crate::PwaBuilder`] needs to transform a workspace.
#[derive(Debug, Clone)]
pub struct PwaBuildContext<'a> {
  /// Directory holding the workspace descriptor.
  pub workspace_root: &'a Path,
  /// Path layout derived from the configuration.
  pub layout: PwaLayout<'a>,
  /// Branding and icon options.
  pub config: &'a PwaConfig,
}

impl<'a> PwaBuildContext<'a> {
  /// Create a context for `config` rooted at `workspace_root`.
  pub fn new(workspace_root: &'a Path, config: &'a PwaConfig) -> Self {
    Self {
      workspace_root,
      layout: config.to_layout(),
      config,
    }
  }

  /// Absolute path of the workspace descriptor.
  pub fn workspace_path(&self) -> PathBuf {
    self.workspace_root.join(self.layout.workspace_file)
  }
}
