//! Project configuration loader describing PWA branding and workspace layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::project::PwaLayout;

/// File name searched for next to the workspace descriptor.
pub const DEFAULT_CONFIG_FILE: &str = "pwa.config.json";

/// Theme colour written into the manifest and `index.html` when none is configured.
pub const DEFAULT_THEME_COLOR: &str = "#2c3049";

/// Prefix prepended to icon URLs in the manifest when no deploy URL is configured.
pub const DEFAULT_DEPLOY_URL: &str = "ng-bundle";

/// Discoverable configuration describing branding, icon sources and output paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PwaConfig {
  /// Project to transform. Falls back to the workspace default project.
  pub project: Option<String>,
  /// Application name. Falls back to the project name.
  pub title: Option<String>,
  /// Short application name. Falls back to the title.
  pub short_name: Option<String>,
  /// Theme colour for the manifest and the `theme-color` meta tag.
  pub theme_color: String,
  /// Splash screen background colour.
  pub background_color: String,
  /// URL prefix under which icons are served.
  pub deploy_url: String,
  /// Directory holding user supplied `icon-<n>x<n>.png` files, relative to the workspace.
  pub icons_path: Option<PathBuf>,
  /// Abort instead of falling back to the default icons when `icons_path` holds none.
  pub require_icons: bool,
  /// Workspace descriptor file name.
  pub workspace_file: String,
  /// Manifest file name written into the project source root.
  pub manifest_file: String,
  /// Icon directory relative to the project source root.
  pub icons_dir: String,
  /// Entry HTML file relative to the project source root.
  pub index_html_file: String,
  /// Builders whose targets receive the manifest as an asset.
  pub builders: Vec<String>,
}

impl Default for PwaConfig {
  fn default() -> Self {
    Self {
      project: None,
      title: None,
      short_name: None,
      theme_color: DEFAULT_THEME_COLOR.into(),
      background_color: "#fafafa".into(),
      deploy_url: DEFAULT_DEPLOY_URL.into(),
      icons_path: None,
      require_icons: false,
      workspace_file: "angular.json".into(),
      manifest_file: "manifest.webmanifest".into(),
      icons_dir: "assets/icons".into(),
      index_html_file: "index.html".into(),
      builders: vec![
        "@angular-devkit/build-angular:browser".into(),
        "@angular-builders/custom-webpack:browser".into(),
      ],
    }
  }
}

impl PwaConfig {
  /// Attempt to load configuration from the provided workspace directory.
  ///
  /// When the configuration file does not exist or fails to parse we fallback to default
  /// values so the CLI keeps working on untouched workspaces.
  pub fn discover(workspace_root: &Path) -> Self {
    let candidate = workspace_root.join(DEFAULT_CONFIG_FILE);
    Self::from_path(&candidate).unwrap_or_default()
  }

  /// Read configuration from a specific JSON file.
  pub fn from_path(path: &Path) -> Option<Self> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
  }

  /// Borrow the configuration as a path layout.
  pub fn to_layout(&self) -> PwaLayout<'_> {
    PwaLayout {
      workspace_file: &self.workspace_file,
      manifest_file: &self.manifest_file,
      icons_dir: &self.icons_dir,
      index_html_file: &self.index_html_file,
      builders: &self.builders,
    }
  }

  /// Deploy URL without its trailing slash.
  pub fn deploy_url(&self) -> &str {
    self
      .deploy_url
      .strip_suffix('/')
      .unwrap_or(&self.deploy_url)
  }

  /// Icon source directory resolved against the workspace root.
  pub fn icons_path(&self, workspace_root: &Path) -> Option<PathBuf> {
    self
      .icons_path
      .as_ref()
      .map(|path| workspace_root.join(path))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn discover_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = PwaConfig::discover(dir.path());

    assert_eq!(config.theme_color, DEFAULT_THEME_COLOR);
    assert_eq!(config.deploy_url(), DEFAULT_DEPLOY_URL);
    assert_eq!(config.workspace_file, "angular.json");
    assert!(config.icons_path.is_none());
  }

  #[test]
  fn discover_ignores_unparsable_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();

    let config = PwaConfig::discover(dir.path());
    assert_eq!(config.manifest_file, "manifest.webmanifest");
  }

  #[test]
  fn reads_camel_case_fields_and_keeps_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r##"{"themeColor": "#ffffff", "iconsPath": "branding/icons", "requireIcons": true}"##,
    )
    .unwrap();

    let config = PwaConfig::discover(dir.path());
    assert_eq!(config.theme_color, "#ffffff");
    assert!(config.require_icons);
    assert_eq!(
      config.icons_path(dir.path()),
      Some(dir.path().join("branding/icons"))
    );
    assert_eq!(config.background_color, "#fafafa");
  }

  #[test]
  fn strips_one_trailing_slash_from_deploy_url() {
    let config = PwaConfig {
      deploy_url: "https://cdn.example.com/app/".into(),
      ..PwaConfig::default()
    };
    assert_eq!(config.deploy_url(), "https://cdn.example.com/app");
  }

  #[test]
  fn layout_borrows_configured_paths() {
    let config = PwaConfig::default();
    let layout = config.to_layout();
    assert_eq!(layout.icons_dir, "assets/icons");
    assert_eq!(layout.builders.len(), 2);
  }
}
