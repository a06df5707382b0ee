//! Web app manifest generation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::icons::{CANONICAL_SIZES, IconSize};
use crate::models::Branding;
use crate::project::PwaLayout;

/// Serialized `manifest.webmanifest` document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WebManifest {
  /// Application name.
  pub name: String,
  /// Short application name.
  pub short_name: String,
  /// Theme colour.
  pub theme_color: String,
  /// Splash screen background colour.
  pub background_color: String,
  /// Preferred display mode.
  pub display: String,
  /// Navigation scope.
  pub scope: String,
  /// URL loaded when the app is launched.
  pub start_url: String,
  /// Declared icons, largest first.
  pub icons: Vec<ManifestIcon>,
}

/// Icon entry in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManifestIcon {
  /// Icon URL.
  pub src: String,
  /// `<n>x<n>` size attribute.
  pub sizes: String,
  /// MIME type.
  #[serde(rename = "type")]
  pub mime_type: String,
  /// Purpose hint.
  pub purpose: String,
}

/// Build the manifest document for `branding`, declaring every canonical icon size.
pub fn render_manifest(branding: &Branding, layout: &PwaLayout) -> WebManifest {
  WebManifest {
    name: branding.name.clone(),
    short_name: branding.short_name.clone(),
    theme_color: branding.theme_color.clone(),
    background_color: branding.background_color.clone(),
    display: "standalone".into(),
    scope: "./".into(),
    start_url: "./".into(),
    icons: CANONICAL_SIZES
      .iter()
      .map(|&size| manifest_icon(branding, layout, size))
      .collect(),
  }
}

fn manifest_icon(branding: &Branding, layout: &PwaLayout, size: IconSize) -> ManifestIcon {
  let href = layout.icon_href(&size.file_name());
  let src = if branding.deploy_url.is_empty() {
    href
  } else {
    format!("{}/{}", branding.deploy_url, href)
  };

  ManifestIcon {
    src,
    sizes: size.dimensions(),
    mime_type: "image/png".into(),
    purpose: "maskable any".into(),
  }
}

/// Serialise `manifest` as pretty JSON to `path`, replacing any existing file.
pub fn write_manifest(path: &Path, manifest: &WebManifest) -> Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let mut json =
    serde_json::to_string_pretty(manifest).context("failed to serialise web manifest")?;
  json.push('\n');
  fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}
