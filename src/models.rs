//! Data structures produced while turning a project into a PWA.

use std::path::PathBuf;

use serde::Serialize;

use crate::icons::InstalledIcon;

/// Branding values substituted into the manifest and `index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
  /// Application name.
  pub name: String,
  /// Short application name shown on home screens.
  pub short_name: String,
  /// Theme colour.
  pub theme_color: String,
  /// Splash screen background colour.
  pub background_color: String,
  /// URL prefix for icon sources, without trailing slash.
  pub deploy_url: String,
}

/// Summary of a completed PWA build.
#[derive(Debug, Clone)]
pub struct PwaReport {
  /// Name of the transformed project.
  pub project: String,
  /// Project source root relative to the workspace.
  pub source_root: String,
  /// Icons written into the project, largest first.
  pub icons: Vec<InstalledIcon>,
  /// Whether the bundled default icons were used.
  pub used_defaults: bool,
  /// Path of the written manifest.
  pub manifest_path: PathBuf,
  /// Number of workspace targets that gained the manifest asset.
  pub patched_targets: usize,
  /// Whether `index.html` was changed.
  pub index_patched: bool,
}

/// Serializable summary printed by the CLI with `--json`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PwaReportSummary {
  /// Name of the transformed project.
  pub project: String,
  /// Path of the written manifest.
  pub manifest: String,
  /// Whether the bundled default icons were used.
  pub used_defaults: bool,
  /// Icon files keyed by size with the source they were copied from.
  pub icons: Vec<IconSummary>,
  /// Number of workspace targets that gained the manifest asset.
  pub patched_targets: usize,
  /// Whether `index.html` was changed.
  pub index_patched: bool,
}

/// One written icon in a [`PwaReportSummary`].
#[derive(Debug, Clone, Serialize)]
pub struct IconSummary {
  /// Edge length in pixels.
  pub size: u32,
  /// Written file.
  pub path: String,
  /// Source file, absent for bundled icons.
  pub source: Option<String>,
}

impl From<&PwaReport> for PwaReportSummary {
  fn from(report: &PwaReport) -> Self {
    use crate::icons::IconSource;

    Self {
      project: report.project.clone(),
      manifest: report.manifest_path.display().to_string(),
      used_defaults: report.used_defaults,
      icons: report
        .icons
        .iter()
        .map(|icon| IconSummary {
          size: icon.size.edge(),
          path: icon.path.display().to_string(),
          source: match &icon.source {
            IconSource::User(path) => Some(path.display().to_string()),
            IconSource::Bundled => None,
          },
        })
        .collect(),
      patched_targets: report.patched_targets,
      index_patched: report.index_patched,
    }
  }
}
