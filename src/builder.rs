//! PWA build orchestrator: icons, manifest, workspace registration and `index.html` links.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use thiserror::Error;
use tracing::{info, warn};

use crate::icons::{
  DirectoryProber, IconPlan, SourceProber, materialize_defaults, materialize_mapping, plan_icons,
};
use crate::manifest::{render_manifest, write_manifest};
use crate::models::{Branding, PwaReport};
use crate::project::PwaBuildContext;
use crate::site::patch_head;
use crate::workspace::{AngularWorkspace, WorkspaceProject};

/// Generic build result type used across the crate.
pub type BuildResult<T> = anyhow::Result<T>;

/// Conditions that stop a build before anything is written.
#[derive(Debug, Error)]
pub enum BuildError {
  /// An icon directory was given, it held no usable icons and defaults were refused.
  #[error("no icons found in {}", .path.display())]
  NoSourceIcons {
    /// Directory that was probed.
    path: PathBuf,
  },
}

/// High-level helper that adds installable-app assets to a workspace project.
pub struct PwaBuilder<'a> {
  context: PwaBuildContext<'a>,
}

impl<'a> PwaBuilder<'a> {
  /// Create a builder for the provided build context.
  pub fn new(context: PwaBuildContext<'a>) -> Self {
    Self { context }
  }

  /// Probe the configured icon directory and decide where every icon size comes from.
  pub fn icon_plan(&self) -> IconPlan {
    let prober = self.prober();
    plan_icons(prober.as_ref())
  }

  /// Run the full transformation and report what was written.
  ///
  /// Every input is loaded and validated before the first file is touched.
  pub fn build(&self) -> BuildResult<PwaReport> {
    let config = self.context.config;
    let layout = self.context.layout;

    let mut workspace = AngularWorkspace::load(&self.context.workspace_path())?;
    let project = workspace.resolve_project(config.project.as_deref())?;
    info!("adding PWA assets to project '{}'", project.name);

    let prober = self.prober();
    let plan = plan_icons(prober.as_ref());
    if let (Some(prober), IconPlan::Defaults) = (&prober, &plan) {
      if config.require_icons {
        return Err(BuildError::NoSourceIcons {
          path: prober.base().to_path_buf(),
        }
        .into());
      }
      warn!(
        "No external icons found in {}. Using default icons.",
        prober.base().display()
      );
    }

    let source_root = self.context.workspace_root.join(&project.source_root);
    let index_path = source_root.join(layout.index_html_file);
    let branding = self.branding(&project);
    let patched_index = if index_path.is_file() {
      let html = fs::read_to_string(&index_path)
        .with_context(|| format!("failed to read {}", index_path.display()))?;
      patch_head(&html, &layout, &branding.theme_color)
        .with_context(|| format!("failed to patch {}", index_path.display()))?
    } else {
      warn!("{} not found, skipping head links", index_path.display());
      None
    };

    let manifest_path = source_root.join(layout.manifest_file);
    let manifest = render_manifest(&branding, &layout);
    let asset_entry = project.source_path(layout.manifest_file);
    let patched_targets = workspace.register_asset(&project.name, &asset_entry, layout.builders);
    if patched_targets == 0 {
      warn!(
        "no build target of '{}' received {}",
        project.name, asset_entry
      );
    }

    let icons_dir = source_root.join(layout.icons_dir());
    let (icons, used_defaults) = match (&plan, &prober) {
      (IconPlan::User(mapping), Some(prober)) => {
        for (source, targets) in mapping.iter() {
          let sizes: Vec<String> = targets.iter().map(|size| size.dimensions()).collect();
          info!(
            "{} backs {}",
            prober.source_path(source).display(),
            sizes.join(", ")
          );
        }
        (materialize_mapping(prober, mapping, &icons_dir)?, false)
      }
      _ => {
        info!("writing bundled default icons to {}", icons_dir.display());
        (materialize_defaults(&icons_dir)?, true)
      }
    };

    write_manifest(&manifest_path, &manifest)?;
    info!("wrote {}", manifest_path.display());
    workspace.save()?;

    let index_patched = match patched_index {
      Some(html) => {
        fs::write(&index_path, html)
          .with_context(|| format!("failed to write {}", index_path.display()))?;
        info!("linked manifest from {}", index_path.display());
        true
      }
      None => false,
    };

    Ok(PwaReport {
      project: project.name,
      source_root: project.source_root,
      icons,
      used_defaults,
      manifest_path,
      patched_targets,
      index_patched,
    })
  }

  fn prober(&self) -> Option<DirectoryProber> {
    self
      .context
      .config
      .icons_path(self.context.workspace_root)
      .map(DirectoryProber::new)
  }

  fn branding(&self, project: &WorkspaceProject) -> Branding {
    let config = self.context.config;
    let name = config.title.clone().unwrap_or_else(|| project.name.clone());
    let short_name = config.short_name.clone().unwrap_or_else(|| name.clone());

    Branding {
      name,
      short_name,
      theme_color: config.theme_color.clone(),
      background_color: config.background_color.clone(),
      deploy_url: config.deploy_url().to_string(),
    }
  }
}
