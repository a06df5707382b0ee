use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pwa_bundler::icons::{CANONICAL_SIZES, IconPlan};
use pwa_bundler::models::PwaReportSummary;
use pwa_bundler::{PwaBuildContext, PwaBuilder, PwaConfig};

/// Add installable-app icons, a web manifest and head links to an Angular project.
#[derive(Debug, Parser)]
#[command(name = "pwa-bundler", version, about)]
struct Cli {
  /// Directory containing the workspace descriptor.
  #[arg(long, default_value = ".")]
  workspace: PathBuf,
  /// Configuration file; defaults to `pwa.config.json` in the workspace.
  #[arg(long)]
  config: Option<PathBuf>,
  /// Project to transform.
  #[arg(long)]
  project: Option<String>,
  /// Application name written to the manifest.
  #[arg(long)]
  title: Option<String>,
  /// Short application name written to the manifest.
  #[arg(long)]
  short_name: Option<String>,
  /// Theme colour.
  #[arg(long)]
  theme_color: Option<String>,
  /// Splash screen background colour.
  #[arg(long)]
  background_color: Option<String>,
  /// URL prefix under which icons are served.
  #[arg(long)]
  deploy_url: Option<String>,
  /// Directory holding `icon-<n>x<n>.png` files, relative to the current directory.
  #[arg(long)]
  icons_path: Option<PathBuf>,
  /// Fail instead of using the default icons when `--icons-path` holds none.
  #[arg(long)]
  require_icons: bool,
  /// Print the icon plan without writing anything.
  #[arg(long)]
  dry_run: bool,
  /// Print a JSON summary after building.
  #[arg(long)]
  json: bool,
}

impl Cli {
  fn load_config(&self) -> Result<PwaConfig> {
    let mut config = match &self.config {
      Some(path) => PwaConfig::from_path(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?,
      None => PwaConfig::discover(&self.workspace),
    };

    if let Some(project) = &self.project {
      config.project = Some(project.clone());
    }
    if let Some(title) = &self.title {
      config.title = Some(title.clone());
    }
    if let Some(short_name) = &self.short_name {
      config.short_name = Some(short_name.clone());
    }
    if let Some(theme_color) = &self.theme_color {
      config.theme_color = theme_color.clone();
    }
    if let Some(background_color) = &self.background_color {
      config.background_color = background_color.clone();
    }
    if let Some(deploy_url) = &self.deploy_url {
      config.deploy_url = deploy_url.clone();
    }
    if let Some(icons_path) = &self.icons_path {
      // Command-line paths follow the shell, not the workspace.
      let cwd = std::env::current_dir().context("failed to read the current directory")?;
      config.icons_path = Some(cwd.join(icons_path));
    }
    config.require_icons |= self.require_icons;

    Ok(config)
  }
}

fn main() -> Result<()> {
  init_logging();

  let cli = Cli::parse();
  let config = cli.load_config()?;
  let builder = PwaBuilder::new(PwaBuildContext::new(&cli.workspace, &config));

  if cli.dry_run {
    print_plan(&builder.icon_plan());
    return Ok(());
  }

  let report = builder.build()?;
  if cli.json {
    let summary = PwaReportSummary::from(&report);
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    println!(
      "Added PWA assets to '{}' ({} icons{}, {} build target(s) updated)",
      report.project,
      report.icons.len(),
      if report.used_defaults { ", bundled defaults" } else { "" },
      report.patched_targets
    );
  }
  Ok(())
}

fn init_logging() {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .compact()
    .with_writer(std::io::stderr)
    .init();
}

fn print_plan(plan: &IconPlan) {
  match plan {
    IconPlan::Defaults => {
      println!("No user icons found; the bundled default set will be written.");
    }
    IconPlan::User(mapping) => {
      for size in CANONICAL_SIZES {
        if let Some(source) = mapping.source_for(size) {
          println!("{} <- {}", size.file_name(), source.file_name());
        }
      }
    }
  }
}
