//! Write the resolved icon set into the generated project tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use same_file::is_same_file;
use tracing::debug;

use super::defaults::default_icon;
use super::probe::SourceProber;
use super::resolver::{FallbackMapping, compute_fallback_mapping};
use super::sizes::{CANONICAL_SIZES, IconSize};

/// Where the bytes of an installed icon came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
  /// Copied from a user supplied bitmap.
  User(PathBuf),
  /// Written from the bundled default set.
  Bundled,
}

/// A single icon file written into the destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledIcon {
  /// Required size the file satisfies.
  pub size: IconSize,
  /// Origin of the file contents.
  pub source: IconSource,
  /// Destination path of the written file.
  pub path: PathBuf,
}

/// Outcome of probing the user icons: either a full mapping or the bundled defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconPlan {
  /// Every canonical size is backed by a user bitmap.
  User(FallbackMapping),
  /// No user bitmap was found; the default set is used in full.
  Defaults,
}

/// Probe the optional user icon location and decide how icons will be produced.
pub fn plan_icons<P: SourceProber>(prober: Option<&P>) -> IconPlan {
  let Some(prober) = prober else {
    return IconPlan::Defaults;
  };

  let mapping = compute_fallback_mapping(&CANONICAL_SIZES, |size| prober.exists_at(size));
  if mapping.is_empty() {
    IconPlan::Defaults
  } else {
    IconPlan::User(mapping)
  }
}

/// Copy each mapped source bitmap to every destination it backs.
///
/// One physical file is written per required size even when several sizes share a source.
pub fn materialize_mapping<P: SourceProber>(
  prober: &P,
  mapping: &FallbackMapping,
  destination_dir: &Path,
) -> Result<Vec<InstalledIcon>> {
  fs::create_dir_all(destination_dir)
    .with_context(|| format!("failed to create {}", destination_dir.display()))?;

  let mut installed = Vec::new();
  for (source_size, targets) in mapping.iter() {
    let source = prober.source_path(source_size);
    let bytes =
      fs::read(&source).with_context(|| format!("failed to read {}", source.display()))?;

    for &target in targets {
      let destination = destination_dir.join(target.file_name());
      install_icon(&source, &bytes, &destination)?;
      debug!(
        "copied {} to {}",
        source.display(),
        destination.display()
      );
      installed.push(InstalledIcon {
        size: target,
        source: IconSource::User(source.clone()),
        path: destination,
      });
    }
  }

  installed.sort_by(|a, b| b.size.cmp(&a.size));
  Ok(installed)
}

/// Write the complete bundled default set into `destination_dir`.
pub fn materialize_defaults(destination_dir: &Path) -> Result<Vec<InstalledIcon>> {
  fs::create_dir_all(destination_dir)
    .with_context(|| format!("failed to create {}", destination_dir.display()))?;

  CANONICAL_SIZES
    .iter()
    .map(|&size| -> Result<InstalledIcon> {
      let bytes =
        default_icon(size).ok_or_else(|| anyhow!("no bundled icon for {size}"))?;
      let destination = destination_dir.join(size.file_name());
      replace_file(&destination, bytes)?;
      debug!("wrote bundled {}", destination.display());
      Ok(InstalledIcon {
        size,
        source: IconSource::Bundled,
        path: destination,
      })
    })
    .collect()
}

fn install_icon(source: &Path, bytes: &[u8], destination: &Path) -> Result<()> {
  // Links are replaced by a real copy even when they resolve to the source.
  let is_link = destination
    .symlink_metadata()
    .is_ok_and(|metadata| metadata.file_type().is_symlink());
  if !is_link && destination.exists() && is_same_file(source, destination)? {
    return Ok(());
  }
  replace_file(destination, bytes)
}

fn replace_file(destination: &Path, bytes: &[u8]) -> Result<()> {
  if destination.symlink_metadata().is_ok() {
    fs::remove_file(destination)
      .with_context(|| format!("failed to remove {}", destination.display()))?;
  }
  fs::write(destination, bytes)
    .with_context(|| format!("failed to write {}", destination.display()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::icons::probe::DirectoryProber;
  use tempfile::tempdir;

  fn write_icons(dir: &Path, edges: &[u32]) {
    fs::create_dir_all(dir).unwrap();
    for &edge in edges {
      let size = IconSize::new(edge);
      fs::write(dir.join(size.file_name()), format!("bitmap-{edge}")).unwrap();
    }
  }

  #[test]
  fn plans_defaults_without_a_prober() {
    assert_eq!(plan_icons::<DirectoryProber>(None), IconPlan::Defaults);
  }

  #[test]
  fn plans_defaults_when_directory_is_empty() {
    let dir = tempdir().unwrap();
    let prober = DirectoryProber::new(dir.path());
    assert_eq!(plan_icons(Some(&prober)), IconPlan::Defaults);
  }

  #[test]
  fn duplicates_shared_sources_into_separate_files() {
    let dir = tempdir().unwrap();
    let source_dir = dir.path().join("source");
    let destination_dir = dir.path().join("out/assets/icons");
    write_icons(&source_dir, &[192, 152, 144, 128, 96, 72]);

    let prober = DirectoryProber::new(&source_dir);
    let IconPlan::User(mapping) = plan_icons(Some(&prober)) else {
      panic!("expected user icons to be found");
    };
    let installed = materialize_mapping(&prober, &mapping, &destination_dir).unwrap();

    assert_eq!(installed.len(), CANONICAL_SIZES.len());
    for edge in [512, 384, 192] {
      let path = destination_dir.join(IconSize::new(edge).file_name());
      assert_eq!(fs::read_to_string(&path).unwrap(), "bitmap-192");
      assert!(!fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
    }
    assert_eq!(
      fs::read_to_string(destination_dir.join("icon-72x72.png")).unwrap(),
      "bitmap-72"
    );
    assert!(!is_same_file(
      destination_dir.join("icon-512x512.png"),
      destination_dir.join("icon-384x384.png")
    )
    .unwrap());

    let sizes: Vec<u32> = installed.iter().map(|icon| icon.size.edge()).collect();
    assert_eq!(sizes, vec![512, 384, 192, 152, 144, 128, 96, 72]);
  }

  #[test]
  fn overwrites_stale_destination_files() {
    let dir = tempdir().unwrap();
    let source_dir = dir.path().join("source");
    let destination_dir = dir.path().join("icons");
    write_icons(&source_dir, &[512]);
    fs::create_dir_all(&destination_dir).unwrap();
    fs::write(destination_dir.join("icon-96x96.png"), "stale").unwrap();

    let prober = DirectoryProber::new(&source_dir);
    let IconPlan::User(mapping) = plan_icons(Some(&prober)) else {
      panic!("expected user icons to be found");
    };
    materialize_mapping(&prober, &mapping, &destination_dir).unwrap();

    assert_eq!(
      fs::read_to_string(destination_dir.join("icon-96x96.png")).unwrap(),
      "bitmap-512"
    );
  }

  #[test]
  fn leaves_sources_untouched_when_copying_in_place() {
    let dir = tempdir().unwrap();
    write_icons(dir.path(), &[384, 96]);

    let prober = DirectoryProber::new(dir.path());
    let IconPlan::User(mapping) = plan_icons(Some(&prober)) else {
      panic!("expected user icons to be found");
    };
    materialize_mapping(&prober, &mapping, dir.path()).unwrap();

    assert_eq!(
      fs::read_to_string(dir.path().join("icon-384x384.png")).unwrap(),
      "bitmap-384"
    );
    assert_eq!(
      fs::read_to_string(dir.path().join("icon-512x512.png")).unwrap(),
      "bitmap-384"
    );
    assert_eq!(
      fs::read_to_string(dir.path().join("icon-72x72.png")).unwrap(),
      "bitmap-96"
    );
  }

  #[cfg(unix)]
  #[test]
  fn replaces_destination_links_to_the_source() {
    let dir = tempdir().unwrap();
    let source_dir = dir.path().join("source");
    let destination_dir = dir.path().join("icons");
    write_icons(&source_dir, &[512]);
    fs::create_dir_all(&destination_dir).unwrap();
    let source = source_dir.join("icon-512x512.png");
    let linked = destination_dir.join("icon-512x512.png");
    std::os::unix::fs::symlink(&source, &linked).unwrap();

    let prober = DirectoryProber::new(&source_dir);
    let IconPlan::User(mapping) = plan_icons(Some(&prober)) else {
      panic!("expected user icons to be found");
    };
    materialize_mapping(&prober, &mapping, &destination_dir).unwrap();

    assert!(!fs::symlink_metadata(&linked).unwrap().file_type().is_symlink());
    assert_eq!(fs::read_to_string(&linked).unwrap(), "bitmap-512");
    assert_eq!(fs::read_to_string(&source).unwrap(), "bitmap-512");
    assert!(!is_same_file(&source, &linked).unwrap());
  }

  #[test]
  fn writes_the_full_default_set() {
    let dir = tempdir().unwrap();
    let installed = materialize_defaults(dir.path()).unwrap();

    assert_eq!(installed.len(), CANONICAL_SIZES.len());
    for icon in installed {
      assert_eq!(icon.source, IconSource::Bundled);
      assert_eq!(
        fs::read(&icon.path).unwrap(),
        default_icon(icon.size).unwrap()
      );
    }
  }
}
