//! Reading and patching the `angular.json` workspace descriptor.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while loading or updating the workspace descriptor.
#[derive(Debug, Error)]
pub enum WorkspaceError {
  /// Failed to read or write the descriptor.
  #[error("failed to access {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// The descriptor is not valid JSON.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// The descriptor has no usable `projects` object.
  #[error("{} does not declare any projects", .path.display())]
  MissingProjects {
    /// Path of the descriptor.
    path: PathBuf,
  },
  /// No project was requested and no default could be inferred.
  #[error("No project found")]
  NoDefaultProject,
  /// The requested project is not declared.
  #[error("No project found named '{name}'")]
  ProjectNotFound {
    /// Requested project name.
    name: String,
  },
}

/// A project entry resolved from the workspace descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceProject {
  /// Key of the project in the `projects` table.
  pub name: String,
  /// Project root relative to the workspace.
  pub root: String,
  /// Source root relative to the workspace, `<root>/src` when not declared.
  pub source_root: String,
}

impl WorkspaceProject {
  /// Join a relative path onto the source root using forward slashes.
  pub fn source_path(&self, relative: &str) -> String {
    join_posix(&self.source_root, relative)
  }
}

/// In-memory workspace descriptor that preserves fields it does not understand.
#[derive(Debug, Clone)]
pub struct AngularWorkspace {
  path: PathBuf,
  document: Value,
}

impl AngularWorkspace {
  /// Load and parse the descriptor at `path`.
  pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
    let content = fs::read_to_string(path).map_err(|source| WorkspaceError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    let document: Value =
      serde_json::from_str(&content).map_err(|source| WorkspaceError::Parse {
        path: path.to_path_buf(),
        source,
      })?;

    if !document.get("projects").is_some_and(Value::is_object) {
      return Err(WorkspaceError::MissingProjects {
        path: path.to_path_buf(),
      });
    }

    Ok(Self {
      path: path.to_path_buf(),
      document,
    })
  }

  /// Location the descriptor was loaded from.
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Underlying JSON document.
  pub fn document(&self) -> &Value {
    &self.document
  }

  /// Value of the top-level `defaultProject` field.
  pub fn default_project(&self) -> Option<&str> {
    self.document.get("defaultProject").and_then(Value::as_str)
  }

  /// Names of all declared projects in file order.
  pub fn project_names(&self) -> Vec<&str> {
    self
      .projects()
      .map(|projects| projects.keys().map(String::as_str).collect())
      .unwrap_or_default()
  }

  /// Resolve the project to transform.
  ///
  /// An explicit name wins, then `defaultProject`, then the only project when exactly one
  /// is declared.
  pub fn resolve_project(
    &self,
    requested: Option<&str>,
  ) -> Result<WorkspaceProject, WorkspaceError> {
    let name = match requested.or_else(|| self.default_project()) {
      Some(name) => name.to_string(),
      None => match self.project_names().as_slice() {
        [only] => only.to_string(),
        _ => return Err(WorkspaceError::NoDefaultProject),
      },
    };

    let project = self
      .projects()
      .and_then(|projects| projects.get(&name))
      .and_then(Value::as_object)
      .ok_or_else(|| WorkspaceError::ProjectNotFound { name: name.clone() })?;

    let root = project
      .get("root")
      .and_then(Value::as_str)
      .unwrap_or_default()
      .to_string();
    let source_root = project
      .get("sourceRoot")
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or_else(|| join_posix(&root, "src"));

    Ok(WorkspaceProject {
      name,
      root,
      source_root,
    })
  }

  /// Add `entry` to the assets of the project's build targets.
  ///
  /// A target is patched when it is named `build` or uses one of `builders`. Missing
  /// `options`/`assets` are created and an entry that is already listed is not repeated.
  /// Returns the number of targets that changed.
  pub fn register_asset(&mut self, project: &str, entry: &str, builders: &[String]) -> usize {
    let Some(targets) = self.targets_mut(project) else {
      return 0;
    };

    let mut patched = 0;
    for (name, target) in targets.iter_mut() {
      let Some(target) = target.as_object_mut() else {
        continue;
      };
      let builder = target.get("builder").and_then(Value::as_str).unwrap_or_default();
      if name != "build" && !builders.iter().any(|candidate| candidate == builder) {
        continue;
      }

      let options = target
        .entry("options")
        .or_insert_with(|| Value::Object(Map::new()));
      if !options.is_object() {
        *options = Value::Object(Map::new());
      }
      let Some(options) = options.as_object_mut() else {
        continue;
      };

      match options.get_mut("assets") {
        Some(Value::Array(assets)) => {
          if assets.iter().any(|asset| asset.as_str() == Some(entry)) {
            continue;
          }
          assets.push(Value::String(entry.to_string()));
        }
        _ => {
          options.insert(
            "assets".into(),
            Value::Array(vec![Value::String(entry.to_string())]),
          );
        }
      }
      patched += 1;
    }

    patched
  }

  /// Write the descriptor back to where it was loaded from.
  pub fn save(&self) -> Result<(), WorkspaceError> {
    let mut text = serde_json::to_string_pretty(&self.document).map_err(|source| {
      WorkspaceError::Parse {
        path: self.path.clone(),
        source,
      }
    })?;
    text.push('\n');
    fs::write(&self.path, text).map_err(|source| WorkspaceError::Io {
      path: self.path.clone(),
      source,
    })
  }

  fn projects(&self) -> Option<&Map<String, Value>> {
    self.document.get("projects").and_then(Value::as_object)
  }

  fn targets_mut(&mut self, project: &str) -> Option<&mut Map<String, Value>> {
    let project = self
      .document
      .get_mut("projects")?
      .get_mut(project)?
      .as_object_mut()?;
    let key = if project.contains_key("architect") {
      "architect"
    } else {
      "targets"
    };
    project.get_mut(key)?.as_object_mut()
  }
}

fn join_posix(base: &str, relative: &str) -> String {
  let base = base.trim_end_matches('/');
  let relative = relative.trim_start_matches('/');
  if base.is_empty() {
    relative.to_string()
  } else {
    format!("{base}/{relative}")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;
  use tempfile::tempdir;

  fn write_workspace(dir: &Path, document: Value) -> PathBuf {
    let path = dir.join("angular.json");
    fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
    path
  }

  fn sample() -> Value {
    json!({
      "version": 1,
      "newProjectRoot": "projects",
      "projects": {
        "bar": {
          "root": "projects/bar",
          "sourceRoot": "projects/bar/src",
          "architect": {
            "build": {
              "builder": "@angular-devkit/build-angular:browser",
              "options": { "assets": ["projects/bar/src/favicon.ico"] }
            },
            "custom": {
              "builder": "@angular-builders/custom-webpack:browser"
            },
            "test": {
              "builder": "@angular-devkit/build-angular:karma",
              "options": {}
            }
          }
        }
      }
    })
  }

  #[test]
  fn resolves_the_only_project_without_a_default() {
    let dir = tempdir().unwrap();
    let workspace = AngularWorkspace::load(&write_workspace(dir.path(), sample())).unwrap();

    let project = workspace.resolve_project(None).unwrap();
    assert_eq!(project.name, "bar");
    assert_eq!(project.source_root, "projects/bar/src");
    assert_eq!(
      project.source_path("manifest.webmanifest"),
      "projects/bar/src/manifest.webmanifest"
    );
  }

  #[test]
  fn derives_source_root_from_project_root() {
    let dir = tempdir().unwrap();
    let path = write_workspace(
      dir.path(),
      json!({ "defaultProject": "app", "projects": { "app": { "root": "" }, "lib": {} } }),
    );
    let workspace = AngularWorkspace::load(&path).unwrap();

    let project = workspace.resolve_project(None).unwrap();
    assert_eq!(project.name, "app");
    assert_eq!(project.source_root, "src");
  }

  #[test]
  fn reports_missing_projects() {
    let dir = tempdir().unwrap();
    let path = write_workspace(dir.path(), json!({ "projects": { "a": {}, "b": {} } }));
    let workspace = AngularWorkspace::load(&path).unwrap();

    let err = workspace.resolve_project(None).unwrap_err();
    assert!(matches!(err, WorkspaceError::NoDefaultProject));
    assert_eq!(err.to_string(), "No project found");

    let err = workspace.resolve_project(Some("zzz")).unwrap_err();
    assert_eq!(err.to_string(), "No project found named 'zzz'");
  }

  #[test]
  fn rejects_descriptors_without_projects() {
    let dir = tempdir().unwrap();
    let path = write_workspace(dir.path(), json!({ "version": 1 }));
    assert!(matches!(
      AngularWorkspace::load(&path),
      Err(WorkspaceError::MissingProjects { .. })
    ));

    let missing = dir.path().join("absent.json");
    assert!(matches!(
      AngularWorkspace::load(&missing),
      Err(WorkspaceError::Io { .. })
    ));
  }

  #[test]
  fn registers_manifest_on_build_targets_once() {
    let dir = tempdir().unwrap();
    let path = write_workspace(dir.path(), sample());
    let mut workspace = AngularWorkspace::load(&path).unwrap();
    let builders = vec!["@angular-builders/custom-webpack:browser".to_string()];
    let entry = "projects/bar/src/manifest.webmanifest";

    assert_eq!(workspace.register_asset("bar", entry, &builders), 2);
    assert_eq!(workspace.register_asset("bar", entry, &builders), 0);
    workspace.save().unwrap();

    let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let architect = &saved["projects"]["bar"]["architect"];
    assert_eq!(
      architect["build"]["options"]["assets"],
      json!(["projects/bar/src/favicon.ico", entry])
    );
    assert_eq!(architect["custom"]["options"]["assets"], json!([entry]));
    assert!(architect["test"]["options"].get("assets").is_none());
    assert_eq!(saved["newProjectRoot"], "projects");
  }

  #[test]
  fn patches_build_target_with_unknown_builder() {
    let dir = tempdir().unwrap();
    let mut document = sample();
    document["projects"]["bar"]["architect"]["build"]["builder"] =
      json!("@test-builders/custom-builder:browser");
    let mut workspace = AngularWorkspace::load(&write_workspace(dir.path(), document)).unwrap();

    assert_eq!(workspace.register_asset("bar", "x.webmanifest", &[]), 1);
    assert_eq!(
      workspace.document()["projects"]["bar"]["architect"]["build"]["options"]["assets"][1],
      "x.webmanifest"
    );
  }

  #[test]
  fn replaces_non_array_assets() {
    let dir = tempdir().unwrap();
    let mut document = sample();
    document["projects"]["bar"]["architect"]["build"]["options"]["assets"] = json!("broken");
    let mut workspace = AngularWorkspace::load(&write_workspace(dir.path(), document)).unwrap();

    assert_eq!(workspace.register_asset("bar", "m.webmanifest", &[]), 1);
    assert_eq!(
      workspace.document()["projects"]["bar"]["architect"]["build"]["options"]["assets"],
      json!(["m.webmanifest"])
    );
  }
}
