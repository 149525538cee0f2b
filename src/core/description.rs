//! Project description files.
//!
//! The Xcode project itself is read upstream; Bazelify consumes the
//! resulting abstract model serialized as TOML or JSON:
//!
//! ```toml
//! root = "/path/to/project"    # optional, defaults to this file's directory
//!
//! [[target]]
//! name = "Foo"
//! path = "Libs/Foo"
//! product_type = "framework"
//! sources = ["Libs/Foo/Foo.swift"]
//! dependencies = ["Bar"]
//! info_plist = "Libs/Foo/Info.plist"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use miette::{NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::core::product_type::ProductType;
use crate::core::project::{AbstractProject, AbstractTarget, TargetId};
use crate::util::diagnostic::{DuplicateTargetError, UnknownDependencyError};
use crate::util::fs::{normalize_path, read_to_string};

/// Default description file name.
pub const DESCRIPTION_NAME: &str = "Project.toml";

/// JSON alternative to [`DESCRIPTION_NAME`].
pub const DESCRIPTION_JSON_NAME: &str = "Project.json";

/// Serialized form of an [`AbstractProject`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDescription {
    /// Project root; relative roots resolve against the description's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(default, rename = "target", alias = "targets")]
    pub targets: Vec<TargetDescription>,
}

/// Serialized form of an [`AbstractTarget`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDescription {
    pub name: String,

    pub path: PathBuf,

    pub product_type: ProductType,

    #[serde(default)]
    pub sources: Vec<PathBuf>,

    /// Names of other targets in the same description
    #[serde(default)]
    pub dependencies: Vec<String>,

    pub info_plist: PathBuf,
}

/// Input format of a description file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionFormat {
    Toml,
    Json,
}

impl DescriptionFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Some(DescriptionFormat::Toml),
            Some("json") => Some(DescriptionFormat::Json),
            _ => None,
        }
    }
}

impl ProjectDescription {
    /// Parse description text.
    pub fn parse(content: &str, format: DescriptionFormat) -> Result<Self> {
        match format {
            DescriptionFormat::Toml => {
                toml::from_str(content).context("failed to parse project description as TOML")
            }
            DescriptionFormat::Json => {
                serde_json::from_str(content).context("failed to parse project description as JSON")
            }
        }
    }

    /// Resolve names into a project model rooted at `root`.
    ///
    /// `source` names the text the description came from and is used to
    /// point diagnostics at the offending dependency.
    pub fn into_project(self, root: PathBuf, source: Option<(&Path, &str)>) -> Result<AbstractProject> {
        let mut ids: HashMap<&str, TargetId> = HashMap::new();
        for (index, target) in self.targets.iter().enumerate() {
            if ids.insert(target.name.as_str(), TargetId(index)).is_some() {
                return Err(DuplicateTargetError {
                    name: target.name.clone(),
                }
                .into());
            }
        }

        let mut targets = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            let mut dependencies = Vec::with_capacity(target.dependencies.len());
            for dependency in &target.dependencies {
                let Some(id) = ids.get(dependency.as_str()) else {
                    return Err(unknown_dependency(&target.name, dependency, source).into());
                };
                dependencies.push(*id);
            }

            targets.push(
                AbstractTarget::new(
                    target.name.clone(),
                    target.path.clone(),
                    target.product_type,
                    target.info_plist.clone(),
                )
                .with_sources(target.sources.iter().cloned())
                .with_dependencies(dependencies),
            );
        }

        Ok(AbstractProject::new(root, targets)?)
    }
}

fn unknown_dependency(
    target: &str,
    dependency: &str,
    source: Option<(&Path, &str)>,
) -> UnknownDependencyError {
    let (src, span) = match source {
        Some((path, content)) => {
            let quoted = format!("\"{dependency}\"");
            let span = content
                .find(&quoted)
                .map(|offset| SourceSpan::from((offset, quoted.len())));
            (
                Some(NamedSource::new(path.display().to_string(), content.to_string())),
                span,
            )
        }
        None => (None, None),
    };

    UnknownDependencyError {
        target: target.to_string(),
        dependency: dependency.to_string(),
        src,
        span,
    }
}

/// Load a project from a description file.
pub fn load_project(path: &Path) -> Result<AbstractProject> {
    let Some(format) = DescriptionFormat::from_path(path) else {
        bail!(
            "unsupported project description `{}`: expected a .toml or .json file",
            path.display()
        );
    };

    let content = read_to_string(path)?;
    let description = ProjectDescription::parse(&content, format)
        .with_context(|| format!("invalid project description: {}", path.display()))?;

    let base = normalize_path(path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new(".")));
    let root = match &description.root {
        Some(root) if root.is_absolute() => root.clone(),
        Some(root) => normalize_path(&base.join(root)),
        None => base,
    };

    tracing::debug!(
        "loaded {} targets from {}",
        description.targets.len(),
        path.display()
    );

    description.into_project(root, Some((path, &content)))
}

/// Find a description file in `dir`, preferring TOML over JSON.
pub fn find_description(dir: &Path) -> Option<PathBuf> {
    [DESCRIPTION_NAME, DESCRIPTION_JSON_NAME]
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DESCRIPTION: &str = r#"
[[target]]
name = "Bar"
path = "Libs/Bar"
product_type = "framework"
sources = ["Libs/Bar/Bar.swift"]
info_plist = "Libs/Bar/Info.plist"

[[target]]
name = "Foo"
path = "Libs/Foo"
product_type = "com.apple.product-type.framework"
sources = ["Libs/Foo/Foo.swift", "Libs/Foo/Helpers.swift"]
dependencies = ["Bar"]
info_plist = "Libs/Foo/Info.plist"
"#;

    #[test]
    fn test_load_toml_description() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Project.toml");
        std::fs::write(&path, DESCRIPTION).unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.root(), tmp.path().canonicalize().unwrap());
        assert_eq!(project.targets().len(), 2);

        let foo = project.find("Foo").unwrap();
        assert_eq!(foo.product_type, ProductType::Framework);
        assert_eq!(foo.source_files.len(), 2);
        let deps: Vec<_> = project.dependencies_of(foo).map(|t| t.name.clone()).collect();
        assert_eq!(deps, vec!["Bar".to_string()]);
    }

    #[test]
    fn test_load_json_description() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Project.json");
        std::fs::write(
            &path,
            r#"{
  "root": "/abs/root",
  "targets": [
    {
      "name": "App",
      "path": "App",
      "product_type": "application",
      "sources": ["App/main.swift"],
      "info_plist": "App/Info.plist"
    }
  ]
}"#,
        )
        .unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.root(), Path::new("/abs/root"));
        assert_eq!(project.targets()[0].product_type, ProductType::Application);
    }

    #[test]
    fn test_relative_root_resolves_against_description_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("ios")).unwrap();
        let path = tmp.path().join("Project.toml");
        std::fs::write(&path, "root = \"ios\"\n").unwrap();

        let project = load_project(&path).unwrap();
        assert_eq!(project.root(), tmp.path().join("ios").canonicalize().unwrap());
        assert!(project.targets().is_empty());
    }

    #[test]
    fn test_unknown_dependency() {
        let content = DESCRIPTION.replace("dependencies = [\"Bar\"]", "dependencies = [\"Baz\"]");
        let description = ProjectDescription::parse(&content, DescriptionFormat::Toml).unwrap();

        let err = description
            .into_project(PathBuf::from("/proj"), Some((Path::new("Project.toml"), &content)))
            .unwrap_err();
        let err = err.downcast_ref::<UnknownDependencyError>().unwrap();
        assert_eq!(err.dependency, "Baz");
        assert!(err.span.is_some());
    }

    #[test]
    fn test_duplicate_target() {
        let content = DESCRIPTION.replace("name = \"Foo\"", "name = \"Bar\"");
        let description = ProjectDescription::parse(&content, DescriptionFormat::Toml).unwrap();

        let err = description.into_project(PathBuf::from("/proj"), None).unwrap_err();
        assert!(err.to_string().contains("duplicate target name `Bar`"));
    }

    #[test]
    fn test_unknown_product_type_is_parse_error() {
        let content = DESCRIPTION.replace("product_type = \"framework\"", "product_type = \"toaster\"");
        assert!(ProjectDescription::parse(&content, DescriptionFormat::Toml).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_project(Path::new("project.yaml")).unwrap_err();
        assert!(err.to_string().contains("expected a .toml or .json file"));
    }

    #[test]
    fn test_find_description_prefers_toml() {
        let tmp = TempDir::new().unwrap();
        assert!(find_description(tmp.path()).is_none());

        std::fs::write(tmp.path().join("Project.json"), "{}").unwrap();
        assert_eq!(find_description(tmp.path()), Some(tmp.path().join("Project.json")));

        std::fs::write(tmp.path().join("Project.toml"), "").unwrap();
        assert_eq!(find_description(tmp.path()), Some(tmp.path().join("Project.toml")));
    }
}
