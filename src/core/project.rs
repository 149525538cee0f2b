//! Abstract project model - the generator's input.
//!
//! An [`AbstractProject`] is what the upstream Xcode reader hands over: a
//! root directory and its targets. Targets refer to their dependencies by
//! [`TargetId`], so the graph may contain cycles without any ownership
//! trouble.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::product_type::ProductType;
use crate::util::diagnostic::{suggestions, Diagnostic, DuplicateTargetError};

/// Index of a target within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

/// A source file of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute, or relative to the project root
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SourceFile { path: path.into() }
    }
}

/// One target of the project.
#[derive(Debug, Clone)]
pub struct AbstractTarget {
    /// Unique within the project; becomes the Bazel rule name
    pub name: String,

    /// Target root directory, absolute or relative to the project root
    pub path: PathBuf,

    pub product_type: ProductType,

    pub source_files: Vec<SourceFile>,

    pub dependencies: Vec<TargetId>,

    /// Absolute, or relative to the project root
    pub info_plist_path: PathBuf,
}

impl AbstractTarget {
    /// Create a target with no sources or dependencies.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        product_type: ProductType,
        info_plist_path: impl Into<PathBuf>,
    ) -> Self {
        AbstractTarget {
            name: name.into(),
            path: path.into(),
            product_type,
            source_files: Vec::new(),
            dependencies: Vec::new(),
            info_plist_path: info_plist_path.into(),
        }
    }

    /// Add source files.
    pub fn with_sources(mut self, paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.source_files
            .extend(paths.into_iter().map(|p| SourceFile::new(p)));
        self
    }

    /// Add dependencies.
    pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = TargetId>) -> Self {
        self.dependencies.extend(ids);
        self
    }
}

/// Error building a project model.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("project root must be absolute: {}", .0.display())]
    RelativeRoot(PathBuf),

    #[error(transparent)]
    DuplicateTarget(#[from] DuplicateTargetError),

    #[error("target `{target}` depends on target #{index}, but the project has {count} targets")]
    DanglingDependency {
        target: String,
        index: usize,
        count: usize,
    },
}

impl ProjectError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            ProjectError::RelativeRoot(_) => {
                diag.with_suggestion("Set `root` to an absolute path or omit it")
            }
            ProjectError::DuplicateTarget(_) => {
                diag.with_suggestion("Rename one of the targets")
            }
            ProjectError::DanglingDependency { .. } => {
                diag.with_suggestion(suggestions::UNKNOWN_DEPENDENCY)
            }
        }
    }
}

/// A project: an absolute root directory and its ordered targets.
#[derive(Debug, Clone)]
pub struct AbstractProject {
    root: PathBuf,
    targets: Vec<AbstractTarget>,
}

impl AbstractProject {
    /// Create a project, checking that names are unique and every
    /// dependency refers to a target of this project.
    pub fn new(root: impl Into<PathBuf>, targets: Vec<AbstractTarget>) -> Result<Self, ProjectError> {
        let root: PathBuf = root.into().components().collect();
        if !root.is_absolute() {
            return Err(ProjectError::RelativeRoot(root));
        }

        let mut names = HashSet::new();
        for target in &targets {
            if !names.insert(target.name.as_str()) {
                return Err(DuplicateTargetError {
                    name: target.name.clone(),
                }
                .into());
            }
            if let Some(bad) = target.dependencies.iter().find(|id| id.0 >= targets.len()) {
                return Err(ProjectError::DanglingDependency {
                    target: target.name.clone(),
                    index: bad.0,
                    count: targets.len(),
                });
            }
        }

        Ok(AbstractProject { root, targets })
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Targets in project order.
    pub fn targets(&self) -> &[AbstractTarget] {
        &self.targets
    }

    pub fn target(&self, id: TargetId) -> &AbstractTarget {
        &self.targets[id.0]
    }

    /// Look up a target by name.
    pub fn find(&self, name: &str) -> Option<&AbstractTarget> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Direct dependencies of `target`, in declaration order.
    pub fn dependencies_of<'a>(
        &'a self,
        target: &'a AbstractTarget,
    ) -> impl Iterator<Item = &'a AbstractTarget> + 'a {
        target.dependencies.iter().map(move |id| self.target(*id))
    }
}
