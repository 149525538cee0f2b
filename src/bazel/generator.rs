//! Whole-project generation.
//!
//! Generation runs in two phases. [`GenerationPlan::new`] translates every
//! target and folds the results into the set of referenced rule sets and
//! the operations grouped by destination file; nothing touches the disk.
//! [`GenerationPlan::write`] then writes the workspace manifest followed by
//! one build file per destination.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::bazel::operation::CreateBuildFileOperation;
use crate::bazel::rule_set::{workspace_manifest, BazelRuleSet};
use crate::bazel::target::{TargetTranslator, TranslateError};
use crate::core::AbstractProject;
use crate::util::config::GeneratorConfig;
use crate::util::fs::overwrite_file;

/// Everything a generation run will write.
#[derive(Debug, Clone, Default)]
pub struct GenerationPlan {
    /// Workspace manifest destination
    pub workspace_path: PathBuf,

    /// Every rule set referenced by any generated rule
    pub rule_sets: BTreeSet<BazelRuleSet>,

    /// Operations grouped by build file, each group in arrival order
    pub operations: BTreeMap<PathBuf, Vec<CreateBuildFileOperation>>,

    /// Targets that were skipped, in project order
    pub failures: Vec<TranslateError>,
}

impl GenerationPlan {
    /// Translate every target of `project`.
    ///
    /// A target that cannot be translated is logged and recorded in
    /// `failures`; the remaining targets are still planned.
    pub fn new(project: &AbstractProject, config: &GeneratorConfig) -> Self {
        let translator = TargetTranslator::new(project, config);
        let mut plan = GenerationPlan {
            workspace_path: project.root().join(&config.workspace_file_name),
            ..GenerationPlan::default()
        };

        for target in project.targets() {
            match translator.translate(target) {
                Ok(operations) => {
                    tracing::debug!(
                        "translated target `{}` into {} operations",
                        target.name,
                        operations.len()
                    );
                    plan.extend(operations);
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to generate Bazel file for target `{}` because of unsupported product type `{}`",
                        target.name,
                        target.product_type
                    );
                    plan.failures.push(e);
                }
            }
        }

        plan
    }

    /// Fold operations into the plan, preserving their order per file.
    pub fn extend(&mut self, operations: impl IntoIterator<Item = CreateBuildFileOperation>) {
        for operation in operations {
            self.rule_sets.extend(operation.rule_sets());
            self.operations
                .entry(operation.target_path.clone())
                .or_default()
                .push(operation);
        }
    }

    /// Text of the workspace manifest.
    pub fn workspace_content(&self) -> String {
        workspace_manifest(&self.rule_sets)
    }

    /// Rendered build files, ordered by path.
    pub fn build_files(&self) -> impl Iterator<Item = (&Path, String)> + '_ {
        self.operations
            .iter()
            .map(|(path, ops)| (path.as_path(), CreateBuildFileOperation::render(ops)))
    }

    /// Number of distinct build files.
    pub fn build_file_count(&self) -> usize {
        self.operations.len()
    }

    /// Write the workspace manifest and every build file.
    ///
    /// Existing files are replaced. The first filesystem error aborts the
    /// run; files written before it are left in place.
    pub fn write(&self) -> Result<()> {
        overwrite_file(&self.workspace_path, &self.workspace_content())?;
        tracing::info!("wrote {}", self.workspace_path.display());

        for (path, content) in self.build_files() {
            overwrite_file(path, &content)?;
            tracing::info!("wrote {}", path.display());
        }

        Ok(())
    }
}

/// Plan and write all Bazel files for `project`.
pub fn generate(project: &AbstractProject, config: &GeneratorConfig) -> Result<GenerationPlan> {
    let plan = GenerationPlan::new(project, config);
    plan.write()?;
    Ok(plan)
}
