//! Translation of one abstract target into build file operations.
//!
//! Labels are derived with plain string arithmetic on the declared paths:
//! a dependency's label is its path with the prefix it shares with the
//! depending target removed, so `Libs/Foo` depending on `Libs/Bar` (name
//! `Bar`) yields `/Bar:Bar`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::bazel::operation::CreateBuildFileOperation;
use crate::bazel::rule::BazelRule;
use crate::core::{AbstractProject, AbstractTarget, ProductType};
use crate::util::config::GeneratorConfig;
use crate::util::diagnostic::{suggestions, Diagnostic};
use crate::util::fs::{derive_path, path_str, resolve};
use crate::util::string::{common_prefix, remove_prefix};

/// Suffix of the library rule wrapped by a framework bundle.
pub const FRAMEWORK_LIB_SUFFIX: &str = "_lib";

/// Suffix of the library rule holding an application's sources.
pub const APPLICATION_SOURCE_SUFFIX: &str = "_source";

/// Suffix of the filegroup exposing a target's Info.plist.
pub const INFO_PLIST_SUFFIX: &str = "_InfoPlist";

/// A target that cannot be translated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslateError {
    #[error("unimplemented Bazel generation for product type `{product_type}` (target `{target}`)")]
    UnimplementedProductType {
        target: String,
        product_type: ProductType,
    },
}

impl TranslateError {
    /// Name of the target that failed.
    pub fn target(&self) -> &str {
        match self {
            TranslateError::UnimplementedProductType { target, .. } => target,
        }
    }

    /// Convert to a user-facing warning; a skipped target never fails a run.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            TranslateError::UnimplementedProductType { target, product_type } => {
                Diagnostic::warning(format!("skipped target `{}`", target))
                    .with_context(format!(
                        "product type `{}` ({}) has no BUILD generation",
                        product_type,
                        product_type.identifier()
                    ))
                    .with_suggestion(suggestions::UNSUPPORTED_PRODUCT_TYPE)
            }
        }
    }
}

/// Translates targets of one project under one generation policy.
#[derive(Debug, Clone, Copy)]
pub struct TargetTranslator<'a> {
    project: &'a AbstractProject,
    config: &'a GeneratorConfig,
}

impl<'a> TargetTranslator<'a> {
    pub fn new(project: &'a AbstractProject, config: &'a GeneratorConfig) -> Self {
        TargetTranslator { project, config }
    }

    /// Build file operations for `target`.
    pub fn translate(
        &self,
        target: &AbstractTarget,
    ) -> Result<Vec<CreateBuildFileOperation>, TranslateError> {
        match target.product_type {
            ProductType::Framework => Ok(self.framework(target)),
            ProductType::Application => Ok(self.application(target)),
            ProductType::UnitTestBundle
            | ProductType::UiTestBundle
            | ProductType::StaticFramework
            | ProductType::StaticLibrary
            | ProductType::DynamicLibrary
            | ProductType::AppExtension
            | ProductType::Bundle
            | ProductType::CommandLineTool
            | ProductType::WatchApp => Err(TranslateError::UnimplementedProductType {
                target: target.name.clone(),
                product_type: target.product_type,
            }),
        }
    }

    /// Path of the build file placed in the target's directory.
    pub fn build_file_path(&self, target: &AbstractTarget) -> PathBuf {
        derive_path(&target.path, &self.config.build_file_name, self.project.root())
    }

    fn framework(&self, target: &AbstractTarget) -> Vec<CreateBuildFileOperation> {
        let library_name = format!("{}{}", target.name, FRAMEWORK_LIB_SUFFIX);
        let info_plist = self.info_plist(target);

        let library = BazelRule::SwiftLibrary {
            name: library_name.clone(),
            srcs: self.source_paths(target),
            deps: self.dependency_labels(target),
            module_name: target.name.clone(),
        };
        let framework = BazelRule::IosFramework {
            name: target.name.clone(),
            deps: vec![format!(":{}", library_name)],
            bundle_id: self.config.bundle_id(&target.name),
            minimum_os_version: self.config.minimum_os_version.clone(),
            families: self.config.device_families.clone(),
            infoplists: vec![info_plist.label.clone()],
        };

        vec![
            CreateBuildFileOperation::new(self.build_file_path(target), vec![library, framework]),
            info_plist.operation,
        ]
    }

    fn application(&self, target: &AbstractTarget) -> Vec<CreateBuildFileOperation> {
        let source_name = format!("{}{}", target.name, APPLICATION_SOURCE_SUFFIX);
        let labels = self.dependency_labels(target);
        let info_plist = self.info_plist(target);

        let mut deps = vec![format!(":{}", source_name)];
        deps.extend(labels.iter().cloned());

        let application = BazelRule::IosApplication {
            name: target.name.clone(),
            deps,
            bundle_id: self.config.bundle_id(&target.name),
            minimum_os_version: self.config.minimum_os_version.clone(),
            families: self.config.device_families.clone(),
            infoplists: vec![info_plist.label.clone()],
        };
        // Sources link against the frameworks' library rules, not their bundles.
        let source = BazelRule::SwiftLibrary {
            name: source_name,
            srcs: self.source_paths(target),
            deps: labels
                .into_iter()
                .map(|label| label + FRAMEWORK_LIB_SUFFIX)
                .collect(),
            module_name: target.name.clone(),
        };

        vec![
            CreateBuildFileOperation::new(self.build_file_path(target), vec![application, source]),
            info_plist.operation,
        ]
    }

    /// Source paths relative to the target's own directory.
    fn source_paths(&self, target: &AbstractTarget) -> Vec<String> {
        let root = self.project.root();
        let target_root = path_str(&resolve(&target.path, root));

        target
            .source_files
            .iter()
            .map(|source| {
                let full = path_str(&resolve(&source.path, root));
                remove_prefix(remove_prefix(&full, &target_root), "/").to_string()
            })
            .collect()
    }

    /// Labels of `target`'s dependencies, in declaration order.
    fn dependency_labels(&self, target: &AbstractTarget) -> Vec<String> {
        let own_path = path_str(&target.path);

        self.project
            .dependencies_of(target)
            .map(|dependency| {
                let dependency_path = path_str(&dependency.path);
                let prefix = common_prefix(&[own_path.as_str(), dependency_path.as_str()]);
                let relative = &dependency_path[prefix.len()..];
                format!("/{}:{}", relative, dependency.name)
            })
            .collect()
    }

    /// Filegroup exposing the Info.plist, written next to the plist itself.
    fn info_plist(&self, target: &AbstractTarget) -> InfoPlist {
        let root = self.project.root();
        let plist_path = resolve(&target.info_plist_path, root);
        let plist_dir = plist_path.parent().unwrap_or(root).to_path_buf();

        let name = format!("{}{}", target.name, INFO_PLIST_SUFFIX);
        let dir_str = path_str(&plist_dir);
        let label = format!("/{}:{}", remove_prefix(&dir_str, &path_str(root)), name);
        let file = remove_prefix(remove_prefix(&path_str(&plist_path), &dir_str), "/").to_string();

        InfoPlist {
            label,
            operation: CreateBuildFileOperation::new(
                plist_build_file(&plist_dir, &self.config.build_file_name),
                vec![BazelRule::Filegroup {
                    name,
                    srcs: vec![file],
                }],
            ),
        }
    }
}

struct InfoPlist {
    /// Label of the filegroup as seen from the target's build file
    label: String,
    operation: CreateBuildFileOperation,
}

fn plist_build_file(dir: &Path, build_file_name: &str) -> PathBuf {
    dir.join(build_file_name)
}
