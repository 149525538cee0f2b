//! Implementation of `bazelify generate` and `bazelify targets`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::bazel::{DeviceFamily, GenerationPlan, TargetTranslator};
use crate::core::{find_description, load_project, AbstractProject, ProductType};
use crate::util::config::{global_config_path, load_config, project_config_path, GeneratorConfig};
use crate::util::diagnostic::suggestions;

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Project description file (defaults to Project.toml / Project.json in cwd)
    pub project: Option<PathBuf>,

    /// Plan only, write nothing
    pub dry_run: bool,

    /// Policy overrides from the command line
    pub overrides: ConfigOverrides,
}

/// Command-line overrides applied on top of the config files.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bundle_id_prefix: Option<String>,
    pub minimum_os_version: Option<String>,
    pub device_families: Vec<DeviceFamily>,
}

impl ConfigOverrides {
    /// Apply the overrides that were set.
    pub fn apply(&self, config: &mut GeneratorConfig) {
        if let Some(prefix) = &self.bundle_id_prefix {
            config.bundle_id_prefix = prefix.clone();
        }
        if let Some(version) = &self.minimum_os_version {
            config.minimum_os_version = version.clone();
        }
        if !self.device_families.is_empty() {
            config.device_families = self.device_families.clone();
        }
    }
}

/// Outcome of a generate run.
#[derive(Debug)]
pub struct GenerateResult {
    pub project_root: PathBuf,
    pub plan: GenerationPlan,
    /// Whether files were written
    pub written: bool,
}

/// Locate the description file for `cwd` and options.
pub fn resolve_description(cwd: &Path, project: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = project {
        return Ok(crate::util::fs::resolve(path, cwd));
    }

    match find_description(cwd) {
        Some(path) => Ok(path),
        None => bail!(
            "could not find `Project.toml` or `Project.json` in `{}`\n\n{}",
            cwd.display(),
            suggestions::NO_PROJECT
        ),
    }
}

/// Load the generation policy for `project`, then apply `overrides`.
pub fn load_generator_config(project: &AbstractProject, overrides: &ConfigOverrides) -> GeneratorConfig {
    let global = global_config_path();
    let mut config = load_config(global.as_deref(), &project_config_path(project.root())).generate;
    overrides.apply(&mut config);
    config
}

/// Generate Bazel files for the project described in `opts`.
pub fn generate(cwd: &Path, opts: &GenerateOptions) -> Result<GenerateResult> {
    let description = resolve_description(cwd, opts.project.as_deref())?;
    let project = load_project(&description)?;
    let config = load_generator_config(&project, &opts.overrides);

    tracing::info!(
        "generating Bazel files for {} targets in {}",
        project.targets().len(),
        project.root().display()
    );

    let plan = GenerationPlan::new(&project, &config);
    if !opts.dry_run {
        plan.write()?;
    }

    Ok(GenerateResult {
        project_root: project.root().to_path_buf(),
        plan,
        written: !opts.dry_run,
    })
}

/// A row of `bazelify targets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSummary {
    pub name: String,
    pub product_type: ProductType,
    pub supported: bool,
    /// Build file the target's rules go to, if it is supported
    pub build_file: Option<PathBuf>,
    pub dependencies: Vec<String>,
}

/// Summarize every target of the described project.
pub fn list_targets(cwd: &Path, project: Option<&Path>) -> Result<Vec<TargetSummary>> {
    let description = resolve_description(cwd, project)?;
    let project = load_project(&description)?;
    let config = load_generator_config(&project, &ConfigOverrides::default());
    Ok(summarize(&project, &config))
}

/// Summarize targets of an already loaded project.
pub fn summarize(project: &AbstractProject, config: &GeneratorConfig) -> Vec<TargetSummary> {
    let translator = TargetTranslator::new(project, config);

    project
        .targets()
        .iter()
        .map(|target| {
            let supported = translator.translate(target).is_ok();
            TargetSummary {
                name: target.name.clone(),
                product_type: target.product_type,
                supported,
                build_file: supported.then(|| translator.build_file_path(target)),
                dependencies: project
                    .dependencies_of(target)
                    .map(|d| d.name.clone())
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{write_description, SAMPLE_DESCRIPTION};
    use tempfile::TempDir;

    #[test]
    fn test_generate_from_description() {
        let tmp = TempDir::new().unwrap();
        write_description(tmp.path(), SAMPLE_DESCRIPTION);

        let result = generate(tmp.path(), &GenerateOptions::default()).unwrap();
        assert!(result.written);
        assert_eq!(result.plan.failures.len(), 1);
        assert!(tmp.path().join("WORKSPACE").exists());
        assert!(tmp.path().join("Libs/Foo/BUILD.bazel").exists());
        assert!(tmp.path().join("App/BUILD.bazel").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        write_description(tmp.path(), SAMPLE_DESCRIPTION);

        let opts = GenerateOptions {
            dry_run: true,
            ..Default::default()
        };
        let result = generate(tmp.path(), &opts).unwrap();
        assert!(!result.written);
        assert!(result.plan.build_file_count() > 0);
        assert!(!tmp.path().join("WORKSPACE").exists());
    }

    #[test]
    fn test_missing_description() {
        let tmp = TempDir::new().unwrap();
        let err = generate(tmp.path(), &GenerateOptions::default()).unwrap_err();
        assert!(err.to_string().contains("could not find `Project.toml`"));
    }

    #[test]
    fn test_project_config_and_overrides() {
        let tmp = TempDir::new().unwrap();
        write_description(tmp.path(), SAMPLE_DESCRIPTION);
        std::fs::create_dir_all(tmp.path().join(".bazelify")).unwrap();
        std::fs::write(
            tmp.path().join(".bazelify/config.toml"),
            "[generate]\nbundle_id_prefix = \"com.example\"\nminimum_os_version = \"14.0\"\n",
        )
        .unwrap();

        let opts = GenerateOptions {
            overrides: ConfigOverrides {
                minimum_os_version: Some("15.0".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        generate(tmp.path(), &opts).unwrap();

        let foo = std::fs::read_to_string(tmp.path().join("Libs/Foo/BUILD.bazel")).unwrap();
        assert!(foo.contains("bundle_id = \"com.example.Foo\""));
        assert!(foo.contains("minimum_os_version = \"15.0\""));
    }

    #[test]
    fn test_list_targets() {
        let tmp = TempDir::new().unwrap();
        write_description(tmp.path(), SAMPLE_DESCRIPTION);

        let targets = list_targets(tmp.path(), None).unwrap();
        let names: Vec<_> = targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Bar", "Foo", "App", "AppTests"]);

        let tests = &targets[3];
        assert!(!tests.supported);
        assert!(tests.build_file.is_none());
        assert_eq!(targets[2].dependencies, vec!["Foo".to_string()]);
    }

    #[test]
    fn test_summary_support_matches_translation() {
        let tmp = TempDir::new().unwrap();
        let project = crate::test_support::fixtures::sample_project(tmp.path());
        let config = GeneratorConfig::default();
        let translator = TargetTranslator::new(&project, &config);

        for (summary, target) in summarize(&project, &config).iter().zip(project.targets()) {
            assert_eq!(summary.supported, translator.translate(target).is_ok());
        }
    }
}
