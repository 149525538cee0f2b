//! Configuration file support for Bazelify.
//!
//! Bazelify reads its generation policy from two locations:
//! - Global: `~/.bazelify/config.toml` - User-wide defaults
//! - Project: `<root>/.bazelify/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! are applied last by the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bazel::DeviceFamily;

/// Default prefix of synthesized bundle identifiers (`to.do.<target>`).
pub const DEFAULT_BUNDLE_ID_PREFIX: &str = "to.do";

/// Default minimum OS version of generated bundles.
pub const DEFAULT_MINIMUM_OS_VERSION: &str = "13.0";

/// Default name of generated build files.
pub const BUILD_FILE_NAME: &str = "BUILD.bazel";

/// Default name of the workspace manifest.
pub const WORKSPACE_FILE_NAME: &str = "WORKSPACE";

/// Bazelify configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generation policy
    pub generate: GeneratorConfig,
}

/// Policy values baked into every generated rule.
///
/// None of these are read from the project; they are fixed defaults that a
/// user may override explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Bundle identifiers are `<prefix>.<target name>`
    pub bundle_id_prefix: String,

    /// Minimum OS version for bundle rules
    pub minimum_os_version: String,

    /// Device families for bundle rules
    pub device_families: Vec<DeviceFamily>,

    /// Name of each per-directory build file
    pub build_file_name: String,

    /// Name of the workspace manifest at the project root
    pub workspace_file_name: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            bundle_id_prefix: DEFAULT_BUNDLE_ID_PREFIX.to_string(),
            minimum_os_version: DEFAULT_MINIMUM_OS_VERSION.to_string(),
            device_families: vec![DeviceFamily::Iphone],
            build_file_name: BUILD_FILE_NAME.to_string(),
            workspace_file_name: WORKSPACE_FILE_NAME.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Bundle identifier for a target.
    pub fn bundle_id(&self, target_name: &str) -> String {
        format!("{}.{}", self.bundle_id_prefix, target_name)
    }
}

/// On-disk form where every field is optional, so partial files merge.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    generate: RawGeneratorConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawGeneratorConfig {
    bundle_id_prefix: Option<String>,
    minimum_os_version: Option<String>,
    device_families: Option<Vec<DeviceFamily>>,
    build_file_name: Option<String>,
    workspace_file_name: Option<String>,
}

impl Config {
    /// Load configuration from a file, on top of the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = Config::default();
        config.merge_file(path)?;
        Ok(config)
    }

    /// Apply the values set in `path` over this config.
    fn merge_file(&mut self, path: &Path) -> Result<()> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        self.merge(raw);
        Ok(())
    }

    fn merge(&mut self, other: RawConfig) {
        let current = &mut self.generate;
        let other = other.generate;

        if let Some(prefix) = other.bundle_id_prefix {
            current.bundle_id_prefix = prefix;
        }
        if let Some(version) = other.minimum_os_version {
            current.minimum_os_version = version;
        }
        if let Some(families) = other.device_families {
            current.device_families = families;
        }
        if let Some(name) = other.build_file_name {
            current.build_file_name = name;
        }
        if let Some(name) = other.workspace_file_name {
            current.workspace_file_name = name;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.bazelify/config.toml)
/// 2. Global config (~/.bazelify/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    for path in global_path.into_iter().chain(std::iter::once(project_path)) {
        if !path.exists() {
            continue;
        }
        if let Err(e) = config.merge_file(path) {
            tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
        }
    }

    config
}

/// Get the global bazelify config directory (~/.bazelify).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".bazelify"))
}

/// Get the global config path (~/.bazelify/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.bazelify/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".bazelify").join("config.toml")
}
