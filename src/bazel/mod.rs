//! Bazel output: rules, rule sets, build file operations, and the
//! translation of a whole project into them.

pub mod generator;
pub mod operation;
pub mod rule;
pub mod rule_set;
pub mod target;

pub use generator::{generate, GenerationPlan};
pub use operation::CreateBuildFileOperation;
pub use rule::{BazelRule, DeviceFamily};
pub use rule_set::{workspace_manifest, BazelRuleSet, HTTP_ARCHIVE_LOAD};
pub use target::{TargetTranslator, TranslateError};
