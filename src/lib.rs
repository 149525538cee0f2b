//! Bazelify - generate Bazel build files from an abstract Xcode project
//!
//! This crate provides the core library functionality for Bazelify:
//! the project model, translation of targets into Bazel rules, and the
//! writing of `WORKSPACE` and `BUILD.bazel` files.

pub mod bazel;
pub mod core;
pub mod ops;
pub mod util;

/// Test fixtures for Bazelify unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::bazel::{generate, BazelRule, BazelRuleSet, CreateBuildFileOperation, GenerationPlan};
pub use crate::core::{AbstractProject, AbstractTarget, ProductType};
pub use crate::util::config::{Config, GeneratorConfig};
