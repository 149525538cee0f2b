//! High-level operations.
//!
//! This module contains the implementation of Bazelify commands.

pub mod generate;

pub use generate::{
    generate, list_targets, ConfigOverrides, GenerateOptions, GenerateResult, TargetSummary,
};
