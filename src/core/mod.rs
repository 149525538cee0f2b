//! Core data structures for Bazelify.
//!
//! This module contains the generator's input model:
//! - Product types of Xcode targets
//! - The abstract project and its targets
//! - Loading project descriptions from TOML or JSON

pub mod description;
pub mod product_type;
pub mod project;

pub use description::{
    find_description, load_project, ProjectDescription, TargetDescription, DESCRIPTION_JSON_NAME,
    DESCRIPTION_NAME,
};
pub use product_type::ProductType;
pub use project::{AbstractProject, AbstractTarget, ProjectError, SourceFile, TargetId};
