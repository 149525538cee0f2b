//! Shared utilities

pub mod config;
pub mod diagnostic;
pub mod fs;
pub mod string;

pub use config::{Config, GeneratorConfig};
pub use diagnostic::Diagnostic;
