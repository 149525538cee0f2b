//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use bazelify::bazel::DeviceFamily;

/// Bazelify - generate Bazel build files from an abstract Xcode project
#[derive(Parser)]
#[command(name = "bazelify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write WORKSPACE and BUILD.bazel files for the project
    Generate(GenerateArgs),

    /// List the project's targets and whether they can be generated
    Targets(TargetsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Project description file (defaults to Project.toml or Project.json)
    #[arg(short, long, env = "BAZELIFY_PROJECT")]
    pub project: Option<PathBuf>,

    /// Print the files that would be written instead of writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Prefix of synthesized bundle identifiers
    #[arg(long)]
    pub bundle_id_prefix: Option<String>,

    /// Minimum OS version of bundle rules
    #[arg(long)]
    pub minimum_os_version: Option<String>,

    /// Device family of bundle rules (repeatable)
    #[arg(long = "device-family", value_parser = parse_device_family)]
    pub device_families: Vec<DeviceFamily>,
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Project description file (defaults to Project.toml or Project.json)
    #[arg(short, long, env = "BAZELIFY_PROJECT")]
    pub project: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_device_family(s: &str) -> Result<DeviceFamily, String> {
    s.parse()
}
