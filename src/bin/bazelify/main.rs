//! Bazelify CLI - generate Bazel build files from an abstract Xcode project

use anyhow::Result;
use bazelify::core::ProjectError;
use bazelify::util::diagnostic::{DuplicateTargetError, UnknownDependencyError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        report(e);
        std::process::exit(1);
    }
}

/// Print an error, rendering source diagnostics through miette.
fn report(e: anyhow::Error) {
    let e = match e.downcast::<UnknownDependencyError>() {
        Ok(diag) => return eprintln!("{:?}", miette::Report::new(diag)),
        Err(e) => e,
    };
    let e = match e.downcast::<ProjectError>() {
        Ok(ProjectError::DuplicateTarget(diag)) => anyhow::Error::new(diag),
        Ok(other) => anyhow::Error::new(other),
        Err(e) => e,
    };
    match e.downcast::<DuplicateTargetError>() {
        Ok(diag) => eprintln!("{:?}", miette::Report::new(diag)),
        Err(e) => eprintln!("error: {:#}", e),
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("bazelify=debug")
    } else {
        EnvFilter::new("bazelify=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, color),
        Commands::Targets(args) => commands::targets::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
