//! `bazelify targets` command

use anyhow::Result;

use crate::cli::TargetsArgs;
use bazelify::ops::generate::{list_targets, TargetSummary};

/// Format one line of the target listing.
pub fn format_target(target: &TargetSummary) -> String {
    let status = if target.supported { "generate" } else { "skip" };
    let mut line = format!("{:<9} {} ({})", status, target.name, target.product_type);
    if !target.dependencies.is_empty() {
        line.push_str(&format!(" -> {}", target.dependencies.join(", ")));
    }
    line
}

pub fn execute(args: TargetsArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let targets = list_targets(&cwd, args.project.as_deref())?;

    if targets.is_empty() {
        eprintln!("no targets in project");
        return Ok(());
    }

    for target in &targets {
        println!("{}", format_target(target));
    }

    Ok(())
}
