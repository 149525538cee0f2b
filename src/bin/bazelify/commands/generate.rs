//! `bazelify generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use bazelify::ops::generate::{generate, ConfigOverrides, GenerateOptions, GenerateResult};
use bazelify::util::diagnostic::emit;
use bazelify::util::fs::relative_path;

/// Build generate options from command-line arguments.
pub fn options_from_args(args: GenerateArgs) -> GenerateOptions {
    GenerateOptions {
        project: args.project,
        dry_run: args.dry_run,
        overrides: ConfigOverrides {
            bundle_id_prefix: args.bundle_id_prefix,
            minimum_os_version: args.minimum_os_version,
            device_families: args.device_families,
        },
    }
}

pub fn execute(args: GenerateArgs, color: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let opts = options_from_args(args);

    let result = generate(&cwd, &opts)?;

    for failure in &result.plan.failures {
        emit(&failure.to_diagnostic(), color);
    }

    if result.written {
        eprintln!(
            "   Generated {} build files and {}",
            result.plan.build_file_count(),
            relative_path(&result.project_root, &result.plan.workspace_path).display()
        );
    } else {
        print_plan(&result);
    }

    if !result.plan.failures.is_empty() {
        eprintln!("     Skipped {} targets", result.plan.failures.len());
    }

    Ok(())
}

/// Print every file the plan would write, paths relative to the project root.
fn print_plan(result: &GenerateResult) {
    let root = &result.project_root;
    let plan = &result.plan;

    println!("# {}", relative_path(root, &plan.workspace_path).display());
    println!("{}", plan.workspace_content());

    for (path, content) in plan.build_files() {
        println!("# {}", relative_path(root, path).display());
        println!("{}", content);
    }
}
