//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds and validates the co-refinement problem
//! - prints summaries/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{BuildArgs, Command, ExportArgs, ProfileArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `nrb` binary.
pub fn run() -> Result<(), AppError> {
    // We want plain `nrb` (and `nrb --stepsize 0.25`) to behave like
    // `nrb describe ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the convenient default.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Describe(args) => handle_describe(args),
        Command::Profile(args) => handle_profile(args),
        Command::Check(args) => handle_check(args),
        Command::Export(args) => handle_export(args),
    }
}

fn handle_describe(args: BuildArgs) -> Result<(), AppError> {
    let settings = args.settings();
    let problem = pipeline::build_validated(&settings)?;

    println!(
        "{}",
        crate::report::format_problem_summary(&problem, &settings)
    );
    println!(
        "{}",
        crate::report::format_parameter_table(&problem.fittable())
    );

    Ok(())
}

fn handle_profile(args: ProfileArgs) -> Result<(), AppError> {
    let settings = args.build.settings();
    let traces = pipeline::standalone_profiles(&settings, args.contrast)?;

    let plot = crate::plot::render_profile_plot(&traces, args.width, args.height);
    println!("{plot}");

    if let Some(path) = &args.export {
        crate::io::write_profile_csv(path, &traces)?;
        println!("Wrote profile CSV to {}", path.display());
    }

    Ok(())
}

fn handle_check(args: BuildArgs) -> Result<(), AppError> {
    let settings = args.settings();
    // Build without the validation shortcut: the checks report every
    // problem class instead of stopping at the first.
    let problem = crate::setup::build_problem(&settings)?;
    let outcomes = crate::fit::run_checks(&problem);

    print!("{}", crate::report::format_check_report(&outcomes));

    if crate::fit::all_passed(&outcomes) {
        Ok(())
    } else {
        let failed = outcomes.iter().filter(|o| !o.passed).count();
        Err(AppError::model(format!(
            "{failed} configuration check(s) failed."
        )))
    }
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let settings = args.build.settings();
    let problem = pipeline::build_validated(&settings)?;
    let profiles = pipeline::problem_profiles(&problem)?;

    let file = crate::io::problem_file(&problem, &settings, profiles);
    crate::io::write_problem_json(&args.output, &file)?;
    println!("Wrote problem JSON to {}", args.output.display());

    Ok(())
}

/// Rewrite argv so `nrb` defaults to `nrb describe`.
///
/// Rules:
/// - `nrb`                     -> `nrb describe`
/// - `nrb --stepsize 0.25 ...` -> `nrb describe --stepsize 0.25 ...`
/// - `nrb --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("describe".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "describe" | "profile" | "check" | "export");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "describe flags".
    if arg1.starts_with('-') {
        argv.insert(1, "describe".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_describe() {
        assert_eq!(rewrite_args(args(&["nrb"])), args(&["nrb", "describe"]));
    }

    #[test]
    fn leading_flag_defaults_to_describe() {
        assert_eq!(
            rewrite_args(args(&["nrb", "--stepsize", "0.25"])),
            args(&["nrb", "describe", "--stepsize", "0.25"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["nrb", "check"])),
            args(&["nrb", "check"])
        );
        assert_eq!(
            rewrite_args(args(&["nrb", "--help"])),
            args(&["nrb", "--help"])
        );
    }
}
