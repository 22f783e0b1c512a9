// listguard/src/main.rs
//! listguard entry point.

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use listguard::cli::{Cli, Commands};
use listguard::commands::{self, analyze, check, error_msg, profiles, rules, sanitize};
use listguard::logger;
use listguard::ui::theme::{build_theme_map, default_theme_map, ThemeMap};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let theme = match build_theme_map(cli.theme.as_deref()) {
        Ok(theme) => theme,
        Err(e) => {
            let fallback = default_theme_map();
            error_msg(format!("{:#}", e), &fallback);
            return ExitCode::from(2);
        }
    };

    match run(cli, &theme) {
        Ok(code) => code,
        Err(e) => {
            error_msg(format!("{:#}", e), &theme);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli, theme: &ThemeMap) -> Result<ExitCode> {
    match cli.command {
        Commands::Sanitize(cmd) => {
            let engine = commands::build_engine(&cmd.rules, cmd.fixed_point)?;
            let input = commands::read_input(cmd.input_file.as_deref())?;
            sanitize::run_sanitize(
                &engine,
                sanitize::SanitizeOptions {
                    input,
                    output_path: cmd.output,
                    diff: cmd.diff,
                    clipboard: cmd.clipboard,
                    no_summary: cmd.no_summary,
                    quiet: cli.quiet,
                },
                theme,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Analyze(cmd) => {
            let engine = commands::build_engine(&cmd.rules, false)?;
            let input = commands::read_input(cmd.input_file.as_deref())?;
            analyze::run_analyze(
                &engine,
                analyze::AnalyzeOptions {
                    input,
                    json: cmd.json,
                    fail_over_risk: cmd.fail_over_risk,
                },
                theme,
            )
        }
        Commands::Check(cmd) => {
            let engine = commands::build_engine(&cmd.rules, false)?;
            let input = commands::read_input(cmd.input_file.as_deref())?;
            check::run_check(
                &engine,
                check::CheckOptions {
                    input,
                    copies_last_hour: cmd.copies_last_hour,
                    copies_today: cmd.copies_today,
                },
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Rules(cmd) => {
            rules::run_rules(&cmd.rules, theme)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Profiles => {
            profiles::run_profiles(theme)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
