//! Command-line interface definition for the listguard application.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "listguard",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check and clean marketplace listing text before you post it",
    long_about = "listguard scans listing descriptions for phrasing that messaging and marketplace platforms tend to flag as spam (urgency pressure, shouting, emoji walls, promotional phrases), rewrites it into calmer wording, and reports a 0-100 risk score.",
    arg_required_else_help = true,
)]
pub struct Cli {
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[arg(long, global = true, value_name = "FILE", env = "LISTGUARD_THEME", help = "Path to a YAML theme file for output colors.")]
    pub theme: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Rewrites spam triggers in a listing and prints the cleaned text.")]
    Sanitize(SanitizeCommand),

    #[command(about = "Reports which spam patterns a listing triggers, without rewriting it.")]
    Analyze(AnalyzeCommand),

    #[command(about = "Runs the full check (report, cleaned text, rate limit) and prints JSON.")]
    Check(CheckCommand),

    #[command(about = "Lists the active spam patterns and replacement table.")]
    Rules(RulesCommand),

    #[command(about = "Lists profiles found in the profile directories.")]
    Profiles,
}

/// Where the rule tables come from. Shared by every rule-using command.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSource {
    /// Path to a custom rule file (YAML) merged over the built-in rules.
    #[arg(long = "config", value_name = "FILE", env = "LISTGUARD_CONFIG", help = "Path to a custom rule file (YAML).")]
    pub config: Option<PathBuf>,

    /// Profile name or path.
    #[arg(long = "profile", value_name = "NAME", help = "Loads a profile by name or from a file path.")]
    pub profile: Option<String>,

    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these pattern names (comma-separated).")]
    pub disable: Vec<String>,
}

#[derive(Args, Debug)]
pub struct SanitizeCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleSource,

    #[arg(long, short = 'D', help = "Show a unified diff of the changes instead of the cleaned text.")]
    pub diff: bool,

    #[arg(long = "fixed-point", help = "Repeat replacements until the text stops changing.")]
    pub fixed_point: bool,

    #[arg(long = "no-summary", help = "Suppress the rewrite summary on stderr.")]
    pub no_summary: bool,

    #[arg(long, short = 'c', help = "Copy the cleaned text to the system clipboard.")]
    pub clipboard: bool,
}

#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleSource,

    #[arg(long = "json", help = "Print the compliance report as JSON.")]
    pub json: bool,

    #[arg(long = "fail-over-risk", value_name = "N", help = "Exit with code 1 if the risk score is above N.")]
    pub fail_over_risk: Option<u8>,
}

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleSource,

    #[arg(long = "copies-last-hour", value_name = "N", help = "Listings copied in the last hour (enables the rate-limit verdict).")]
    pub copies_last_hour: Option<u32>,

    #[arg(long = "copies-today", value_name = "N", help = "Listings copied today (enables the rate-limit verdict).")]
    pub copies_today: Option<u32>,
}

#[derive(Args, Debug)]
pub struct RulesCommand {
    #[command(flatten)]
    pub rules: RuleSource,
}
