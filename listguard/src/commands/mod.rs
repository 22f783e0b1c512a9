// listguard/src/commands/mod.rs
//! Subcommand implementations and the plumbing they share: reading input,
//! resolving the rule tables, and writing status messages.

pub mod analyze;
pub mod check;
pub mod profiles;
pub mod rules;
pub mod sanitize;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use listguard_core::{
    apply_profile_to_config, load_profile_by_name, text::read_text, validate_rules, ComplianceEngine,
    EngineOptions, GuardConfig, RegexEngine, ReplacementMode,
};

use crate::cli::RuleSource;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, supports_color);
}

/// Reads the listing from `input_file` or stdin. Non-UTF-8 input is rejected.
pub fn read_input(input_file: Option<&Path>) -> Result<String> {
    let text = match input_file {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))?;
            read_text(file).with_context(|| format!("Failed to read input file: {}", path.display()))?
        }
        None => read_text(io::stdin().lock()).context("Failed to read from stdin")?,
    };
    debug!("Read {} bytes of input.", text.len());
    Ok(text)
}

/// Built-in rules, then the user rule file, then the profile, then `--disable`.
pub fn resolve_rules(source: &RuleSource) -> Result<(GuardConfig, EngineOptions)> {
    let mut config = GuardConfig::load_with_overrides(source.config.as_deref())?;
    let mut options = EngineOptions::default();

    if let Some(name) = &source.profile {
        let profile = load_profile_by_name(name)?;
        profile.validate(&config)?;
        config = apply_profile_to_config(&profile, config);
        options = EngineOptions::from(&profile);
    }

    config.set_disabled_patterns(&source.disable);
    validate_rules(&config)?;
    Ok((config, options))
}

/// Builds a regex engine from the resolved rules. `fixed_point` forces the
/// fixed-point replacement mode unless a profile already selected it.
pub fn build_engine(source: &RuleSource, fixed_point: bool) -> Result<RegexEngine> {
    let (config, mut options) = resolve_rules(source)?;
    if fixed_point && options.replacement_mode == ReplacementMode::SinglePass {
        options = options.with_replacement_mode(ReplacementMode::fixed_point());
    }
    let engine = RegexEngine::with_options(config, options)?;
    debug!(
        "Engine ready with {} active pattern(s).",
        engine.compiled_rules().rules.len()
    );
    Ok(engine)
}

/// Writes `content` to `writer`, adding a trailing newline only when missing.
pub fn write_text<W: Write>(writer: &mut W, content: &str) -> io::Result<()> {
    if content.ends_with('\n') {
        write!(writer, "{}", content)
    } else {
        writeln!(writer, "{}", content)
    }
}
