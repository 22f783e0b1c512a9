//! `listguard sanitize`: rewrite a listing and print the cleaned text.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use listguard_core::ComplianceEngine;

use crate::commands::{info_msg, warn_msg, write_text};
use crate::ui::theme::ThemeMap;
use crate::ui::{diff_viewer, report_table};
use crate::utils::clipboard::copy_to_clipboard;

pub struct SanitizeOptions {
    pub input: String,
    pub output_path: Option<PathBuf>,
    pub diff: bool,
    pub clipboard: bool,
    pub no_summary: bool,
    pub quiet: bool,
}

pub fn run_sanitize(engine: &dyn ComplianceEngine, opts: SanitizeOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting sanitize operation.");

    let sanitized = engine.sanitize(&opts.input);
    debug!(
        "Sanitized {} chars into {} chars.",
        opts.input.chars().count(),
        sanitized.chars().count()
    );

    write_primary_output(&opts, &sanitized, theme)?;

    if opts.clipboard {
        match copy_to_clipboard(&sanitized) {
            Ok(()) => {
                if !opts.quiet {
                    info_msg("Sanitized listing copied to clipboard.", theme);
                }
            }
            Err(e) => warn_msg(format!("Failed to copy to clipboard: {}", e), theme),
        }
    }

    if !opts.no_summary && !opts.quiet {
        let summary = engine.summarize(&opts.input);
        let supports_color = io::stderr().is_terminal();
        report_table::print_summary(&summary, &mut io::stderr(), theme, supports_color)?;
    }

    info!("Sanitize operation completed.");
    Ok(())
}

fn write_primary_output(opts: &SanitizeOptions, sanitized: &str, theme: &ThemeMap) -> Result<()> {
    match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing sanitized listing to file: {}", path.display()), theme);
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            if opts.diff {
                diff_viewer::print_diff(&opts.input, sanitized, &mut file, theme, false)?;
            } else {
                write_text(&mut file, sanitized)?;
            }
        }
        None => {
            let stdout = io::stdout();
            let supports_color = stdout.is_terminal();
            let mut writer = stdout.lock();
            if opts.diff {
                diff_viewer::print_diff(&opts.input, sanitized, &mut writer, theme, supports_color)?;
            } else {
                write_text(&mut writer, sanitized)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
