//! `listguard analyze`: report spam triggers without rewriting anything.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::info;
use std::io;
use std::process::ExitCode;

use listguard_core::{ComplianceEngine, ComplianceReport};

use crate::ui::report_table;
use crate::ui::theme::ThemeMap;

pub struct AnalyzeOptions {
    pub input: String,
    pub json: bool,
    pub fail_over_risk: Option<u8>,
}

/// Exit code for `report` under an optional risk ceiling.
pub fn exit_code_for(report: &ComplianceReport, fail_over_risk: Option<u8>) -> ExitCode {
    match fail_over_risk {
        Some(limit) if report.risk_score > limit => ExitCode::from(1),
        _ => ExitCode::SUCCESS,
    }
}

pub fn run_analyze(engine: &dyn ComplianceEngine, opts: AnalyzeOptions, theme: &ThemeMap) -> Result<ExitCode> {
    let report = engine.analyze(&opts.input);
    info!(
        "Analysis finished: {} issue(s), risk score {}.",
        report.issues.len(),
        report.risk_score
    );

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = io::stdout();
        let supports_color = stdout.is_terminal();
        report_table::print_report(&report, &mut stdout.lock(), theme, supports_color)?;
    }

    Ok(exit_code_for(&report, opts.fail_over_risk))
}
