//! Tables for compliance reports, rewrite summaries and the active rules.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use std::io::{self, Write};

use listguard_core::{ComplianceReport, GuardConfig, TriggerSummaryItem};

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

/// Prints the risk line followed by one row per issue.
pub fn print_report<W: Write>(
    report: &ComplianceReport,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let risk = format!("Risk score: {}/100", report.risk_score);
    writeln!(writer, "{}", paint(&risk, ThemeEntry::for_risk(report.risk_score), theme, supports_color))?;

    if report.compliant {
        return writeln!(writer, "{}", paint("No spam triggers found.", ThemeEntry::Success, theme, supports_color));
    }

    let mut table = new_table(&["Rule", "Category", "Severity", "Description"]);
    for issue in &report.issues {
        table.add_row(vec![
            paint(&issue.rule_name, ThemeEntry::RuleName, theme, supports_color),
            issue.category.to_string(),
            paint(
                &issue.severity.to_string(),
                ThemeEntry::for_severity(issue.severity),
                theme,
                supports_color,
            ),
            issue.description.clone(),
        ]);
    }
    writeln!(writer, "{}", table)
}

/// Prints what `sanitize` rewrote, one row per rule.
pub fn print_summary<W: Write>(
    summary: &[TriggerSummaryItem],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(writer, "{}", paint("No spam triggers rewritten.", ThemeEntry::Success, theme, supports_color));
    }

    writeln!(writer, "{}", paint("Rewrite summary:", ThemeEntry::Header, theme, supports_color))?;
    let mut table = new_table(&["Rule", "Occurrences", "Rewrites"]);
    for item in summary {
        let rewrites = item
            .original_texts
            .iter()
            .zip(&item.replacement_texts)
            .map(|(from, to)| format!("{} -> {}", from, to))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            paint(&item.rule_name, ThemeEntry::RuleName, theme, supports_color),
            item.occurrences.to_string(),
            rewrites,
        ]);
    }
    writeln!(writer, "{}", table)
}

/// Prints the active patterns in application order, then the replacement table.
pub fn print_rules<W: Write>(
    config: &GuardConfig,
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let mut patterns = new_table(&["Rule", "Category", "Severity", "Enabled", "Pattern"]);
    for p in &config.patterns {
        patterns.add_row(vec![
            paint(&p.name, ThemeEntry::RuleName, theme, supports_color),
            p.category.to_string(),
            p.severity.to_string(),
            if p.is_enabled() { "yes" } else { "no" }.to_string(),
            p.pattern.clone(),
        ]);
    }
    writeln!(writer, "{}", paint("Patterns:", ThemeEntry::Header, theme, supports_color))?;
    writeln!(writer, "{}", patterns)?;

    let mut replacements = new_table(&["Trigger", "Replacement"]);
    for (trigger, replacement) in &config.replacements {
        replacements.add_row(vec![trigger.clone(), replacement.clone()]);
    }
    writeln!(writer, "{}", paint("Replacements:", ThemeEntry::Header, theme, supports_color))?;
    writeln!(writer, "{}", replacements)?;

    writeln!(
        writer,
        "Max emoji run: {}, shouting threshold: {} characters",
        config.limits.max_emoji_run, config.limits.shout_length_threshold
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::default_theme_map;
    use listguard_core::{ComplianceEngine, RegexEngine};

    fn engine() -> RegexEngine {
        RegexEngine::new(GuardConfig::load_default_rules().unwrap()).unwrap()
    }

    #[test]
    fn report_lists_each_issue() {
        let report = engine().analyze("ACT NOW, MINT watch, click here");
        let mut out = Vec::new();
        print_report(&report, &mut out, &default_theme_map(), false).unwrap();
        let s = String::from_utf8(out).unwrap();
        assert!(s.starts_with("Risk score: 60/100\n"));
        assert!(s.contains("urgency"));
        assert!(s.contains("shouting"));
        assert!(s.contains("promotional"));
    }

    #[test]
    fn compliant_report_says_so() {
        let mut out = Vec::new();
        print_report(&ComplianceReport::default(), &mut out, &default_theme_map(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Risk score: 0/100\nNo spam triggers found.\n");
    }

    #[test]
    fn summary_shows_rewrites() {
        let summary = engine().summarize("act now");
        let mut out = Vec::new();
        print_summary(&summary, &mut out, &default_theme_map(), false).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("act now -> inquire today"));
    }
}
