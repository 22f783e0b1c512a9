// listguard-core/src/report.rs
//! Data structures describing what the engine found: individual trigger
//! matches, per-rule summaries, and the compliance report returned by
//! `analyze`.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::{Category, Severity};
use crate::sanitizers::compiler::CompiledRule;

/// Risk points added per distinct triggered pattern.
pub const RISK_PER_ISSUE: u8 = 20;
/// Upper bound of the risk score.
pub const MAX_RISK_SCORE: u8 = 100;

/// A single occurrence of a spam pattern in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMatch {
    pub rule_name: String,
    pub category: Category,
    pub original_string: String,
    /// What the sanitizer would substitute for this occurrence.
    pub replacement: String,
    /// Byte offsets into the scanned text.
    pub start: usize,
    pub end: usize,
}

/// Per-rule statistics for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSummaryItem {
    pub rule_name: String,
    pub category: Category,
    pub occurrences: usize,
    pub original_texts: Vec<String>,
    pub replacement_texts: Vec<String>,
}

/// One triggered pattern in a compliance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceIssue {
    pub rule_name: String,
    pub category: Category,
    /// Regex source of the triggered pattern.
    pub pattern: String,
    pub description: String,
    pub severity: Severity,
}

impl ComplianceIssue {
    pub fn from_rule(rule: &CompiledRule) -> Self {
        Self {
            rule_name: rule.name.clone(),
            category: rule.category,
            pattern: rule.regex.as_str().to_string(),
            description: rule.description.clone(),
            severity: rule.severity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub compliant: bool,
    pub issues: Vec<ComplianceIssue>,
    pub risk_score: u8,
}

impl ComplianceReport {
    pub fn from_issues(issues: Vec<ComplianceIssue>) -> Self {
        let risk_score = risk_score_for(issues.len());
        debug!("Compliance report: {} issue(s), risk score {}.", issues.len(), risk_score);
        Self {
            compliant: issues.is_empty(),
            issues,
            risk_score,
        }
    }

    pub fn has_category(&self, category: Category) -> bool {
        self.issues.iter().any(|i| i.category == category)
    }

    pub fn issues_by_severity(&self, severity: Severity) -> Vec<&ComplianceIssue> {
        self.issues.iter().filter(|i| i.severity == severity).collect()
    }
}

impl Default for ComplianceReport {
    fn default() -> Self {
        Self::from_issues(Vec::new())
    }
}

/// `min(20 * issue_count, 100)`.
pub fn risk_score_for(issue_count: usize) -> u8 {
    let capped = issue_count.min(usize::from(MAX_RISK_SCORE / RISK_PER_ISSUE));
    // capped <= 5, so the product stays within u8.
    (capped as u8 * RISK_PER_ISSUE).min(MAX_RISK_SCORE)
}

/// Groups matches by rule, keeping the order in which rules first appear.
pub fn summarize_matches(matches: &[TriggerMatch]) -> Vec<TriggerSummaryItem> {
    let mut summary: Vec<TriggerSummaryItem> = Vec::new();
    for m in matches {
        match summary.iter_mut().find(|s| s.rule_name == m.rule_name) {
            Some(item) => {
                item.occurrences += 1;
                item.original_texts.push(m.original_string.clone());
                item.replacement_texts.push(m.replacement.clone());
            }
            None => summary.push(TriggerSummaryItem {
                rule_name: m.rule_name.clone(),
                category: m.category,
                occurrences: 1,
                original_texts: vec![m.original_string.clone()],
                replacement_texts: vec![m.replacement.clone()],
            }),
        }
    }
    summary
}

/// Stable fingerprint of a listing text for duplicate-post detection.
///
/// Case and whitespace differences do not change the fingerprint.
pub fn text_fingerprint(text: &str) -> String {
    let normalized = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}
