// File: listguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the engine without any UI: one-shot
//! sanitize/analyze helpers and the full compliance check pipeline.

use anyhow::Result;
use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GuardConfig;
use crate::engine::ComplianceEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::profiles::EngineOptions;
use crate::rate_limit::{check_rate_limit, RateLimitVerdict, UsageData};
use crate::report::{text_fingerprint, ComplianceReport};

/// Everything known about one listing text after a full check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceCheck {
    pub check_id: Uuid,
    pub original: String,
    pub sanitized: String,
    /// Report for the original, unsanitized text.
    pub report: ComplianceReport,
    /// Present only when usage counters were supplied.
    pub rate_limit: Option<RateLimitVerdict>,
    pub fingerprint: String,
    /// RFC 3339 timestamp.
    pub checked_at: String,
}

/// Runs `analyze` and `sanitize` on `text`, and the rate-limit verdict when
/// `usage` is given.
pub fn check_compliance(
    engine: &dyn ComplianceEngine,
    text: &str,
    usage: Option<&UsageData>,
) -> ComplianceCheck {
    let report = engine.analyze(text);
    let sanitized = engine.sanitize(text);
    let rate_limit = usage.map(|u| check_rate_limit(u, &engine.get_rules().rate_limits));

    let check = ComplianceCheck {
        check_id: Uuid::new_v4(),
        original: text.to_string(),
        sanitized,
        report,
        rate_limit,
        fingerprint: text_fingerprint(text),
        checked_at: Utc::now().to_rfc3339(),
    };
    debug!(
        "Compliance check {} finished: compliant={}, risk={}",
        check.check_id, check.report.compliant, check.report.risk_score
    );
    check
}

/// Builds a regex engine for `config` and sanitizes `text` in one call.
pub fn headless_sanitize_string(config: GuardConfig, options: EngineOptions, text: &str) -> Result<String> {
    let engine = RegexEngine::with_options(config, options)?;
    Ok(engine.sanitize(text))
}

/// Builds a regex engine for `config` and analyzes `text` in one call.
pub fn headless_analyze_string(config: GuardConfig, options: EngineOptions, text: &str) -> Result<ComplianceReport> {
    let engine = RegexEngine::with_options(config, options)?;
    Ok(engine.analyze(text))
}
