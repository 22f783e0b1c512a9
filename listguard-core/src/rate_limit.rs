// listguard-core/src/rate_limit.rs
//! Copy-rate verdicts.
//!
//! Posting the same kind of listing too often is its own spam signal, so the
//! caller reports how many listings were copied recently and gets back an
//! allow/deny verdict plus warnings once the "safe" pace is exceeded. The
//! counters are owned by the caller; this module only judges them.

use serde::{Deserialize, Serialize};

use crate::config::Severity;

/// Thresholds for the copy-rate verdict.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_per_hour: u32,
    pub max_per_day: u32,
    pub safe_per_hour: u32,
    pub safe_per_day: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_hour: 50,
            max_per_day: 200,
            safe_per_hour: 30,
            safe_per_day: 100,
        }
    }
}

/// Recent usage counters supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageData {
    pub copies_last_hour: u32,
    pub copies_today: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitWarning {
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitVerdict {
    pub allowed: bool,
    pub warnings: Vec<RateLimitWarning>,
    pub remaining_hour: u32,
    pub remaining_day: u32,
}

/// Judges `usage` against `limits`.
///
/// Copying is allowed while both counters are strictly below their hard
/// maximums. Warnings fire independently once a counter passes its safe pace.
pub fn check_rate_limit(usage: &UsageData, limits: &RateLimitConfig) -> RateLimitVerdict {
    let mut warnings = Vec::new();

    if usage.copies_last_hour > limits.safe_per_hour {
        warnings.push(RateLimitWarning {
            severity: Severity::Medium,
            message: format!(
                "You've copied {} times in the last hour. Slow down to avoid detection.",
                usage.copies_last_hour
            ),
        });
    }

    if usage.copies_today > limits.safe_per_day {
        warnings.push(RateLimitWarning {
            severity: Severity::High,
            message: format!(
                "You've copied {} times today. Consider taking a break.",
                usage.copies_today
            ),
        });
    }

    RateLimitVerdict {
        allowed: usage.copies_last_hour < limits.max_per_hour
            && usage.copies_today < limits.max_per_day,
        warnings,
        remaining_hour: limits.max_per_hour.saturating_sub(usage.copies_last_hour),
        remaining_day: limits.max_per_day.saturating_sub(usage.copies_today),
    }
}
