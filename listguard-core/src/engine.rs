// listguard-core/src/engine.rs
//! Defines the core `ComplianceEngine` trait.
//!
//! The trait is the contract between callers (the CLI, the headless helpers)
//! and a concrete rule-matching implementation. Both core operations are
//! total: they take text and always produce a value.
//!
//! License: MIT OR APACHE 2.0

use crate::config::GuardConfig;
use crate::profiles::EngineOptions;
use crate::report::{summarize_matches, ComplianceReport, TriggerMatch, TriggerSummaryItem};
use crate::sanitizers::compiler::CompiledRules;

/// A listing compliance engine.
///
/// Implementations hold only immutable rule tables, so a single engine can be
/// shared between threads and called concurrently.
pub trait ComplianceEngine: Send + Sync {
    /// Rewrites spam triggers in `text` and returns the sanitized text.
    ///
    /// Patterns run in category priority order, each match being replaced by
    /// its table entry or its lowercased form. Long emoji runs are then
    /// collapsed, and an all-uppercase result above the length threshold is
    /// turned into sentence case.
    fn sanitize(&self, text: &str) -> String;

    /// Scans the unmodified `text` and reports one issue per triggered category,
    /// taken from the first firing pattern of that category.
    fn analyze(&self, text: &str) -> ComplianceReport;

    /// Every occurrence of every enabled pattern in the unmodified `text`,
    /// ordered by start offset.
    fn find_matches(&self, text: &str) -> Vec<TriggerMatch>;

    /// Per-rule occurrence counts, used for scan statistics.
    fn summarize(&self, text: &str) -> Vec<TriggerSummaryItem> {
        summarize_matches(&self.find_matches(text))
    }

    /// Returns the compiled rules the engine applies.
    fn compiled_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn get_rules(&self) -> &GuardConfig;

    /// Returns a reference to the engine's options.
    fn get_options(&self) -> &EngineOptions;
}
