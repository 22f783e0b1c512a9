// listguard-core/src/lib.rs
//! # listguard Core Library
//!
//! `listguard-core` checks marketplace listing text for phrasing that tends to
//! get posts flagged as spam, and rewrites it. It defines the rule tables
//! (ordered spam patterns plus a replacement table), compiles them once, and
//! exposes a `ComplianceEngine` with two pure operations:
//!
//! * `sanitize(text)`: rewrite triggers, collapse emoji runs, tame shouting.
//! * `analyze(text)`: report which patterns fire and a 0-100 risk score.
//!
//! ## Modules
//!
//! * `config`: `SpamPattern`s, the replacement table and limits (`GuardConfig`).
//! * `sanitizers`: compilation and caching of the rule tables.
//! * `engine`: the `ComplianceEngine` trait.
//! * `engines`: concrete engines (`RegexEngine`).
//! * `report`: matches, summaries and the `ComplianceReport`.
//! * `text`: emoji/casing helpers and the UTF-8 input boundary.
//! * `rate_limit`: copy-rate verdicts.
//! * `profiles`: named overlays and `EngineOptions`.
//! * `headless`: one-shot helpers and the full compliance check.
//!
//! ## Usage Example
//!
//! ```rust
//! use listguard_core::{ComplianceEngine, GuardConfig, RegexEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let engine = RegexEngine::new(GuardConfig::load_default_rules()?)?;
//!
//!     let input = "RARE Rolex, ACT NOW, guaranteed authentic!!";
//!     assert_eq!(engine.sanitize(input), "Rare Rolex, inquire today, verified authentic!!");
//!
//!     let report = engine.analyze(input);
//!     assert!(!report.compliant);
//!     assert_eq!(report.risk_score, 60);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! `sanitize` and `analyze` cannot fail. Loading and compiling rules returns
//! `anyhow::Result`; library-specific failures are `GuardError` variants.
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod profiles;
pub mod rate_limit;
pub mod report;
pub mod sanitizers;
pub mod text;

pub use config::{
    merge_rules,
    validate_rules,
    Category,
    GuardConfig,
    LimitsConfig,
    Severity,
    SpamPattern,
    MAX_PATTERN_LENGTH,
};

pub use errors::GuardError;

pub use engine::ComplianceEngine;

pub use engines::regex_engine::RegexEngine;

pub use report::{
    risk_score_for,
    summarize_matches,
    text_fingerprint,
    ComplianceIssue,
    ComplianceReport,
    TriggerMatch,
    TriggerSummaryItem,
};

pub use rate_limit::{check_rate_limit, RateLimitConfig, RateLimitVerdict, RateLimitWarning, UsageData};

pub use profiles::{
    apply_profile_to_config,
    builtin_profile_yaml,
    list_available_profiles,
    load_profile_by_name,
    profile_candidate_paths,
    EngineOptions,
    ProfileConfig,
    ProfileRule,
    ProfileSummary,
    ReplacementMode,
};

pub use headless::{check_compliance, headless_analyze_string, headless_sanitize_string, ComplianceCheck};

pub use sanitizers::compiler::{compile_rules, get_or_compile_rules, CompiledRule, CompiledRules};
