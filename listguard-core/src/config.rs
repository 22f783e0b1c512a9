//! Configuration management for `listguard-core`.
//!
//! This module defines the spam-trigger rule tables: the ordered pattern list,
//! the replacement table, and the numeric limits used by the sanitizer. It
//! handles YAML (de)serialization and provides utilities for loading, merging,
//! and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::path::Path;

use crate::rate_limit::RateLimitConfig;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Placeholder for the quantifier "more emoji than `limits.max_emoji_run`".
/// Expanded to `{N,}` with `N = max_emoji_run + 1` before compiling, so the
/// analyzer flags exactly the runs the sanitizer shortens.
pub const EMOJI_OVER_LIMIT_TOKEN: &str = "{over_emoji_limit}";

/// Spam category of a pattern. The declaration order is the priority order in
/// which the sanitizer applies patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Urgency,
    Shouting,
    EmojiSpam,
    Promotional,
    /// Phone numbers, links and "message me for price" requests.
    ContactInfo,
    Punctuation,
    /// Whitespace padding such as long runs of blank lines.
    Formatting,
}

impl Category {
    /// Lower runs first.
    pub fn priority(self) -> u8 {
        match self {
            Category::Urgency => 0,
            Category::Shouting => 1,
            Category::EmojiSpam => 2,
            Category::Promotional => 3,
            Category::ContactInfo => 4,
            Category::Punctuation => 5,
            Category::Formatting => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Urgency => "urgency",
            Category::Shouting => "shouting",
            Category::EmojiSpam => "emoji-spam",
            Category::Promotional => "promotional",
            Category::ContactInfo => "contact-info",
            Category::Punctuation => "punctuation",
            Category::Formatting => "formatting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        };
        f.write_str(s)
    }
}

/// A single spam-trigger rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SpamPattern {
    /// Unique identifier for the pattern (e.g., "urgency").
    pub name: String,
    pub category: Category,
    /// The regex pattern string.
    pub pattern: String,
    /// Human-readable description reported in compliance issues.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub case_insensitive: bool,
    #[serde(default)]
    pub severity: Severity,
    /// Explicit override for enabling/disabling the pattern.
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Fixed text substituted for every match, bypassing the replacement
    /// table. Used where matches vary (phone numbers, links, punctuation runs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_with: Option<String>,
}

impl SpamPattern {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    /// The description if present, otherwise the raw pattern source.
    pub fn describe(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.pattern)
    }

    /// The regex source with [`EMOJI_OVER_LIMIT_TOKEN`] expanded for `limits`.
    pub fn regex_source(&self, limits: &LimitsConfig) -> Cow<'_, str> {
        if self.pattern.contains(EMOJI_OVER_LIMIT_TOKEN) {
            let quantifier = format!("{{{},}}", limits.max_emoji_run + 1);
            Cow::Owned(self.pattern.replace(EMOJI_OVER_LIMIT_TOKEN, &quantifier))
        } else {
            Cow::Borrowed(&self.pattern)
        }
    }
}

/// Lowercases replacement keys; on collision the later entry wins.
pub(crate) fn insert_replacement(table: &mut BTreeMap<String, String>, trigger: &str, replacement: &str) {
    table.insert(trigger.to_lowercase(), replacement.to_string());
}

/// Numeric limits for the post-pass normalizations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest emoji run kept as-is; longer runs are cut down to this length.
    pub max_emoji_run: usize,
    /// All-uppercase results longer than this many characters become sentence case.
    pub shout_length_threshold: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_emoji_run: 3,
            shout_length_threshold: 20,
        }
    }
}

/// The top-level rule configuration.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub patterns: Vec<SpamPattern>,
    /// Lowercase trigger phrase -> sanctioned replacement.
    #[serde(default)]
    pub replacements: BTreeMap<String, String>,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub rate_limits: RateLimitConfig,
}

impl GuardConfig {
    /// Loads rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GuardConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config)?;
        info!(
            "Loaded {} patterns and {} replacements from file {}.",
            config.patterns.len(),
            config.replacements.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the built-in rule tables from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: GuardConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default rules")?;

        debug!("Loaded {} default patterns.", config.patterns.len());
        Ok(config)
    }

    /// Default rules merged with an optional user rule file.
    pub fn load_with_overrides(user_path: Option<&Path>) -> Result<Self> {
        let defaults = Self::load_default_rules()?;
        let user = user_path.map(Self::load_from_file).transpose()?;
        Ok(merge_rules(defaults, user))
    }

    /// Marks the named patterns as disabled.
    pub fn set_disabled_patterns(&mut self, disable: &[String]) {
        let disable_set: HashSet<&str> = disable.iter().map(String::as_str).collect();
        let known: HashSet<&str> = self.patterns.iter().map(|p| p.name.as_str()).collect();

        for name in disable_set.difference(&known) {
            warn!("Pattern '{}' in disable list does not exist.", name);
        }

        for pattern in self.patterns.iter_mut() {
            if disable_set.contains(pattern.name.as_str()) {
                debug!("Disabling pattern '{}'.", pattern.name);
                pattern.enabled = Some(false);
            }
        }
    }

    pub fn find_pattern(&self, name: &str) -> Option<&SpamPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }
}

/// Merges user-defined patterns, replacements and limits with defaults.
///
/// A user pattern with the same name replaces the default in place; new
/// patterns are appended, so declaration order stays deterministic.
pub fn merge_rules(default_config: GuardConfig, user_config: Option<GuardConfig>) -> GuardConfig {
    debug!(
        "merge_rules called. Initial default pattern count: {}",
        default_config.patterns.len()
    );

    let Some(user_cfg) = user_config else {
        return default_config;
    };

    let mut merged = default_config;
    debug!("User config provided. Merging {} user patterns.", user_cfg.patterns.len());

    let positions: HashMap<String, usize> = merged
        .patterns
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.clone(), i))
        .collect();

    for user_pattern in user_cfg.patterns {
        match positions.get(&user_pattern.name) {
            Some(&idx) => merged.patterns[idx] = user_pattern,
            None => merged.patterns.push(user_pattern),
        }
    }

    for (trigger, replacement) in &user_cfg.replacements {
        insert_replacement(&mut merged.replacements, trigger, replacement);
    }

    if user_cfg.limits != LimitsConfig::default() {
        debug!("Overriding limits with user values: {:?}", user_cfg.limits);
        merged.limits = user_cfg.limits;
    }
    if user_cfg.rate_limits != RateLimitConfig::default() {
        debug!("Overriding rate limits with user values: {:?}", user_cfg.rate_limits);
        merged.rate_limits = user_cfg.rate_limits;
    }

    debug!("Final total patterns after merge: {}", merged.patterns.len());
    merged
}

/// Validates rule integrity (names, regex compilation, replacement keys, limits).
///
/// Patterns are compiled with [`EMOJI_OVER_LIMIT_TOKEN`] expanded against
/// `config.limits`, so a changed `max_emoji_run` is checked together with the
/// patterns that depend on it.
pub fn validate_rules(config: &GuardConfig) -> Result<()> {
    let mut pattern_names = HashSet::new();
    let mut errors = Vec::new();

    for pattern in &config.patterns {
        if pattern.name.is_empty() {
            errors.push("A pattern has an empty `name` field.".to_string());
        } else if !pattern_names.insert(pattern.name.clone()) {
            errors.push(format!("Duplicate pattern name found: '{}'.", pattern.name));
        }

        if pattern.pattern.is_empty() {
            errors.push(format!("Pattern '{}' has an empty `pattern` field.", pattern.name));
            continue;
        }

        if pattern.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Pattern '{}': pattern length ({}) exceeds maximum allowed ({}).",
                pattern.name,
                pattern.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if let Err(e) = RegexBuilder::new(&pattern.regex_source(&config.limits))
            .case_insensitive(pattern.case_insensitive)
            .build()
        {
            errors.push(format!("Pattern '{}' has an invalid regex: {}", pattern.name, e));
        }
    }

    let mut seen_triggers = HashSet::new();
    for trigger in config.replacements.keys() {
        if trigger.trim().is_empty() {
            errors.push("The replacement table has an empty trigger key.".to_string());
        } else if !seen_triggers.insert(trigger.to_lowercase()) {
            errors.push(format!(
                "Replacement trigger '{}' collides with another key once lowercased.",
                trigger
            ));
        }
    }

    if config.limits.max_emoji_run == 0 {
        errors.push("`limits.max_emoji_run` must be at least 1.".to_string());
    }

    let rl = &config.rate_limits;
    if rl.safe_per_hour > rl.max_per_hour || rl.safe_per_day > rl.max_per_day {
        warn!("Rate limit 'safe' thresholds exceed the hard maximums; warnings will never fire before blocking.");
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}
