// listguard-core/src/engines/regex_engine.rs
//! A `ComplianceEngine` implementation backed by regular expressions.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Captures;
use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{Category, GuardConfig};
use crate::engine::ComplianceEngine;
use crate::profiles::{EngineOptions, ReplacementMode};
use crate::report::{ComplianceIssue, ComplianceReport, TriggerMatch};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRules};
use crate::text;

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: GuardConfig,
    options: EngineOptions,
}

impl RegexEngine {
    pub fn new(config: GuardConfig) -> Result<Self> {
        Self::with_options(config, EngineOptions::default())
    }

    pub fn with_options(config: GuardConfig, options: EngineOptions) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile spam patterns for RegexEngine")?;

        if let ReplacementMode::FixedPoint { max_passes } = options.replacement_mode {
            debug!("RegexEngine running replacements to a fixed point (max {} passes).", max_passes);
        }

        Ok(Self {
            compiled_rules,
            config,
            options,
        })
    }

    /// One pass of every compiled pattern, in priority order, over `input`.
    fn apply_pattern_passes(&self, input: &str) -> String {
        let mut working = input.to_string();
        for rule in &self.compiled_rules.rules {
            working = rule
                .regex
                .replace_all(&working, |caps: &Captures<'_>| {
                    let matched = &caps[0];
                    let replacement = self.compiled_rules.rewrite(rule, matched);
                    debug!(
                        "Rewrite by '{}': '{}' -> '{}'",
                        rule.name, matched, replacement
                    );
                    replacement
                })
                .into_owned();
        }
        working
    }

    fn apply_replacements(&self, input: &str) -> String {
        match self.options.replacement_mode {
            ReplacementMode::SinglePass => self.apply_pattern_passes(input),
            ReplacementMode::FixedPoint { max_passes } => {
                let mut current = input.to_string();
                for pass in 1..=max_passes.max(1) {
                    let next = self.apply_pattern_passes(&current);
                    if next == current {
                        debug!("Replacements settled after {} pass(es).", pass);
                        return next;
                    }
                    current = next;
                }
                warn!(
                    "Replacements did not settle within {} passes; returning the last result.",
                    max_passes
                );
                current
            }
        }
    }
}

impl ComplianceEngine for RegexEngine {
    fn sanitize(&self, input: &str) -> String {
        let limits = &self.config.limits;

        let replaced = self.apply_replacements(input);
        let collapsed = text::collapse_emoji_runs(&replaced, limits.max_emoji_run);

        let sanitized = if text::is_shouting(&collapsed, limits.shout_length_threshold) {
            debug!("Result is all uppercase; converting to sentence case.");
            text::to_sentence_case(&collapsed)
        } else {
            collapsed.into_owned()
        };

        debug!(
            "Sanitized text. Original length: {}, sanitized length: {}",
            input.len(),
            sanitized.len()
        );
        sanitized
    }

    fn analyze(&self, input: &str) -> ComplianceReport {
        // Rules are in priority order, so the first firing rule of a category
        // is the one reported for it.
        let mut seen: HashSet<Category> = HashSet::new();
        let issues: Vec<ComplianceIssue> = self
            .compiled_rules
            .rules
            .iter()
            .filter(|rule| {
                !seen.contains(&rule.category) && rule.regex.is_match(input) && seen.insert(rule.category)
            })
            .map(ComplianceIssue::from_rule)
            .collect();
        ComplianceReport::from_issues(issues)
    }

    fn find_matches(&self, input: &str) -> Vec<TriggerMatch> {
        let mut out: Vec<TriggerMatch> = self
            .compiled_rules
            .rules
            .iter()
            .flat_map(|rule| {
                rule.regex.find_iter(input).map(move |m| TriggerMatch {
                    rule_name: rule.name.clone(),
                    category: rule.category,
                    original_string: m.as_str().to_string(),
                    replacement: self.compiled_rules.rewrite(rule, m.as_str()),
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();
        out.sort_by_key(|m| m.start);
        out
    }

    fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    fn get_rules(&self) -> &GuardConfig {
        &self.config
    }

    fn get_options(&self) -> &EngineOptions {
        &self.options
    }
}
